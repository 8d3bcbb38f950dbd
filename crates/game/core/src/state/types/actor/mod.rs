//! Actor components: combat stats, carried items, worn gear, and behavior.
mod behavior;
mod equipment;
mod fighter;
mod inventory;

pub use behavior::Ai;
pub use equipment::{EquipSlot, Equipment};
pub use fighter::Fighter;
pub use inventory::{InventoryError, InventoryState};

/// Speed of an ordinary actor. Scheduling intervals scale by `NORMAL_SPEED / speed`.
pub const NORMAL_SPEED: u32 = 100;

/// Everything that makes an entity an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub fighter: Fighter,
    pub inventory: InventoryState,
    pub equipment: Equipment,
    pub ai: Ai,
    /// Relative speed; 100 is normal, 200 acts twice as often.
    pub speed: u32,
}

impl ActorState {
    pub fn new(fighter: Fighter, inventory_capacity: usize, ai: Ai) -> Self {
        Self {
            fighter,
            inventory: InventoryState::with_capacity(inventory_capacity),
            equipment: Equipment::default(),
            ai,
            speed: NORMAL_SPEED,
        }
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// An actor is alive while it has a non-terminal behavior and positive hp.
    pub fn is_alive(&self) -> bool {
        !self.ai.is_dead() && !self.fighter.is_dead()
    }

    /// Converts a base action cost into this actor's scheduling interval.
    ///
    /// A zero base cost stays zero; anything else costs at least one tick.
    pub fn scaled_cost(&self, base_cost: u64) -> u64 {
        if base_cost == 0 {
            return 0;
        }
        let speed = u64::from(self.speed.max(1));
        (base_cost.saturating_mul(u64::from(NORMAL_SPEED)) / speed).max(1)
    }
}
