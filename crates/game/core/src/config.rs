/// Who pays for a rejected player action.
///
/// Non-player actors always pay a full turn for a rejected action so a
/// blocked monster cannot spin on the same tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RejectedMovePolicy {
    /// The player is re-prompted; the clock does not move.
    #[default]
    Free,
    /// The player loses the turn as if it had waited.
    Spend,
}

/// Tunable rules parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Ticks a full action costs an actor of normal speed.
    pub turn_cost: u64,
    /// Field-of-view radius around the player, in tiles.
    pub fov_radius: u32,
    /// Inventory slots for actors spawned without an explicit capacity.
    pub inventory_capacity: usize,
    /// Message log lines retained by the runtime.
    pub message_capacity: usize,
    pub rejected_move: RejectedMovePolicy,
}

impl GameConfig {
    pub const DEFAULT_TURN_COST: u64 = 100;
    pub const DEFAULT_FOV_RADIUS: u32 = 8;
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 26;
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 64;
    /// Upper bound accepted from configuration files.
    pub const MAX_TURN_COST: u64 = 1_000_000;

    pub fn new() -> Self {
        Self {
            turn_cost: Self::DEFAULT_TURN_COST,
            fov_radius: Self::DEFAULT_FOV_RADIUS,
            inventory_capacity: Self::DEFAULT_INVENTORY_CAPACITY,
            message_capacity: Self::DEFAULT_MESSAGE_CAPACITY,
            rejected_move: RejectedMovePolicy::Free,
        }
    }

    pub fn with_rejected_move(mut self, policy: RejectedMovePolicy) -> Self {
        self.rejected_move = policy;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
