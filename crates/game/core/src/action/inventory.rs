use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, EquipSlot, GameState, InventoryError, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PickupError {
    #[error("There is nothing here to pick up.")]
    NothingHere { position: Position },

    #[error("Your inventory is full.")]
    InventoryFull,

    #[error("actor {0} not found on the map")]
    ActorNotFound(EntityId),

    #[error("inventory bookkeeping failed: {0}")]
    Inventory(#[from] InventoryError),
}

impl GameError for PickupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PickupError::NothingHere { .. } | PickupError::InventoryFull => {
                ErrorSeverity::Impossible
            }
            PickupError::ActorNotFound(_) | PickupError::Inventory(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PickupError::NothingHere { .. } => "PICKUP_NOTHING_HERE",
            PickupError::InventoryFull => "PICKUP_INVENTORY_FULL",
            PickupError::ActorNotFound(_) => "PICKUP_ACTOR_NOT_FOUND",
            PickupError::Inventory(_) => "PICKUP_INVENTORY_DESYNC",
        }
    }
}

/// Pick up the first item (lowest id) lying under the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupAction {
    pub actor: EntityId,
}

impl PickupAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }

    fn item_here(&self, state: &GameState) -> Result<EntityId, PickupError> {
        let position = state
            .entities
            .position(self.actor)
            .ok_or(PickupError::ActorNotFound(self.actor))?;
        state
            .entities
            .items_at(position)
            .map(|item| item.id)
            .next()
            .ok_or(PickupError::NothingHere { position })
    }
}

impl ActionTransition for PickupAction {
    type Error = PickupError;
    type Result = EntityId;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.item_here(state)?;
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(PickupError::ActorNotFound(self.actor))?;
        if actor.inventory.is_full() {
            return Err(PickupError::InventoryFull);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let item = self.item_here(state)?;
        state.entities.pick_up(self.actor, item)?;
        Ok(item)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DropError {
    #[error("You are not carrying that.")]
    NotCarried { item: EntityId },

    #[error("inventory bookkeeping failed: {0}")]
    Inventory(#[from] InventoryError),
}

impl GameError for DropError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DropError::NotCarried { .. } => ErrorSeverity::Impossible,
            DropError::Inventory(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DropError::NotCarried { .. } => "DROP_NOT_CARRIED",
            DropError::Inventory(_) => "DROP_INVENTORY_DESYNC",
        }
    }
}

/// Put a carried item down on the actor's tile, unequipping it first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropAction {
    pub actor: EntityId,
    pub item: EntityId,
}

impl DropAction {
    pub fn new(actor: EntityId, item: EntityId) -> Self {
        Self { actor, item }
    }
}

impl ActionTransition for DropAction {
    type Error = DropError;
    type Result = Position;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !carries(state, self.actor, self.item) {
            return Err(DropError::NotCarried { item: self.item });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        Ok(state.entities.drop_item(self.actor, self.item)?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("You are not carrying that.")]
    NotCarried { item: EntityId },

    #[error("That cannot be equipped.")]
    NotEquippable { item: EntityId },

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EquipError::NotCarried { .. } | EquipError::NotEquippable { .. } => {
                ErrorSeverity::Impossible
            }
            EquipError::ActorNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EquipError::NotCarried { .. } => "EQUIP_NOT_CARRIED",
            EquipError::NotEquippable { .. } => "EQUIP_NOT_EQUIPPABLE",
            EquipError::ActorNotFound(_) => "EQUIP_ACTOR_NOT_FOUND",
        }
    }
}

/// Outcome of toggling an item's equipped state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipChange {
    Equipped {
        item: EntityId,
        slot: EquipSlot,
        replaced: Option<EntityId>,
    },
    Unequipped {
        item: EntityId,
        slot: EquipSlot,
    },
}

/// Equip a carried item, or take it off if it is already worn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipAction {
    pub actor: EntityId,
    pub item: EntityId,
}

impl EquipAction {
    pub fn new(actor: EntityId, item: EntityId) -> Self {
        Self { actor, item }
    }

    fn slot(&self, state: &GameState) -> Result<EquipSlot, EquipError> {
        state
            .entities
            .item(self.item)
            .and_then(|item| item.equippable)
            .map(|equippable| equippable.slot)
            .ok_or(EquipError::NotEquippable { item: self.item })
    }
}

impl ActionTransition for EquipAction {
    type Error = EquipError;
    type Result = EquipChange;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !carries(state, self.actor, self.item) {
            return Err(EquipError::NotCarried { item: self.item });
        }
        self.slot(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let slot = self.slot(state)?;
        let equipment = &mut state
            .entities
            .actor_mut(self.actor)
            .ok_or(EquipError::ActorNotFound(self.actor))?
            .equipment;

        if equipment.is_equipped(self.item) {
            equipment.unequip(self.item);
            return Ok(EquipChange::Unequipped {
                item: self.item,
                slot,
            });
        }

        let replaced = equipment.equip(slot, self.item);
        Ok(EquipChange::Equipped {
            item: self.item,
            slot,
            replaced,
        })
    }
}

pub(super) fn carries(state: &GameState, actor: EntityId, item: EntityId) -> bool {
    state
        .entities
        .actor(actor)
        .is_some_and(|actor| actor.inventory.contains(item))
}
