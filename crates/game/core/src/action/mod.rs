//! Action domain: the closed set of things an actor can do.
//!
//! Each variant wraps a transition type implementing [`ActionTransition`].
//! Actions are transient values: built, executed once by
//! [`crate::engine::GameEngine`], and discarded.
mod consume;
mod direction;
mod inventory;
mod melee;
mod movement;
mod transition;
mod wait;

pub use consume::{ConsumeAction, ConsumeError, Consumed, ItemEffect};
pub use direction::CardinalDirection;
pub use inventory::{
    DropAction, DropError, EquipAction, EquipChange, EquipError, PickupAction, PickupError,
};
pub use melee::{MeleeAction, MeleeError};
pub use movement::{BumpAction, BumpResolution, MoveAction, MoveError};
pub use transition::ActionTransition;
pub use wait::WaitAction;

use crate::combat::AttackOutcome;
use crate::state::{EntityId, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Wait(WaitAction),
    Move(MoveAction),
    Melee(MeleeAction),
    /// Move-or-attack; resolved against the state right before execution.
    Bump(BumpAction),
    Pickup(PickupAction),
    Consume(ConsumeAction),
    Drop(DropAction),
    Equip(EquipAction),
    /// Meta action: never touches the world and costs nothing.
    Escape { actor: EntityId },
}

impl Action {
    pub fn wait(actor: EntityId) -> Self {
        Action::Wait(WaitAction::new(actor))
    }

    pub fn step(actor: EntityId, direction: CardinalDirection) -> Self {
        Action::Move(MoveAction::new(actor, direction))
    }

    pub fn melee(actor: EntityId, direction: CardinalDirection) -> Self {
        Action::Melee(MeleeAction::new(actor, direction))
    }

    pub fn bump(actor: EntityId, direction: CardinalDirection) -> Self {
        Action::Bump(BumpAction::new(actor, direction))
    }

    pub fn pickup(actor: EntityId) -> Self {
        Action::Pickup(PickupAction::new(actor))
    }

    pub fn consume(actor: EntityId, item: EntityId, target: Option<Position>) -> Self {
        Action::Consume(ConsumeAction {
            actor,
            item,
            target,
        })
    }

    pub fn drop_item(actor: EntityId, item: EntityId) -> Self {
        Action::Drop(DropAction::new(actor, item))
    }

    pub fn equip(actor: EntityId, item: EntityId) -> Self {
        Action::Equip(EquipAction::new(actor, item))
    }

    pub fn actor(&self) -> EntityId {
        match self {
            Action::Wait(action) => action.actor,
            Action::Move(action) => action.actor,
            Action::Melee(action) => action.actor,
            Action::Bump(action) => action.actor,
            Action::Pickup(action) => action.actor,
            Action::Consume(action) => action.actor,
            Action::Drop(action) => action.actor,
            Action::Equip(action) => action.actor,
            Action::Escape { actor } => *actor,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Wait(_) => ActionKind::Wait,
            Action::Move(_) => ActionKind::Move,
            Action::Melee(_) => ActionKind::Melee,
            Action::Bump(_) => ActionKind::Bump,
            Action::Pickup(_) => ActionKind::Pickup,
            Action::Consume(_) => ActionKind::Consume,
            Action::Drop(_) => ActionKind::Drop,
            Action::Equip(_) => ActionKind::Equip,
            Action::Escape { .. } => ActionKind::Escape,
        }
    }
}

/// Fieldless mirror of [`Action`] for logs and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Wait,
    Move,
    Melee,
    Bump,
    Pickup,
    Consume,
    Drop,
    Equip,
    Escape,
}

/// What a successful action did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Waited,
    Moved { from: Position, to: Position },
    Attacked(AttackOutcome),
    PickedUp { item: EntityId },
    Consumed(Consumed),
    Dropped { item: EntityId, at: Position },
    Equipment(EquipChange),
    Escaped,
}
