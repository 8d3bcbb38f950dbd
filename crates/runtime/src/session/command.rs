//! Abstract input tokens and the interaction modes that interpret them.
use game_core::{CardinalDirection, EntityId, Position};

/// Input produced by an input-mapping front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    Move(CardinalDirection),
    Wait,
    Escape,
    Pickup,
    OpenInventory,
    OpenDropMenu,
    /// Picks the n-th carried item in the open menu.
    SelectIndex(usize),
    /// Drops the n-th carried item without opening the drop menu.
    DropIndex(usize),
    ConfirmTarget(Position),
}

/// How the next command is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InteractionMode {
    #[default]
    Normal,
    /// Selecting an item to use or equip.
    Inventory,
    /// Selecting an item to drop.
    DropMenu,
    /// Waiting for a location to aim `item` at.
    Targeting { item: EntityId },
}

impl InteractionMode {
    pub fn is_menu(self) -> bool {
        !matches!(self, InteractionMode::Normal)
    }
}

/// What a submitted command led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The player acted and every actor due before their next turn has acted.
    TurnTaken,
    /// The command was refused; see the message log for why.
    Rejected,
    ModeChanged(InteractionMode),
    Quit,
    /// The player is dead. Only `Escape` is accepted from here on.
    GameOver,
}
