pub mod actor;
pub mod common;
pub mod entities;
pub mod item;
pub mod turn;
pub mod world;

pub use actor::{
    ActorState, Ai, EquipSlot, Equipment, Fighter, InventoryError, InventoryState, NORMAL_SPEED,
};
pub use common::{EntityId, Position, Rgb, Tick};
pub use entities::{Blueprint, EntitiesState, Entity, EntityKind, Placement, RenderOrder};
pub use item::{Consumable, Equippable, ItemState};
pub use turn::{Drain, Ticket, TurnError, TurnQueue, TurnState};
pub use world::WorldState;
