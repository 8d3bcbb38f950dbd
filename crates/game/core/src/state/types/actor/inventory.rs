use crate::state::types::EntityId;

/// Failures of the low-level inventory bookkeeping.
///
/// Actions check their preconditions first, so reaching one of these from an
/// action means the state and the validation disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory is full")]
    Full,

    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("entity {0} is not an actor")]
    NotAnActor(EntityId),

    #[error("entity {0} is not an item")]
    NotAnItem(EntityId),

    #[error("item {item} is not lying on the map")]
    NotOnMap { item: EntityId },

    #[error("item {item} is not carried by {owner}")]
    NotCarried { owner: EntityId, item: EntityId },
}

/// Bounded, ordered list of carried items.
///
/// Order is pickup order; menus index into it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    capacity: usize,
    items: Vec<EntityId>,
}

impl InventoryState {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> &[EntityId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    /// Item at a menu index.
    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.items.get(index).copied()
    }

    pub(crate) fn push(&mut self, item: EntityId) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full);
        }
        self.items.push(item);
        Ok(())
    }

    pub(crate) fn remove(&mut self, item: EntityId) -> bool {
        match self.items.iter().position(|held| *held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}
