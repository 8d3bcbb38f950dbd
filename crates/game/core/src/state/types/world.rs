use std::collections::BTreeSet;

use super::Position;

/// Player-relative knowledge of the map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Tiles inside the player's current field of view.
    pub visible: BTreeSet<Position>,
    /// Every tile that has ever been visible.
    pub explored: BTreeSet<Position>,
}

impl WorldState {
    pub fn is_visible(&self, position: Position) -> bool {
        self.visible.contains(&position)
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.explored.contains(&position)
    }

    /// Replaces the visible set and folds it into explored memory.
    pub fn update_visibility(&mut self, visible: BTreeSet<Position>) {
        self.explored.extend(visible.iter().copied());
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explored_memory_outlives_visibility() {
        let mut world = WorldState::default();
        world.update_visibility([Position::new(1, 1)].into());
        world.update_visibility([Position::new(2, 1)].into());

        assert!(!world.is_visible(Position::new(1, 1)));
        assert!(world.is_explored(Position::new(1, 1)));
        assert!(world.is_visible(Position::new(2, 1)));
    }
}
