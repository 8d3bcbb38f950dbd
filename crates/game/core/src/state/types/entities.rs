use std::collections::BTreeMap;

use super::{ActorState, EntityId, InventoryError, ItemState, Position, Rgb};

/// Where an entity currently lives.
///
/// An item is owned by exactly one of the map or an inventory; the placement
/// tag is the single source of truth and the owner's inventory list mirrors it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    OnMap(Position),
    InInventory(EntityId),
}

/// Draw layering only. Higher ranks draw on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Actor(ActorState),
    Item(ItemState),
}

/// Everything needed to spawn an entity, minus its id and placement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blueprint {
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Blueprint {
    pub fn actor(name: impl Into<String>, glyph: char, color: Rgb, actor: ActorState) -> Self {
        Self {
            name: name.into(),
            glyph,
            color,
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor(actor),
        }
    }

    pub fn item(name: impl Into<String>, glyph: char, color: Rgb, item: ItemState) -> Self {
        Self {
            name: name.into(),
            glyph,
            color,
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item(item),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub placement: Placement,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Entity {
    /// Map position, or `None` while carried.
    pub fn position(&self) -> Option<Position> {
        match self.placement {
            Placement::OnMap(position) => Some(position),
            Placement::InInventory(_) => None,
        }
    }

    pub fn as_actor(&self) -> Option<&ActorState> {
        match &self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut ActorState> {
        match &mut self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemState> {
        match &self.kind {
            EntityKind::Item(item) => Some(item),
            EntityKind::Actor(_) => None,
        }
    }

    pub fn is_living_actor(&self) -> bool {
        self.as_actor().is_some_and(ActorState::is_alive)
    }
}

/// Arena of every entity in the level, keyed by stable id.
///
/// Iteration is in id order, which keeps every scan deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
}

impl EntitiesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a new entity on the map and returns its freshly allocated id.
    pub fn spawn(&mut self, blueprint: Blueprint, position: Position) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let Blueprint {
            name,
            glyph,
            color,
            blocks_movement,
            render_order,
            kind,
        } = blueprint;

        self.entities.insert(
            id,
            Entity {
                id,
                name,
                glyph,
                color,
                placement: Placement::OnMap(position),
                blocks_movement,
                render_order,
                kind,
            },
        );
        id
    }

    /// Deletes an entity outright. Used for consumed items.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.get(id).and_then(Entity::as_actor)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.get_mut(id).and_then(Entity::as_actor_mut)
    }

    pub fn item(&self, id: EntityId) -> Option<&ItemState> {
        self.get(id).and_then(Entity::as_item)
    }

    pub fn position(&self, id: EntityId) -> Option<Position> {
        self.get(id).and_then(Entity::position)
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.get(id).map(|entity| entity.name.as_str())
    }

    /// Actors that are alive, in id order.
    pub fn living_actors(&self) -> impl Iterator<Item = &Entity> {
        self.iter().filter(|entity| entity.is_living_actor())
    }

    /// Entities lying on the map (not carried).
    pub fn on_map(&self) -> impl Iterator<Item = (Position, &Entity)> {
        self.iter()
            .filter_map(|entity| entity.position().map(|position| (position, entity)))
    }

    pub fn blocking_entity_at(&self, position: Position) -> Option<&Entity> {
        self.on_map()
            .find(|(at, entity)| *at == position && entity.blocks_movement)
            .map(|(_, entity)| entity)
    }

    /// Living actor standing on `position`.
    pub fn actor_at(&self, position: Position) -> Option<&Entity> {
        self.on_map()
            .find(|(at, entity)| *at == position && entity.is_living_actor())
            .map(|(_, entity)| entity)
    }

    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &Entity> {
        self.on_map()
            .filter(move |(at, entity)| *at == position && entity.as_item().is_some())
            .map(|(_, entity)| entity)
    }

    pub fn set_position(&mut self, id: EntityId, position: Position) {
        if let Some(entity) = self.get_mut(id) {
            entity.placement = Placement::OnMap(position);
        }
    }

    /// Moves a map item into `owner`'s inventory.
    ///
    /// Nothing is modified on failure.
    pub fn pick_up(&mut self, owner: EntityId, item: EntityId) -> Result<(), InventoryError> {
        let entity = self.get(item).ok_or(InventoryError::UnknownEntity(item))?;
        if entity.as_item().is_none() {
            return Err(InventoryError::NotAnItem(item));
        }
        if entity.position().is_none() {
            return Err(InventoryError::NotOnMap { item });
        }

        self.actor_mut(owner)
            .ok_or(InventoryError::NotAnActor(owner))?
            .inventory
            .push(item)?;

        if let Some(entity) = self.get_mut(item) {
            entity.placement = Placement::InInventory(owner);
        }
        Ok(())
    }

    /// Moves a carried item back onto the map under its owner, unequipping it
    /// first. Returns the drop position.
    pub fn drop_item(&mut self, owner: EntityId, item: EntityId) -> Result<Position, InventoryError> {
        let position = self
            .position(owner)
            .ok_or(InventoryError::NotAnActor(owner))?;
        self.take_from_inventory(owner, item)?;

        if let Some(entity) = self.get_mut(item) {
            entity.placement = Placement::OnMap(position);
        }
        Ok(position)
    }

    /// Removes a carried item from the world entirely.
    pub fn destroy_carried(&mut self, owner: EntityId, item: EntityId) -> Result<Entity, InventoryError> {
        self.take_from_inventory(owner, item)?;
        self.remove(item).ok_or(InventoryError::UnknownEntity(item))
    }

    fn take_from_inventory(&mut self, owner: EntityId, item: EntityId) -> Result<(), InventoryError> {
        let actor = self
            .actor_mut(owner)
            .ok_or(InventoryError::NotAnActor(owner))?;
        if !actor.inventory.remove(item) {
            return Err(InventoryError::NotCarried { owner, item });
        }
        actor.equipment.unequip(item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::{Ai, Consumable, Fighter};

    fn orc() -> Blueprint {
        Blueprint::actor(
            "Orc",
            'o',
            Rgb(63, 127, 63),
            ActorState::new(Fighter::new(10, 0, 3), 0, Ai::Hostile),
        )
    }

    fn potion() -> Blueprint {
        Blueprint::item(
            "Health Potion",
            '!',
            Rgb(127, 0, 255),
            ItemState::consumable(Consumable::Healing { amount: 4 }),
        )
    }

    fn player(capacity: usize) -> Blueprint {
        Blueprint::actor(
            "Player",
            '@',
            Rgb::WHITE,
            ActorState::new(Fighter::new(30, 2, 5), capacity, Ai::Player),
        )
    }

    #[test]
    fn spawn_allocates_sequential_ids() {
        let mut entities = EntitiesState::new();
        let a = entities.spawn(orc(), Position::new(1, 1));
        let b = entities.spawn(orc(), Position::new(2, 1));
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        entities.remove(b);
        assert_eq!(entities.spawn(orc(), Position::new(3, 1)), EntityId(2));
    }

    #[test]
    fn spatial_queries_distinguish_blockers_and_items() {
        let mut entities = EntitiesState::new();
        let here = Position::new(4, 4);
        let orc = entities.spawn(orc(), here);
        let potion = entities.spawn(potion(), here);

        assert_eq!(entities.blocking_entity_at(here).map(|e| e.id), Some(orc));
        assert_eq!(entities.actor_at(here).map(|e| e.id), Some(orc));
        let items: Vec<EntityId> = entities.items_at(here).map(|e| e.id).collect();
        assert_eq!(items, vec![potion]);
        assert!(entities.blocking_entity_at(Position::new(5, 4)).is_none());
    }

    #[test]
    fn pick_up_and_drop_transfer_ownership() {
        let mut entities = EntitiesState::new();
        let player = entities.spawn(player(26), Position::new(1, 1));
        let potion = entities.spawn(potion(), Position::new(1, 1));

        entities.pick_up(player, potion).unwrap();
        assert_eq!(
            entities.get(potion).unwrap().placement,
            Placement::InInventory(player)
        );
        assert_eq!(entities.items_at(Position::new(1, 1)).count(), 0);

        entities.set_position(player, Position::new(2, 2));
        let dropped_at = entities.drop_item(player, potion).unwrap();
        assert_eq!(dropped_at, Position::new(2, 2));
        assert!(entities.actor(player).unwrap().inventory.is_empty());
        assert_eq!(entities.position(potion), Some(Position::new(2, 2)));
    }

    #[test]
    fn failed_pick_up_changes_nothing() {
        let mut entities = EntitiesState::new();
        let player = entities.spawn(player(0), Position::new(1, 1));
        let potion = entities.spawn(potion(), Position::new(1, 1));
        let before = entities.clone();

        assert_eq!(entities.pick_up(player, potion), Err(InventoryError::Full));
        assert_eq!(entities, before);
    }

    #[test]
    fn dead_actors_are_not_returned_by_actor_at() {
        let mut entities = EntitiesState::new();
        let orc = entities.spawn(orc(), Position::new(3, 3));
        entities.actor_mut(orc).unwrap().ai = Ai::Dead;

        assert!(entities.actor_at(Position::new(3, 3)).is_none());
        assert_eq!(entities.living_actors().count(), 0);
    }
}
