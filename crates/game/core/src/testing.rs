//! Fixtures shared by unit tests: a walled test map and simple oracles.

use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::env::{
    Env, FovOracle, GameEnv, MapDimensions, MapOracle, PathOracle, PcgRng, StaticTile,
    TerrainKind,
};
use crate::state::{
    ActorState, Ai, Blueprint, Consumable, EntitiesState, EntityId, EquipSlot, Equippable,
    Fighter, GameState, ItemState, Position, Rgb,
};
use crate::action::CardinalDirection;

/// Open room with a one-tile wall border; extra walls may be added.
pub struct TestMap {
    dimensions: MapDimensions,
    walls: BTreeSet<Position>,
}

impl TestMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            walls: BTreeSet::new(),
        }
    }

    pub fn with_wall(mut self, position: Position) -> Self {
        self.walls.insert(position);
        self
    }
}

impl MapOracle for TestMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let border = position.x == 0
            || position.y == 0
            || position.x == self.dimensions.width as i32 - 1
            || position.y == self.dimensions.height as i32 - 1;
        let terrain = if border || self.walls.contains(&position) {
            TerrainKind::Wall
        } else {
            TerrainKind::Floor
        };
        Some(StaticTile::new(terrain))
    }
}

/// Sees every in-bounds tile within the radius, ignoring walls.
pub struct RadiusFov;

impl FovOracle for RadiusFov {
    fn compute(&self, map: &dyn MapOracle, origin: Position, radius: u32) -> BTreeSet<Position> {
        let r = radius as i32;
        (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| origin.offset(dx, dy)))
            .filter(|p| map.in_bounds(*p) && origin.distance(*p) <= f64::from(radius))
            .collect()
    }
}

/// Steps straight toward the goal, if that tile is walkable.
pub struct StraightPath;

impl PathOracle for StraightPath {
    fn first_step_toward(
        &self,
        map: &dyn MapOracle,
        _entities: &EntitiesState,
        from: Position,
        to: Position,
    ) -> Option<Position> {
        let step = CardinalDirection::toward(from, to)?.step(from);
        map.is_walkable(step).then_some(step)
    }
}

pub struct Oracles {
    pub map: TestMap,
    pub fov: RadiusFov,
    pub path: StraightPath,
    pub rng: PcgRng,
}

impl Oracles {
    pub fn new(map: TestMap) -> Self {
        Self {
            map,
            fov: RadiusFov,
            path: StraightPath,
            rng: PcgRng,
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(&self.map, &self.fov, &self.path, &self.rng).into_game_env()
    }

    /// Recomputes the player's view the way the runtime does.
    pub fn refresh_fov(&self, state: &mut GameState, config: &GameConfig) {
        if let Some(origin) = state.player_position() {
            let visible = self.fov.compute(&self.map, origin, config.fov_radius);
            state.world.update_visibility(visible);
        }
    }
}

pub fn player_blueprint() -> Blueprint {
    Blueprint::actor(
        "Player",
        '@',
        Rgb::WHITE,
        ActorState::new(Fighter::new(30, 2, 5), 26, Ai::Player),
    )
}

pub fn orc_blueprint() -> Blueprint {
    Blueprint::actor(
        "Orc",
        'o',
        Rgb(63, 127, 63),
        ActorState::new(Fighter::new(10, 0, 3), 0, Ai::Hostile),
    )
}

pub fn consumable_blueprint(name: &str, consumable: Consumable) -> Blueprint {
    Blueprint::item(name, '!', Rgb(127, 0, 255), ItemState::consumable(consumable))
}

pub fn equippable_blueprint(name: &str, slot: EquipSlot, power: i32, defense: i32) -> Blueprint {
    Blueprint::item(
        name,
        '/',
        Rgb(0, 191, 255),
        ItemState::equippable(Equippable {
            slot,
            power_bonus: power,
            defense_bonus: defense,
        }),
    )
}

/// A state with only the player spawned at `position`, made current.
pub fn state_with_player(position: Position) -> GameState {
    let mut entities = EntitiesState::new();
    let player = entities.spawn(player_blueprint(), position);
    let mut state = GameState::new(0xC0FFEE, entities, player);
    state.turn.current_actor = Some(player);
    state
}

/// Puts an item straight into an actor's inventory.
pub fn give(state: &mut GameState, owner: EntityId, blueprint: Blueprint) -> EntityId {
    let position = state.entities.position(owner).expect("owner on map");
    let item = state.entities.spawn(blueprint, position);
    state.entities.pick_up(owner, item).expect("room in inventory");
    item
}
