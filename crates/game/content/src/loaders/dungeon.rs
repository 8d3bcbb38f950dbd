//! Seeded room-and-tunnel dungeon generator.
//!
//! Rooms are dropped at random and kept when they do not overlap an earlier
//! room. Each kept room is joined to the previous one by an L-shaped tunnel
//! and stocked with a few monsters and items. The output is an ordinary
//! [`Scenario`], so generated and hand-drawn levels build state the same way.
//!
//! Every roll comes from [`compute_seed`] keyed by the game seed and a draw
//! counter, so one seed always yields one layout.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::env::rng_context;
use game_core::{MapDimensions, PcgRng, Position, RngOracle, StaticTile, TerrainKind, compute_seed};

use super::{LoadResult, Scenario, read_file};

/// Generation knobs. Loaded from TOML; omitted keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct DungeonParams {
    pub width: u32,
    pub height: u32,
    /// Placement attempts; overlapping rooms are discarded.
    pub max_rooms: u32,
    pub room_min_size: u32,
    pub room_max_size: u32,
    pub max_monsters_per_room: u32,
    pub max_items_per_room: u32,
    /// Catalog id to relative weight.
    pub monsters: BTreeMap<String, u32>,
    pub items: BTreeMap<String, u32>,
}

impl Default for DungeonParams {
    fn default() -> Self {
        let weights = |pairs: &[(&str, u32)]| {
            pairs
                .iter()
                .map(|(id, weight)| (id.to_string(), *weight))
                .collect()
        };
        Self {
            width: 80,
            height: 45,
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            max_monsters_per_room: 2,
            max_items_per_room: 2,
            monsters: weights(&[("orc", 80), ("troll", 20)]),
            items: weights(&[
                ("health_potion", 70),
                ("lightning_scroll", 10),
                ("confusion_scroll", 10),
                ("fireball_scroll", 10),
            ]),
        }
    }
}

impl DungeonParams {
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Self> {
        let params: Self = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dungeon TOML: {}", e))?;
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> LoadResult<()> {
        anyhow::ensure!(
            self.room_min_size >= 3 && self.room_min_size <= self.room_max_size,
            "room sizes must satisfy 3 <= room_min_size <= room_max_size, got {}..{}",
            self.room_min_size,
            self.room_max_size
        );
        anyhow::ensure!(
            self.room_max_size < self.width && self.room_max_size < self.height,
            "a {}-tile room does not fit a {}x{} map",
            self.room_max_size,
            self.width,
            self.height
        );
        anyhow::ensure!(self.max_rooms > 0, "max_rooms must be at least 1");
        Ok(())
    }
}

/// Axis-aligned room. The outer ring stays wall; `x1 + 1..x2` is dug out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Room {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Room {
    fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Touching rooms count as overlapping so walls are never shared.
    fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    fn inner(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y1 + 1..self.y2)
            .flat_map(move |y| (self.x1 + 1..self.x2).map(move |x| Position::new(x, y)))
    }
}

/// Builds one level from a seed.
pub struct DungeonGenerator<'a> {
    params: &'a DungeonParams,
    seed: u64,
    draws: u64,
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
}

impl<'a> DungeonGenerator<'a> {
    pub const SCENARIO_NAME: &'static str = "dungeon";

    pub fn new(params: &'a DungeonParams, seed: u64) -> Self {
        let dimensions = MapDimensions::new(params.width, params.height);
        Self {
            params,
            seed,
            draws: 0,
            dimensions,
            tiles: vec![
                StaticTile::new(TerrainKind::Wall);
                params.width as usize * params.height as usize
            ],
        }
    }

    pub fn generate(mut self) -> LoadResult<Scenario> {
        self.params.validate()?;

        let params = self.params;
        let mut rooms: Vec<Room> = Vec::new();
        let mut placements = Vec::new();

        for _ in 0..params.max_rooms {
            let width = self.roll(params.room_min_size, params.room_max_size);
            let height = self.roll(params.room_min_size, params.room_max_size);
            let x = self.roll(0, params.width - width - 1);
            let y = self.roll(0, params.height - height - 1);
            let room = Room::new(x as i32, y as i32, width as i32, height as i32);

            if rooms.iter().any(|other| room.intersects(other)) {
                continue;
            }
            self.carve(room.inner());

            if let Some(previous) = rooms.last() {
                let tunnel = self.tunnel(previous.center(), room.center());
                self.carve(tunnel.into_iter());
            }

            let spawn = rooms.first().unwrap_or(&room).center();
            self.stock(&room, spawn, &mut placements);
            rooms.push(room);
        }

        let first = rooms
            .first()
            .ok_or_else(|| anyhow::anyhow!("Dungeon generation placed no rooms"))?;

        Ok(Scenario {
            name: Self::SCENARIO_NAME.to_owned(),
            dimensions: self.dimensions,
            tiles: self.tiles,
            player_spawn: first.center(),
            placements,
        })
    }

    /// Inclusive roll in `[min, max]`.
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        let seed = compute_seed(self.seed, self.draws, 0, rng_context::DUNGEON_LAYOUT);
        self.draws += 1;
        PcgRng.range(seed, min, max)
    }

    fn carve(&mut self, positions: impl Iterator<Item = Position>) {
        for position in positions {
            if let Some(index) = self.dimensions.index(position) {
                self.tiles[index] = StaticTile::new(TerrainKind::Floor);
            }
        }
    }

    /// L-shaped corridor; a coin flip picks which leg comes first.
    fn tunnel(&mut self, from: Position, to: Position) -> Vec<Position> {
        let corner = if self.roll(0, 1) == 1 {
            Position::new(to.x, from.y)
        } else {
            Position::new(from.x, to.y)
        };
        let mut path = straight(from, corner);
        path.extend(straight(corner, to));
        path
    }

    /// Places monsters, then items, on free floor inside `room`.
    fn stock(&mut self, room: &Room, spawn: Position, placements: &mut Vec<(Position, String)>) {
        let params = self.params;
        let monster_count = self.roll(0, params.max_monsters_per_room);
        let item_count = self.roll(0, params.max_items_per_room);

        let mut chosen = Vec::new();
        for _ in 0..monster_count {
            chosen.extend(self.pick(&params.monsters));
        }
        for _ in 0..item_count {
            chosen.extend(self.pick(&params.items));
        }

        for id in chosen {
            let x = self.roll((room.x1 + 1) as u32, (room.x2 - 1) as u32);
            let y = self.roll((room.y1 + 1) as u32, (room.y2 - 1) as u32);
            let position = Position::new(x as i32, y as i32);

            let taken = position == spawn || placements.iter().any(|(at, _)| *at == position);
            if !taken {
                placements.push((position, id));
            }
        }
    }

    fn pick(&mut self, weights: &BTreeMap<String, u32>) -> Option<String> {
        let total: u32 = weights.values().sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.roll(0, total - 1);
        for (id, weight) in weights {
            if roll < *weight {
                return Some(id.clone());
            }
            roll -= weight;
        }
        None
    }
}

/// Horizontal or vertical run from `from` to `to`, both ends included.
fn straight(from: Position, to: Position) -> Vec<Position> {
    let (dx, dy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let steps = (to.x - from.x).abs().max((to.y - from.y).abs());
    (0..=steps)
        .map(|step| Position::new(from.x + dx * step, from.y + dy * step))
        .collect()
}
