//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use game_content::{EntityCatalog, Scenario, ScenarioLoader};
use game_core::{EntityId, GameConfig, Position};
use runtime::{GridMap, Session};

pub const SEED: u64 = 0xC0FFEE;

/// Parses an inline scenario. `legend` is the body of a RON map literal.
pub fn scenario(legend: &str, rows: &[&str]) -> Scenario {
    let rows = rows
        .iter()
        .map(|row| format!("{row:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    ScenarioLoader::parse(&format!(
        "(name: \"test\", legend: {{ {legend} }}, rows: [{rows}])"
    ))
    .unwrap()
}

pub fn start(scenario: &Scenario, catalog: &EntityCatalog, config: GameConfig) -> Session {
    let state = scenario.build_state(catalog, SEED, &config).unwrap();
    Session::new(state, GridMap::from_scenario(scenario), config).unwrap()
}

/// The first living non-player actor, by id.
pub fn first_monster(session: &Session) -> EntityId {
    let player = session.state().player;
    session
        .state()
        .entities
        .living_actors()
        .map(|entity| entity.id)
        .find(|id| *id != player)
        .unwrap()
}

pub fn hp(session: &Session, entity: EntityId) -> i32 {
    session.state().entities.actor(entity).unwrap().fighter.hp
}

pub fn position(session: &Session, entity: EntityId) -> Position {
    session.state().entities.position(entity).unwrap()
}

pub fn has_message(session: &Session, text: &str) -> bool {
    session.messages().iter().any(|message| message.text == text)
}

pub fn last_message(session: &Session) -> Option<String> {
    session.messages().last().map(|message| message.text.clone())
}
