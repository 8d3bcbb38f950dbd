//! Resolution loop scenarios: combat, rejected actions, scheduling and game over.
mod common;

use common::*;
use game_content::{ContentFactory, EntityCatalog};
use game_core::{
    Ai, CardinalDirection, GameConfig, Position, RejectedMovePolicy, RenderOrder, Tick,
};
use runtime::{Command, GameEvent, Submission};

const EAST: Command = Command::Move(CardinalDirection::East);
const WEST: Command = Command::Move(CardinalDirection::West);

fn duel_rows() -> Vec<&'static str> {
    vec![
        "############",
        "#..........#",
        "#..........#",
        "#..........#",
        "#..........#",
        "#....@o....#",
        "#..........#",
        "#..........#",
        "#..........#",
        "#..........#",
        "############",
    ]
}

/// Player (power 5) trades blows with an orc (hp 10, defense 2).
///
/// Each player hit deals 3; the orc answers for 1 against defense 2. The
/// fourth hit drives the orc below zero and the death pass turns it into a
/// corpse that no longer blocks or takes turns.
#[test]
fn melee_until_death() {
    let mut catalog = EntityCatalog::builtin();
    catalog.actors.get_mut("orc").unwrap().fighter.defense = 2;
    let scenario = scenario("'o': \"orc\"", &duel_rows());
    let mut session = start(&scenario, &catalog, GameConfig::default());

    let player = session.state().player;
    let orc = first_monster(&session);
    assert_eq!(position(&session, player), Position::new(5, 5));
    assert_eq!(position(&session, orc), Position::new(6, 5));

    // ------------------------------------------------------------------
    // Three exchanges: orc 10 -> 7 -> 4 -> 1, player 30 -> 29 -> 28 -> 27
    // ------------------------------------------------------------------
    for (round, (orc_hp, player_hp)) in [(7, 29), (4, 28), (1, 27)].into_iter().enumerate() {
        assert_eq!(session.submit(EAST).unwrap(), Submission::TurnTaken);
        assert_eq!(hp(&session, orc), orc_hp);
        assert_eq!(hp(&session, player), player_hp);
        assert_eq!(session.clock(), Tick(100 * (round as u64 + 1)));
        assert_eq!(session.state().turn.current_actor, Some(player));
    }
    assert!(has_message(&session, "Player attacks Orc for 3 hit points."));
    assert!(has_message(&session, "Orc attacks Player for 1 hit points."));

    // ------------------------------------------------------------------
    // Fourth hit: orc at -2 is dead after the resolution pass
    // ------------------------------------------------------------------
    assert_eq!(session.submit(EAST).unwrap(), Submission::TurnTaken);
    assert_eq!(hp(&session, orc), -2);
    assert_eq!(hp(&session, player), 27);
    assert!(has_message(&session, "Orc is dead!"));

    let corpse = session.state().entities.get(orc).unwrap();
    assert_eq!(corpse.name, "remains of Orc");
    assert!(!corpse.blocks_movement);
    assert_eq!(corpse.render_order, RenderOrder::Corpse);
    assert_eq!(session.state().entities.actor(orc).unwrap().ai, Ai::Dead);
    assert!(
        session
            .state()
            .entities
            .living_actors()
            .all(|entity| entity.id != orc)
    );
    assert!(
        session
            .state()
            .turn
            .queue
            .tickets()
            .iter()
            .all(|ticket| ticket.payload != orc)
    );

    // Corpses don't block.
    assert_eq!(session.submit(EAST).unwrap(), Submission::TurnTaken);
    assert_eq!(position(&session, player), Position::new(6, 5));
    assert!(
        session
            .events()
            .iter()
            .all(|event| !matches!(event, GameEvent::TurnStarted { actor, .. } if *actor == orc))
    );
}

/// Walking off the map is refused without touching the clock.
#[test]
fn out_of_bounds_move_is_free_by_default() {
    let scenario = scenario("", &["@..", "..."]);
    let mut session = start(&scenario, &EntityCatalog::builtin(), GameConfig::default());
    let player = session.state().player;

    assert_eq!(session.submit(WEST).unwrap(), Submission::Rejected);
    assert_eq!(session.clock(), Tick::ZERO);
    assert_eq!(session.state().turn.nonce, 0);
    assert_eq!(session.state().turn.current_actor, Some(player));
    assert_eq!(last_message(&session).as_deref(), Some("That way is blocked."));

    assert_eq!(session.submit(EAST).unwrap(), Submission::TurnTaken);
    assert_eq!(session.clock(), Tick(100));
}

#[test]
fn rejected_move_can_be_configured_to_spend_the_turn() {
    let scenario = scenario("", &["@..", "..."]);
    let config = GameConfig::default().with_rejected_move(RejectedMovePolicy::Spend);
    let mut session = start(&scenario, &EntityCatalog::builtin(), config);
    let player = session.state().player;

    assert_eq!(session.submit(WEST).unwrap(), Submission::Rejected);
    assert_eq!(session.clock(), Tick(100));
    assert_eq!(position(&session, player), Position::new(0, 0));
    assert_eq!(session.state().turn.current_actor, Some(player));

    // Only movement is affected by the policy.
    assert_eq!(session.submit(Command::Pickup).unwrap(), Submission::Rejected);
    assert_eq!(session.clock(), Tick(100));
}

/// Costs near the top of the tick range saturate instead of overflowing.
#[test]
fn enormous_turn_costs_do_not_overflow() {
    let scenario = scenario("", &["@.."]);
    let config = GameConfig {
        turn_cost: u64::MAX,
        ..GameConfig::default()
    };
    let mut session = start(&scenario, &EntityCatalog::builtin(), config);

    assert_eq!(session.submit(Command::Wait).unwrap(), Submission::TurnTaken);
    assert_eq!(session.clock(), Tick(u64::MAX / 100));
    assert_eq!(session.submit(Command::Wait).unwrap(), Submission::TurnTaken);
    assert_eq!(session.clock(), Tick(u64::MAX / 100 * 2));
}

#[test]
fn pickup_into_full_inventory_changes_nothing() {
    let mut catalog = EntityCatalog::builtin();
    catalog.actors.get_mut("player").unwrap().inventory_capacity = Some(1);
    let scenario = scenario("'!': \"health_potion\"", &["@!!"]);
    let mut session = start(&scenario, &catalog, GameConfig::default());

    session.submit(EAST).unwrap();
    assert_eq!(session.submit(Command::Pickup).unwrap(), Submission::TurnTaken);
    assert_eq!(session.inventory().len(), 1);

    session.submit(EAST).unwrap();
    let before = session.state().clone();
    assert_eq!(session.submit(Command::Pickup).unwrap(), Submission::Rejected);
    assert_eq!(session.state(), &before);
    assert_eq!(
        last_message(&session).as_deref(),
        Some("Your inventory is full.")
    );
    assert!(
        session
            .state()
            .entities
            .items_at(Position::new(2, 0))
            .next()
            .is_some()
    );
}

#[test]
fn nothing_to_pick_up_is_rejected() {
    let scenario = scenario("", &["@.."]);
    let mut session = start(&scenario, &EntityCatalog::builtin(), GameConfig::default());

    assert_eq!(session.submit(Command::Pickup).unwrap(), Submission::Rejected);
    assert_eq!(
        last_message(&session).as_deref(),
        Some("There is nothing here to pick up.")
    );
}

#[test]
fn player_death_ends_the_game() {
    let mut catalog = EntityCatalog::builtin();
    catalog.actors.get_mut("player").unwrap().fighter.hp = 1;
    catalog.actors.get_mut("orc").unwrap().fighter.power = 10;
    let scenario = scenario("'o': \"orc\"", &["@o."]);
    let mut session = start(&scenario, &catalog, GameConfig::default());
    let player = session.state().player;

    assert_eq!(session.submit(Command::Wait).unwrap(), Submission::GameOver);
    assert!(session.is_game_over());
    assert!(has_message(&session, "You died!"));
    assert!(
        session
            .events()
            .iter()
            .any(|event| matches!(event, GameEvent::GameOver))
    );

    let corpse = session.state().entities.get(player).unwrap();
    assert_eq!(corpse.name, "Player");
    assert_eq!(corpse.glyph, '%');

    let clock = session.clock();
    assert_eq!(session.submit(EAST).unwrap(), Submission::GameOver);
    assert_eq!(session.submit(Command::Wait).unwrap(), Submission::GameOver);
    assert_eq!(session.clock(), clock);
    assert_eq!(session.submit(Command::Escape).unwrap(), Submission::Quit);
}

/// A monster whose only route is through another monster loses its turn
/// quietly and is still rescheduled.
#[test]
fn impossible_ai_actions_are_swallowed() {
    let scenario = scenario("'o': \"orc\"", &["@oo"]);
    let mut session = start(&scenario, &EntityCatalog::builtin(), GameConfig::default());
    let back = session
        .state()
        .entities
        .actor_at(Position::new(2, 0))
        .unwrap()
        .id;

    assert_eq!(session.submit(Command::Wait).unwrap(), Submission::TurnTaken);
    assert!(session.events().iter().any(
        |event| matches!(event, GameEvent::ActionRejected { actor, .. } if *actor == back)
    ));
    assert!(!has_message(&session, "That way is blocked."));
    assert_eq!(position(&session, back), Position::new(2, 0));
    assert!(
        session
            .state()
            .turn
            .queue
            .tickets()
            .iter()
            .any(|ticket| ticket.payload == back && ticket.time == Tick(100))
    );
}

/// A double-speed monster gets two turns for each of the player's.
#[test]
fn faster_actors_act_more_often() {
    let mut catalog = EntityCatalog::builtin();
    catalog.actors.get_mut("orc").unwrap().speed = 200;
    // The wall keeps the orc out of sight, so it only ever waits.
    let scenario = scenario("'o': \"orc\"", &["@#o"]);
    let mut session = start(&scenario, &catalog, GameConfig::default());
    let orc = first_monster(&session);

    for _ in 0..3 {
        assert_eq!(session.submit(Command::Wait).unwrap(), Submission::TurnTaken);
        let orc_turns = session
            .events()
            .iter()
            .filter(|event| matches!(event, GameEvent::TurnStarted { actor, .. } if *actor == orc))
            .count();
        assert_eq!(orc_turns, 2);
    }
    assert_eq!(session.clock(), Tick(300));
}

/// Same seed and same inputs give the same world, down to the last byte.
#[test]
fn replay_is_deterministic() {
    let rows = [
        "##########",
        "#@?.....o#",
        "#........#",
        "##########",
    ];
    let scenario = scenario("'o': \"orc\", '?': \"confusion_scroll\"", &rows);

    let play = || {
        let mut session = start(&scenario, &EntityCatalog::builtin(), GameConfig::default());
        session.submit(EAST).unwrap();
        session.submit(Command::Pickup).unwrap();
        session.submit(Command::OpenInventory).unwrap();
        session.submit(Command::SelectIndex(0)).unwrap();

        let orc = first_monster(&session);
        let target = position(&session, orc);
        assert_eq!(
            session.submit(Command::ConfirmTarget(target)).unwrap(),
            Submission::TurnTaken
        );
        assert!(matches!(
            session.state().entities.actor(orc).unwrap().ai,
            Ai::Confused { .. }
        ));

        for _ in 0..12 {
            session.submit(Command::Wait).unwrap();
        }
        session
    };

    let first = play();
    let second = play();
    assert_eq!(
        hex::encode(first.state().digest().unwrap()),
        hex::encode(second.state().digest().unwrap())
    );
    assert_eq!(first.messages(), second.messages());
    assert!(has_message(&first, "The Orc is no longer confused."));
}

/// The seed drives level generation as well as every in-game roll.
#[test]
fn generated_dungeons_replay_from_the_seed() {
    let factory = ContentFactory::bundled();
    let play = |seed: u64| {
        let scenario = factory.scenario("dungeon", seed).unwrap();
        let mut session = start(&scenario, &EntityCatalog::builtin(), GameConfig::default());
        for command in [EAST, WEST, Command::Wait, Command::Wait, EAST, Command::Pickup] {
            session.submit(command).unwrap();
        }
        session
    };

    let first = play(5150);
    let second = play(5150);
    assert_eq!(first.map(), second.map());
    assert_eq!(
        hex::encode(first.state().digest().unwrap()),
        hex::encode(second.state().digest().unwrap())
    );
    assert_eq!(first.messages(), second.messages());
}
