//! Terminal client entry point.
//!
//! ```bash
//! # New game on the bundled tutorial with a fixed seed
//! rogue --seed 42
//!
//! # Generated rooms and tunnels instead of the tutorial
//! rogue --scenario dungeon --seed 7
//!
//! # Pick up where the last session stopped
//! rogue --resume
//!
//! # Inspect saves
//! rogue saves
//! rogue read-save --format json
//! ```
mod app;
mod cli;
mod dirs;
mod input;
mod logging;
mod render;

use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use runtime::{FileStateRepository, GridMap, SaveGame, Session, StateRepository};

use app::{App, Exit};
use cli::{Cli, OutputFormat, PlayArgs, ReadSaveArgs, SaveDirArgs, Task};
use render::TextRenderer;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.task.unwrap_or(Task::Play(cli.play)) {
        Task::Play(args) => play(args),
        Task::Saves(args) => list_saves(&args),
        Task::ReadSave(args) => read_save(&args),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let session_id = logging::new_session_id();
    let _logging = logging::setup_logging(&dirs::log_dir(), &session_id)?;

    let repository = FileStateRepository::new(args.saves.resolve())
        .context("Failed to open the save directory")?;
    tracing::info!("Save directory: {}", repository.base_dir().display());

    let session = if args.wants_saved_game() {
        let save = match args.load {
            Some(nonce) => repository.load(nonce)?,
            None => repository.latest()?,
        }
        .ok_or_else(|| anyhow!("No saved game found in {}", repository.base_dir().display()))?;
        tracing::info!("Resuming save at nonce {}", save.nonce());
        Session::restore(save)?
    } else {
        new_session(&args)?
    };

    let renderer = TextRenderer::new(args.color, args.messages);
    let mut app = App::new(session, renderer, Box::new(repository), !args.no_save);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let exit = app.run(stdin.lock(), stdout.lock())?;
    tracing::info!(?exit, clock = %app.session().clock(), "Client shutdown complete");

    if exit == Exit::EndOfInput {
        println!();
    }
    Ok(())
}

fn new_session(args: &PlayArgs) -> Result<Session> {
    let factory = args.factory();
    let config = args.game_config(&factory)?;
    let catalog = factory.load_catalog()?;
    let seed = args.seed.unwrap_or_else(fresh_seed);
    let scenario = factory.scenario(&args.scenario, seed)?;

    tracing::info!(
        scenario = %scenario.name,
        seed,
        data_dir = %factory.data_dir().display(),
        "Starting new game"
    );

    let state = scenario.build_state(&catalog, seed, &config)?;
    Ok(Session::new(state, GridMap::from_scenario(&scenario), config)?)
}

fn fresh_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn list_saves(args: &SaveDirArgs) -> Result<()> {
    let repository = FileStateRepository::new(args.resolve())?;
    let nonces = repository.list_nonces()?;

    let mut out = io::stdout().lock();
    if nonces.is_empty() {
        writeln!(out, "No saves in {}", repository.base_dir().display())?;
        return Ok(());
    }
    writeln!(out, "Saves in {}:", repository.base_dir().display())?;
    for nonce in nonces {
        writeln!(out, "  #{nonce}")?;
    }
    Ok(())
}

fn read_save(args: &ReadSaveArgs) -> Result<()> {
    let repository = FileStateRepository::new(args.saves.resolve())?;
    let save = match args.nonce {
        Some(nonce) => repository.load(nonce)?,
        None => repository.latest()?,
    }
    .ok_or_else(|| anyhow!("No matching save in {}", repository.base_dir().display()))?;

    let summary = summarize(&save);
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Summary => print_summary(&summary),
    }
    Ok(())
}

fn summarize(save: &SaveGame) -> serde_json::Value {
    let state = &save.state;
    let player = state.player_actor();
    let dimensions = game_core::MapOracle::dimensions(&save.map);

    serde_json::json!({
        "nonce": save.nonce(),
        "clock": state.clock().0,
        "seed": state.game_seed,
        "map": { "width": dimensions.width, "height": dimensions.height },
        "player": {
            "alive": state.is_player_alive(),
            "hp": player.map(|actor| actor.fighter.hp),
            "max_hp": player.map(|actor| actor.fighter.max_hp),
            "position": state.player_position().map(|p| [p.x, p.y]),
            "items": player.map_or(0, |actor| actor.inventory.items().len()),
        },
        "entities": state.entities.len(),
        "living_actors": state.entities.living_actors().count(),
        "queued_tickets": state.turn.queue.len(),
        "messages": save.messages.len(),
    })
}

fn print_summary(summary: &serde_json::Value) {
    println!("Save #{}", summary["nonce"]);
    println!("  Clock:    {}", summary["clock"]);
    println!("  Seed:     {}", summary["seed"]);
    println!(
        "  Map:      {}x{}",
        summary["map"]["width"], summary["map"]["height"]
    );
    println!(
        "  Player:   hp {}/{} at {} (alive: {}, {} items)",
        summary["player"]["hp"],
        summary["player"]["max_hp"],
        summary["player"]["position"],
        summary["player"]["alive"],
        summary["player"]["items"],
    );
    println!(
        "  Entities: {} ({} living actors)",
        summary["entities"], summary["living_actors"]
    );
    println!("  Queue:    {} tickets", summary["queued_tickets"]);
    println!("  Messages: {}", summary["messages"]);
}
