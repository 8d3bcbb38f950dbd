//! Command line arguments.
//!
//! Every play option can also come from the environment (or a `.env` file);
//! flags win over variables.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use game_content::{ConfigLoader, ContentFactory};
use game_core::GameConfig;

use crate::dirs;

/// Turn-based dungeon crawler for the terminal
#[derive(Debug, Parser)]
#[command(name = "rogue", version, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub task: Option<Task>,

    #[command(flatten)]
    pub play: PlayArgs,
}

#[derive(Debug, Subcommand)]
pub enum Task {
    /// Start a new game or resume a saved one (the default)
    Play(PlayArgs),

    /// List saved games
    Saves(SaveDirArgs),

    /// Inspect a saved game
    ReadSave(ReadSaveArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PlayArgs {
    /// Seed for every random roll; a fresh one is picked when omitted
    #[arg(long, env = "ROGUE_SEED")]
    pub seed: Option<u64>,

    /// Rules configuration (TOML); defaults to `config.toml` in the data directory
    #[arg(long, env = "ROGUE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scenario to play, by name; `dungeon` generates a level from the seed
    #[arg(long, env = "ROGUE_SCENARIO", default_value = "tutorial")]
    pub scenario: String,

    /// Content directory holding the config, catalog and scenarios
    #[arg(long, env = "ROGUE_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(flatten)]
    pub saves: SaveDirArgs,

    /// Resume the most recent save
    #[arg(long, conflicts_with = "load")]
    pub resume: bool,

    /// Resume the save taken at this action nonce
    #[arg(long, value_name = "NONCE")]
    pub load: Option<u64>,

    /// Don't write a save when quitting
    #[arg(long)]
    pub no_save: bool,

    /// Colour glyphs with 24-bit ANSI escapes
    #[arg(long)]
    pub color: bool,

    /// Log lines shown under the map
    #[arg(long, default_value_t = 5)]
    pub messages: usize,
}

impl PlayArgs {
    pub fn factory(&self) -> ContentFactory {
        match &self.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        }
    }

    pub fn game_config(&self, factory: &ContentFactory) -> Result<GameConfig> {
        match &self.config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => factory.load_config(),
        }
    }

    pub fn wants_saved_game(&self) -> bool {
        self.resume || self.load.is_some()
    }
}

#[derive(Clone, Debug, Args)]
pub struct SaveDirArgs {
    /// Directory for save files (defaults to the platform data directory)
    #[arg(long, env = "ROGUE_SAVE_DIR", value_name = "DIR")]
    pub save_dir: Option<PathBuf>,
}

impl SaveDirArgs {
    pub fn resolve(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(dirs::save_dir)
    }
}

#[derive(Debug, Args)]
pub struct ReadSaveArgs {
    /// Nonce of the save to read; the latest when omitted
    #[arg(value_name = "NONCE")]
    pub nonce: Option<u64>,

    #[command(flatten)]
    pub saves: SaveDirArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Turn, clock, player and queue overview
    Summary,
    /// The same overview as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_is_the_default_task() {
        let cli = Cli::try_parse_from(["rogue", "--seed", "7", "--scenario", "arena"]).unwrap();

        assert!(cli.task.is_none());
        assert_eq!(cli.play.seed, Some(7));
        assert_eq!(cli.play.scenario, "arena");
        assert!(!cli.play.wants_saved_game());
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["rogue", "read-save", "12", "--format", "json"]).unwrap();
        match cli.task {
            Some(Task::ReadSave(args)) => {
                assert_eq!(args.nonce, Some(12));
                assert!(matches!(args.format, OutputFormat::Json));
            }
            other => panic!("unexpected task: {other:?}"),
        }

        let cli = Cli::try_parse_from(["rogue", "play", "--resume"]).unwrap();
        assert!(matches!(cli.task, Some(Task::Play(args)) if args.wants_saved_game()));
    }

    #[test]
    fn resume_and_load_conflict() {
        assert!(Cli::try_parse_from(["rogue", "--resume", "--load", "3"]).is_err());
    }

    #[test]
    fn explicit_save_dir_wins() {
        let args = SaveDirArgs {
            save_dir: Some(PathBuf::from("/tmp/saves")),
        };
        assert_eq!(args.resolve(), PathBuf::from("/tmp/saves"));
    }
}
