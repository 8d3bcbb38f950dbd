//! Interactive loop: render, read a line, feed its tokens to the session.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use runtime::{Session, StateRepository, Submission};
use tracing::{debug, info};

use crate::input::{HELP, InputHandler, KeyAction};
use crate::render::TextRenderer;

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
}

pub struct App {
    session: Session,
    input: InputHandler,
    renderer: TextRenderer,
    repository: Box<dyn StateRepository>,
    save_on_quit: bool,
}

impl App {
    pub fn new(
        session: Session,
        renderer: TextRenderer,
        repository: Box<dyn StateRepository>,
        save_on_quit: bool,
    ) -> Self {
        Self {
            session,
            input: InputHandler::new(),
            renderer,
            repository,
            save_on_quit,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self, mut reader: impl BufRead, mut writer: impl Write) -> Result<Exit> {
        let mut line = String::new();
        loop {
            write!(writer, "{}> ", self.renderer.render(&self.session))?;
            writer.flush()?;

            line.clear();
            if reader.read_line(&mut line)? == 0 {
                info!("input closed");
                return Ok(Exit::EndOfInput);
            }

            for token in line.split_whitespace() {
                if self.handle(token, &mut writer)? == Some(Exit::Quit) {
                    return Ok(Exit::Quit);
                }
            }
        }
    }

    fn handle(&mut self, token: &str, writer: &mut impl Write) -> Result<Option<Exit>> {
        match self.input.handle_token(token, self.session.mode()) {
            KeyAction::Submit(command) => {
                let submission = self.session.submit(command)?;
                debug!(?command, ?submission, "command submitted");
                if submission == Submission::Quit {
                    if self.save_on_quit && !self.session.is_game_over() {
                        self.save(writer)?;
                    }
                    return Ok(Some(Exit::Quit));
                }
            }
            KeyAction::Save => self.save(writer)?,
            KeyAction::Help => writeln!(writer, "{HELP}")?,
            KeyAction::None => writeln!(writer, "Unknown input '{token}', type help.")?,
        }
        Ok(None)
    }

    fn save(&self, writer: &mut impl Write) -> Result<()> {
        let save = self.session.snapshot();
        let nonce = save.nonce();
        self.repository
            .save(nonce, &save)
            .with_context(|| format!("Failed to save game at nonce {nonce}"))?;
        info!(nonce, "game saved");
        writeln!(writer, "Game saved (#{nonce}).")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use super::*;
    use game_content::{EntityCatalog, ScenarioLoader};
    use game_core::{GameConfig, Position};
    use runtime::{GridMap, InMemoryStateRepo, SaveGame};

    /// Lets the test keep a handle on the repository the app writes to.
    struct Shared(Arc<InMemoryStateRepo>);

    impl StateRepository for Shared {
        fn save(&self, nonce: u64, save: &SaveGame) -> runtime::repository::Result<()> {
            self.0.save(nonce, save)
        }
        fn load(&self, nonce: u64) -> runtime::repository::Result<Option<SaveGame>> {
            self.0.load(nonce)
        }
        fn exists(&self, nonce: u64) -> bool {
            self.0.exists(nonce)
        }
        fn delete(&self, nonce: u64) -> runtime::repository::Result<()> {
            self.0.delete(nonce)
        }
        fn list_nonces(&self) -> runtime::repository::Result<Vec<u64>> {
            self.0.list_nonces()
        }
    }

    fn app(save_on_quit: bool) -> (App, Arc<InMemoryStateRepo>) {
        let scenario = ScenarioLoader::parse(
            "(name: \"app\", legend: { '!': \"health_potion\" }, rows: [\"@!..\", \"....\"])",
        )
        .unwrap();
        let config = GameConfig::default();
        let state = scenario
            .build_state(&EntityCatalog::builtin(), 3, &config)
            .unwrap();
        let session = Session::new(state, GridMap::from_scenario(&scenario), config).unwrap();

        let repo = Arc::new(InMemoryStateRepo::new());
        let app = App::new(
            session,
            TextRenderer::new(false, 3),
            Box::new(Shared(repo.clone())),
            save_on_quit,
        );
        (app, repo)
    }

    fn run(app: &mut App, input: &str) -> (Exit, String) {
        let mut output = Vec::new();
        let exit = app.run(Cursor::new(input), &mut output).unwrap();
        (exit, String::from_utf8(output).unwrap())
    }

    #[test]
    fn tokens_on_one_line_are_played_in_order() {
        let (mut app, _) = app(false);
        let (exit, output) = run(&mut app, "l g\ni a\n");

        assert_eq!(exit, Exit::EndOfInput);
        assert_eq!(
            app.session().state().player_position(),
            Some(Position::new(1, 0))
        );
        assert!(output.contains("You picked up the Health Potion!"));
        assert!(output.contains("Your health is already full."));
    }

    #[test]
    fn quitting_saves_unless_disabled() {
        let (mut app, repo) = app(true);
        let (exit, output) = run(&mut app, "l\nq\nl\n");

        assert_eq!(exit, Exit::Quit);
        assert!(output.contains("Game saved"));
        let save = repo.latest().unwrap().unwrap();
        assert_eq!(save.state.player_position(), Some(Position::new(1, 0)));

        let (mut app, repo) = self::app(false);
        assert_eq!(run(&mut app, "q\n").0, Exit::Quit);
        assert!(repo.list_nonces().unwrap().is_empty());
    }

    #[test]
    fn save_and_help_are_client_commands() {
        let (mut app, repo) = app(false);
        let (_, output) = run(&mut app, "save help zz\n");

        assert_eq!(repo.list_nonces().unwrap(), vec![0]);
        assert!(output.contains(HELP));
        assert!(output.contains("Unknown input 'zz'"));
    }
}
