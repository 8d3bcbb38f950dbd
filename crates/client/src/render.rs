//! Text rendering sink.
//!
//! Draws a read-only view of a [`Session`] as plain lines: the map layer,
//! a status line, the open menu (if any) and the newest log messages.
use std::fmt::Write as _;

use game_core::{MapOracle, Position, Rgb, TerrainKind};
use runtime::{InteractionMode, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    glyph: char,
    color: Option<Rgb>,
    /// Remembered from earlier but not currently in view.
    remembered: bool,
}

impl Cell {
    const UNSEEN: Cell = Cell {
        glyph: ' ',
        color: None,
        remembered: false,
    };
}

/// Renders sessions to strings, optionally with 24-bit ANSI colour.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    ansi: bool,
    message_rows: usize,
}

impl TextRenderer {
    pub fn new(ansi: bool, message_rows: usize) -> Self {
        Self { ansi, message_rows }
    }

    pub fn render(&self, session: &Session) -> String {
        let mut out = String::new();
        for row in map_layer(session) {
            self.write_row(&mut out, &row);
        }
        out.push_str(&status_line(session));
        out.push('\n');

        if let Some(menu) = menu(session) {
            out.push_str(&menu);
        }
        for message in session.messages().recent(self.message_rows) {
            let _ = writeln!(out, "{}", message);
        }
        out
    }

    fn write_row(&self, out: &mut String, row: &[Cell]) {
        for cell in row {
            match (self.ansi, cell.color) {
                (true, Some(Rgb(r, g, b))) => {
                    let _ = write!(out, "\x1b[38;2;{r};{g};{b}m{}\x1b[0m", cell.glyph);
                }
                (true, None) if cell.remembered => {
                    let _ = write!(out, "\x1b[2m{}\x1b[0m", cell.glyph);
                }
                _ => out.push(cell.glyph),
            }
        }
        out.push('\n');
    }
}

/// Terrain for explored tiles, entities only where the player can see.
fn map_layer(session: &Session) -> Vec<Vec<Cell>> {
    let map = session.map();
    let world = &session.state().world;
    let dimensions = map.dimensions();

    let mut rows: Vec<Vec<Cell>> = (0..dimensions.height as i32)
        .map(|y| {
            (0..dimensions.width as i32)
                .map(|x| {
                    let position = Position::new(x, y);
                    let visible = world.is_visible(position);
                    if !visible && !world.is_explored(position) {
                        return Cell::UNSEEN;
                    }
                    let glyph = match map.tile(position).map(|tile| tile.terrain()) {
                        Some(TerrainKind::Floor) => '.',
                        Some(TerrainKind::Wall) | None => '#',
                    };
                    Cell {
                        glyph,
                        color: None,
                        remembered: !visible,
                    }
                })
                .collect()
        })
        .collect();

    let mut drawn: Vec<_> = session
        .state()
        .entities
        .on_map()
        .filter(|(position, _)| world.is_visible(*position))
        .collect();
    // Higher render orders draw last so they end up on top.
    drawn.sort_by_key(|(_, entity)| entity.render_order);

    for (position, entity) in drawn {
        if let Some(cell) = rows
            .get_mut(position.y as usize)
            .and_then(|row| row.get_mut(position.x as usize))
        {
            *cell = Cell {
                glyph: entity.glyph,
                color: Some(entity.color),
                remembered: false,
            };
        }
    }
    rows
}

fn status_line(session: &Session) -> String {
    let hp = session
        .state()
        .player_actor()
        .map(|actor| format!("HP: {}/{}", actor.fighter.hp.max(0), actor.fighter.max_hp))
        .unwrap_or_else(|| "HP: -".to_string());

    let position = session
        .state()
        .player_position()
        .map(|p| format!("{},{}", p.x, p.y))
        .unwrap_or_default();

    let mut line = format!("{hp}  Time: {}  At: {position}", session.clock());
    if session.is_game_over() {
        line.push_str("  GAME OVER (esc to leave)");
    }
    line
}

fn menu(session: &Session) -> Option<String> {
    let title = match session.mode() {
        InteractionMode::Normal => return None,
        InteractionMode::Targeting { .. } => return Some("Select a target (x,y):\n".into()),
        InteractionMode::Inventory => "Select an item to use",
        InteractionMode::DropMenu => "Select an item to drop",
    };

    let equipment = session
        .state()
        .player_actor()
        .map(|actor| actor.equipment)
        .unwrap_or_default();

    let mut out = format!("{title}:\n");
    let items = session.inventory();
    if items.is_empty() {
        out.push_str("  (empty)\n");
    }
    for (index, item) in items.into_iter().enumerate() {
        let letter = (b'a' + index as u8) as char;
        let marker = if equipment.is_equipped(item.id) {
            " (E)"
        } else {
            ""
        };
        let _ = writeln!(out, "  ({letter}) {}{marker}", item.name);
    }
    Some(out)
}
