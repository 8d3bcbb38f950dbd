//! Input processing for the line-based client.
//!
//! This module owns the text-to-command mapping so the rest of the
//! application never sees raw input. Each whitespace-separated token is one
//! keystroke; tokens are interpreted under the session's current
//! [`InteractionMode`], so `a` means "first item" inside a menu.
use game_core::{CardinalDirection, Position};
use runtime::{Command, InteractionMode};

/// High-level outcome of processing one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the decoded command to the session.
    Submit(Command),
    /// Write a save of the current session.
    Save,
    Help,
    /// No meaningful command was produced.
    None,
}

/// Translates text tokens into session commands.
///
/// Movement follows the vi keys and the numeric keypad:
///
/// ```text
/// y k u     7 8 9
/// h . l     4 5 6
/// b j n     1 2 3
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_token(&self, token: &str, mode: InteractionMode) -> KeyAction {
        let token = token.trim();
        match token {
            "" => return KeyAction::None,
            "esc" | "escape" => return KeyAction::Submit(Command::Escape),
            "save" => return KeyAction::Save,
            "help" => return KeyAction::Help,
            _ => {}
        }

        match mode {
            InteractionMode::Normal => self.normal(token),
            InteractionMode::Inventory | InteractionMode::DropMenu => single_letter(token)
                .map_or(KeyAction::None, |index| {
                    KeyAction::Submit(Command::SelectIndex(index))
                }),
            InteractionMode::Targeting { .. } => parse_position(token)
                .map_or(KeyAction::None, |target| {
                    KeyAction::Submit(Command::ConfirmTarget(target))
                }),
        }
    }

    fn normal(&self, token: &str) -> KeyAction {
        let command = match token {
            "q" => Command::Escape,
            "." | "5" | "wait" => Command::Wait,
            "g" | "," => Command::Pickup,
            "i" => Command::OpenInventory,
            "d" => Command::OpenDropMenu,
            "?" => return KeyAction::Help,
            _ => {
                if let Some(direction) = direction(token) {
                    Command::Move(direction)
                } else if let Some(index) = token.strip_prefix('d').and_then(single_letter) {
                    Command::DropIndex(index)
                } else {
                    return KeyAction::None;
                }
            }
        };
        KeyAction::Submit(command)
    }
}

fn direction(token: &str) -> Option<CardinalDirection> {
    use CardinalDirection::*;

    Some(match token {
        "k" | "8" => North,
        "j" | "2" => South,
        "l" | "6" => East,
        "h" | "4" => West,
        "u" | "9" => NorthEast,
        "y" | "7" => NorthWest,
        "n" | "3" => SouthEast,
        "b" | "1" => SouthWest,
        _ => return None,
    })
}

/// `a` is 0, `z` is 25.
fn single_letter(token: &str) -> Option<usize> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter @ 'a'..='z'), None) => Some(letter as usize - 'a' as usize),
        _ => None,
    }
}

/// `x,y` in map coordinates.
fn parse_position(token: &str) -> Option<Position> {
    let (x, y) = token.split_once(',')?;
    Some(Position::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

pub const HELP: &str = "\
Move: h j k l y u b n (or 1-9 on the keypad), wait: . or 5
Pick up: g   Inventory: i   Drop menu: d   Drop item directly: d<letter>
In menus pick an item by letter. When aiming, type x,y
esc leaves a menu, q quits, save writes a save, help shows this";

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::EntityId;

    fn normal(token: &str) -> KeyAction {
        InputHandler::new().handle_token(token, InteractionMode::Normal)
    }

    #[test]
    fn maps_movement_keys() {
        assert_eq!(
            normal("h"),
            KeyAction::Submit(Command::Move(CardinalDirection::West))
        );
        assert_eq!(
            normal("9"),
            KeyAction::Submit(Command::Move(CardinalDirection::NorthEast))
        );
        assert_eq!(
            normal(" n "),
            KeyAction::Submit(Command::Move(CardinalDirection::SouthEast))
        );
    }

    #[test]
    fn maps_actions_and_quit() {
        assert_eq!(normal("."), KeyAction::Submit(Command::Wait));
        assert_eq!(normal("g"), KeyAction::Submit(Command::Pickup));
        assert_eq!(normal("i"), KeyAction::Submit(Command::OpenInventory));
        assert_eq!(normal("d"), KeyAction::Submit(Command::OpenDropMenu));
        assert_eq!(normal("dc"), KeyAction::Submit(Command::DropIndex(2)));
        assert_eq!(normal("q"), KeyAction::Submit(Command::Escape));
        assert_eq!(normal("save"), KeyAction::Save);
        assert_eq!(normal("?"), KeyAction::Help);
    }

    #[test]
    fn menus_select_by_letter() {
        let handler = InputHandler::new();
        for mode in [InteractionMode::Inventory, InteractionMode::DropMenu] {
            assert_eq!(
                handler.handle_token("a", mode),
                KeyAction::Submit(Command::SelectIndex(0))
            );
            assert_eq!(
                handler.handle_token("q", mode),
                KeyAction::Submit(Command::SelectIndex(16))
            );
            assert_eq!(
                handler.handle_token("esc", mode),
                KeyAction::Submit(Command::Escape)
            );
            assert_eq!(handler.handle_token("ab", mode), KeyAction::None);
        }
    }

    #[test]
    fn targeting_reads_coordinates() {
        let handler = InputHandler::new();
        let mode = InteractionMode::Targeting { item: EntityId(4) };

        assert_eq!(
            handler.handle_token("12,-3", mode),
            KeyAction::Submit(Command::ConfirmTarget(Position::new(12, -3)))
        );
        assert_eq!(handler.handle_token("12", mode), KeyAction::None);
        assert_eq!(handler.handle_token("h", mode), KeyAction::None);
    }

    #[test]
    fn ignores_unknown_tokens() {
        assert_eq!(normal("x"), KeyAction::None);
        assert_eq!(normal("dA"), KeyAction::None);
        assert_eq!(normal(""), KeyAction::None);
    }
}
