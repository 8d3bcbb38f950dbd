/// Behavior slot of an actor.
///
/// `Player` actors are driven by external commands; the other variants choose
/// their own actions. `Dead` is terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ai {
    Player,
    Hostile,
    Confused {
        previous: Box<Ai>,
        turns_remaining: u32,
    },
    Dead,
}

impl Ai {
    pub fn is_dead(&self) -> bool {
        matches!(self, Ai::Dead)
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Ai::Player)
    }

    /// Wraps the current behavior in a confusion that lasts `turns` turns.
    ///
    /// Re-confusing keeps the original behavior underneath rather than
    /// nesting confusions.
    pub fn confused(self, turns: u32) -> Ai {
        let previous = match self {
            Ai::Confused { previous, .. } => previous,
            other => Box::new(other),
        };
        Ai::Confused {
            previous,
            turns_remaining: turns,
        }
    }
}
