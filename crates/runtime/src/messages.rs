//! Bounded, levelled message log.
use std::collections::VecDeque;
use std::fmt;

/// Category of a log line; renderers map these to colours.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum MessageLevel {
    Welcome,
    PlayerAttack,
    EnemyAttack,
    PlayerDeath,
    EnemyDeath,
    /// A rejected action; the turn was not spent.
    Impossible,
    /// Input that means nothing in the current mode.
    Invalid,
    HealthRecovered,
    StatusEffect,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
    /// Consecutive repeats folded into this line.
    pub count: u32,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{} (x{})", self.text, self.count)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Keeps the most recent `capacity` lines, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageLog {
    capacity: usize,
    messages: VecDeque<Message>,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            messages: VecDeque::new(),
        }
    }

    /// Appends a line. A repeat of the newest line bumps its count instead.
    pub fn push(&mut self, text: impl Into<String>, level: MessageLevel) {
        let text = text.into();
        if let Some(last) = self.messages.back_mut()
            && last.text == text
            && last.level == level
        {
            last.count += 1;
            return;
        }

        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(Message {
            text,
            level,
            count: 1,
        });
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> {
        self.messages.iter()
    }

    /// Up to `n` newest lines, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Message> {
        self.messages.iter().skip(self.messages.len().saturating_sub(n))
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.back()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_fold_into_one_line() {
        let mut log = MessageLog::new(8);
        log.push("That way is blocked.", MessageLevel::Impossible);
        log.push("That way is blocked.", MessageLevel::Impossible);

        assert_eq!(log.len(), 1);
        assert_eq!(
            log.last().map(ToString::to_string).as_deref(),
            Some("That way is blocked. (x2)")
        );
    }

    #[test]
    fn oldest_lines_fall_off() {
        let mut log = MessageLog::new(2);
        log.push("one", MessageLevel::Info);
        log.push("two", MessageLevel::Info);
        log.push("three", MessageLevel::Info);

        let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["two", "three"]);
        assert_eq!(log.recent(1).count(), 1);
    }
}
