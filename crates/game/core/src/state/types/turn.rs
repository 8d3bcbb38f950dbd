//! Priority-queue turn scheduler.
//!
//! Implements the "queued turns" time system: every actor that is waiting to
//! act holds one [`Ticket`] naming the absolute tick at which it becomes
//! eligible. Popping a ticket advances the clock to that tick. Tickets with
//! equal time resolve in insertion order, which keeps turn order
//! reproducible across runs and across save/restore.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::{EntityId, Tick};

/// Errors produced by the turn queue.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    /// No tickets remain. Callers treat this as "drain complete".
    #[error("turn queue is empty")]
    EmptyQueue,

    #[error("actor {0} is dead and cannot be scheduled")]
    ActorNotAlive(EntityId),

    #[error("ticket payload {0} is not present in the world")]
    UnknownActor(EntityId),

    #[error("actor {0} already has a pending ticket")]
    AlreadyScheduled(EntityId),

    #[error("actor {0} is still taking its turn")]
    TurnInProgress(EntityId),

    #[error("ticket sequence {sequence} is not below next_sequence {next_sequence}")]
    SequenceOutOfRange { sequence: u64, next_sequence: u64 },

    #[error("duplicate ticket sequence {0}")]
    DuplicateSequence(u64),

    #[error("ticket at {time} precedes the clock at {current_time}")]
    TicketBeforeClock { time: Tick, current_time: Tick },
}

/// A scheduled wake-up: `payload` may act once the clock reaches `time`.
///
/// Ordering and equality only look at `(time, sequence)`; sequences are
/// unique within one queue.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ticket<T> {
    pub time: Tick,
    pub sequence: u64,
    pub payload: T,
}

impl<T> Ticket<T> {
    fn key(&self) -> (Tick, u64) {
        (self.time, self.sequence)
    }
}

impl<T> PartialEq for Ticket<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Ticket<T> {}

impl<T> PartialOrd for Ticket<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ticket<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-heap of tickets ordered by `(time, sequence)`.
#[derive(Clone, Debug)]
pub struct TurnQueue<T> {
    current_time: Tick,
    next_sequence: u64,
    heap: BinaryHeap<Reverse<Ticket<T>>>,
}

impl<T> Default for TurnQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TurnQueue<T> {
    pub fn new() -> Self {
        Self::starting_at(Tick::ZERO)
    }

    /// Creates an empty queue whose clock starts at `time`.
    pub fn starting_at(time: Tick) -> Self {
        Self {
            current_time: time,
            next_sequence: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Rebuilds a queue from persisted parts.
    ///
    /// Rejects ticket sets that could not have been produced by this queue:
    /// sequences must be unique and below `next_sequence`, and no ticket may
    /// be due before `current_time`.
    pub fn restore(
        current_time: Tick,
        next_sequence: u64,
        tickets: impl IntoIterator<Item = Ticket<T>>,
    ) -> Result<Self, TurnError> {
        let mut seen = std::collections::BTreeSet::new();
        let mut heap = BinaryHeap::new();
        for ticket in tickets {
            if ticket.sequence >= next_sequence {
                return Err(TurnError::SequenceOutOfRange {
                    sequence: ticket.sequence,
                    next_sequence,
                });
            }
            if ticket.time < current_time {
                return Err(TurnError::TicketBeforeClock {
                    time: ticket.time,
                    current_time,
                });
            }
            if !seen.insert(ticket.sequence) {
                return Err(TurnError::DuplicateSequence(ticket.sequence));
            }
            heap.push(Reverse(ticket));
        }

        Ok(Self {
            current_time,
            next_sequence,
            heap,
        })
    }

    /// The clock: time of the most recently popped ticket.
    pub fn current_time(&self) -> Tick {
        self.current_time
    }

    /// Sequence number the next scheduled ticket will receive.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the ticket `next()` would pop, without removing it.
    pub fn peek(&self) -> Option<&Ticket<T>> {
        self.heap.peek().map(|Reverse(ticket)| ticket)
    }

    /// Removes and returns the earliest ticket, advancing the clock to it.
    pub fn next(&mut self) -> Result<Ticket<T>, TurnError> {
        let Reverse(ticket) = self.heap.pop().ok_or(TurnError::EmptyQueue)?;
        // The heap minimum never precedes the previous minimum unless it was
        // scheduled from an older clock, which schedule() rules out.
        debug_assert!(ticket.time >= self.current_time);
        self.current_time = ticket.time;
        Ok(ticket)
    }

    /// Pending tickets in pop order.
    pub fn tickets(&self) -> Vec<&Ticket<T>> {
        let mut tickets: Vec<&Ticket<T>> = self.heap.iter().map(|Reverse(t)| t).collect();
        tickets.sort();
        tickets
    }

    /// Returns a draining iterator that pops one ticket per `next()` call.
    ///
    /// New tickets may be scheduled through [`Drain::schedule`] while
    /// draining; they are returned in order like any other ticket.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { queue: self }
    }
}

impl<T: PartialEq> PartialEq for TurnQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.current_time == other.current_time
            && self.next_sequence == other.next_sequence
            && self.len() == other.len()
            && self
                .tickets()
                .into_iter()
                .zip(other.tickets())
                .all(|(a, b)| a == b && a.payload == b.payload)
    }
}

impl<T: Eq> Eq for TurnQueue<T> {}

impl<T: Clone> TurnQueue<T> {
    /// Schedules `payload` to act `interval` ticks after the current time.
    ///
    /// `interval = 0` queues the payload at the current tick, behind every
    /// ticket already waiting at that tick.
    pub fn schedule(&mut self, interval: u64, payload: T) -> Ticket<T> {
        let ticket = Ticket {
            time: self.current_time + interval,
            sequence: self.next_sequence,
            payload,
        };
        self.next_sequence += 1;
        self.heap.push(Reverse(ticket.clone()));
        ticket
    }
}

/// Draining view over a [`TurnQueue`]. See [`TurnQueue::drain`].
pub struct Drain<'a, T> {
    queue: &'a mut TurnQueue<T>,
}

impl<T> Drain<'_, T> {
    pub fn current_time(&self) -> Tick {
        self.queue.current_time
    }
}

impl<T: Clone> Drain<'_, T> {
    pub fn schedule(&mut self, interval: u64, payload: T) -> Ticket<T> {
        self.queue.schedule(interval, payload)
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = Ticket<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Scheduling during the drain can add tickets.
        (self.queue.len(), None)
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for TurnQueue<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        // Tickets are written in pop order so equal queues encode identically
        // regardless of the heap's internal layout.
        let mut out = serializer.serialize_struct("TurnQueue", 3)?;
        out.serialize_field("current_time", &self.current_time)?;
        out.serialize_field("next_sequence", &self.next_sequence)?;
        out.serialize_field("tickets", &self.tickets())?;
        out.end()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename = "TurnQueue")]
struct TurnQueueRepr<T> {
    current_time: Tick,
    next_sequence: u64,
    tickets: Vec<Ticket<T>>,
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for TurnQueue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = TurnQueueRepr::<T>::deserialize(deserializer)?;
        TurnQueue::restore(repr.current_time, repr.next_sequence, repr.tickets)
            .map_err(serde::de::Error::custom)
    }
}

/// Turn bookkeeping carried in [`crate::GameState`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Pending wake-ups for every living actor that is not currently acting.
    pub queue: TurnQueue<EntityId>,

    /// The actor whose ticket was popped last and who is now choosing an
    /// action. `None` before the first pop.
    pub current_actor: Option<EntityId>,

    /// Count of successfully executed actions. Mixed into RNG seeds so every
    /// roll is unique and reproducible.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> Tick {
        self.queue.current_time()
    }
}
