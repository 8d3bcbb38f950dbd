//! Property tests for the turn queue: ordering, clock monotonicity and
//! ticket accounting under arbitrary schedules.

use game_core::{Tick, TurnError, TurnQueue};
use proptest::prelude::*;

/// A schedule step: either schedule a payload after an interval, or pop.
#[derive(Clone, Debug)]
enum Op {
    Schedule(u64),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u64..50).prop_map(Op::Schedule),
        2 => Just(Op::Pop),
    ]
}

proptest! {
    /// Pops always return the smallest (time, sequence) still pending.
    #[test]
    fn prop_pop_returns_global_minimum(ops in prop::collection::vec(op(), 1..200)) {
        let mut queue = TurnQueue::new();
        let mut pending: Vec<(Tick, u64)> = Vec::new();

        for (payload, op) in ops.into_iter().enumerate() {
            match op {
                Op::Schedule(interval) => {
                    let ticket = queue.schedule(interval, payload);
                    prop_assert_eq!(ticket.time, queue.current_time() + interval);
                    pending.push((ticket.time, ticket.sequence));
                }
                Op::Pop => {
                    let expected = pending.iter().copied().min();
                    match queue.next() {
                        Ok(ticket) => {
                            prop_assert_eq!(Some((ticket.time, ticket.sequence)), expected);
                            pending.retain(|key| *key != (ticket.time, ticket.sequence));
                        }
                        Err(error) => {
                            prop_assert_eq!(error, TurnError::EmptyQueue);
                            prop_assert!(expected.is_none());
                        }
                    }
                }
            }
        }
    }

    /// The clock equals the last popped time and never goes backwards.
    #[test]
    fn prop_clock_is_monotonic(ops in prop::collection::vec(op(), 1..200)) {
        let mut queue = TurnQueue::new();
        let mut last = queue.current_time();

        for op in ops {
            match op {
                Op::Schedule(interval) => {
                    queue.schedule(interval, ());
                }
                Op::Pop => {
                    if let Ok(ticket) = queue.next() {
                        prop_assert_eq!(queue.current_time(), ticket.time);
                    }
                }
            }
            prop_assert!(queue.current_time() >= last);
            last = queue.current_time();
        }
    }

    /// Draining pops exactly as many tickets as were ever scheduled,
    /// including the ones scheduled by popped payloads.
    #[test]
    fn prop_drain_counts_every_ticket(
        initial in prop::collection::vec(0u64..20, 0..30),
        respawns in 0u32..4,
    ) {
        let mut queue = TurnQueue::new();
        for interval in &initial {
            queue.schedule(*interval, respawns);
        }

        let mut drain = queue.drain();
        let mut popped = 0usize;
        while let Some(ticket) = drain.next() {
            popped += 1;
            if ticket.payload > 0 {
                drain.schedule(1, ticket.payload - 1);
            }
        }

        let expected = initial.len() * (respawns as usize + 1);
        prop_assert_eq!(popped, expected);
        prop_assert_eq!(queue.next_sequence() as usize, expected);
        prop_assert!(queue.is_empty());
    }

    /// Equal-time tickets come out in insertion order.
    #[test]
    fn prop_equal_times_are_fifo(count in 1usize..50, interval in 0u64..10) {
        let mut queue = TurnQueue::new();
        for payload in 0..count {
            queue.schedule(interval, payload);
        }
        let order: Vec<usize> = queue.drain().map(|ticket| ticket.payload).collect();
        prop_assert_eq!(order, (0..count).collect::<Vec<_>>());
    }
}
