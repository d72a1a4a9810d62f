//! Deferred transitions
//!
//! Timed effects (hit → fall, reload grace, dog reactions, mint) are queued
//! against the simulation tick counter. Each event names what it targets so
//! the handler can re-validate it when it fires; a reset never has to hunt
//! down pending events, they simply no-op.

use serde::{Deserialize, Serialize};

use super::state::DogReaction;

/// A transition waiting for its tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Hit duck starts to fall
    DuckFalls { duck_id: u32 },
    /// Alive duck gives up waiting for a shot
    DuckFliesAway { duck_id: u32 },
    /// Dog pops up; `round` guards against a reset in between
    ShowDog { reaction: DogReaction, round: u32 },
    /// Dog goes back down, only if it is still the same appearance
    HideDog { appearance: u32 },
    /// Mint confirmation arrives
    MintCompletes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending {
    due_tick: u64,
    seq: u64,
    event: Deferred,
}

/// Tick-ordered queue of deferred events. Events due on the same tick fire in
/// the order they were scheduled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay_ticks` after `now`
    pub fn schedule(&mut self, now: u64, delay_ticks: u64, event: Deferred) {
        let entry = Pending {
            due_tick: now + delay_ticks,
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        let idx = self
            .pending
            .partition_point(|p| (p.due_tick, p.seq) <= (entry.due_tick, entry.seq));
        self.pending.insert(idx, entry);
    }

    /// Remove and return every event due at or before `now`
    pub fn take_due(&mut self, now: u64) -> Vec<Deferred> {
        let split = self.pending.partition_point(|p| p.due_tick <= now);
        self.pending.drain(..split).map(|p| p.event).collect()
    }

    /// Drop pending events matching `pred`
    pub fn cancel_where(&mut self, pred: impl Fn(&Deferred) -> bool) {
        self.pending.retain(|p| !pred(&p.event));
    }

    pub fn is_scheduled(&self, pred: impl Fn(&Deferred) -> bool) -> bool {
        self.pending.iter().any(|p| pred(&p.event))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
