//! Deterministic timer queue over virtual time.
//!
//! Every animation tick, deferral and settle delay in the terminal is a timer
//! in this queue. Timers belong to an [`Owner`]; tearing an owner down cancels
//! every timer it created, so a stale tick can never fire after its content
//! has been replaced. Time only moves when the host calls
//! [`Scheduler::pop_due`] / [`Scheduler::settle`], which makes the whole engine
//! reproducible under test.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Identifier of a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Group tag used for bulk cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Owner(u64);

impl Owner {
    /// Timers that live as long as the scheduler itself
    pub const ROOT: Owner = Owner(0);

    pub fn new(raw: u64) -> Self {
        Owner(raw)
    }
}

/// A timer that came due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub owner: Owner,
    /// Virtual time at which the timer fired
    pub at: Duration,
    pub event: E,
}

#[derive(Debug, Clone)]
struct Timer<E> {
    id: TimerId,
    owner: Owner,
    period: Option<Duration>,
    event: E,
}

/// Single-threaded timer queue
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), Timer<E>>,
    index: HashMap<TimerId, (Duration, u64)>,
}

impl<E: Clone> Scheduler<E> {
    pub fn new() -> Self {
        Self { now: Duration::ZERO, next_id: 1, next_seq: 0, queue: BTreeMap::new(), index: HashMap::new() }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `event` once after `delay`
    pub fn schedule_once(&mut self, owner: Owner, delay: Duration, event: E) -> TimerId {
        self.insert(owner, delay, None, event)
    }

    /// Fire `event` every `period`, first after one full period
    pub fn schedule_every(&mut self, owner: Owner, period: Duration, event: E) -> TimerId {
        self.insert(owner, period, Some(period.max(Duration::from_millis(1))), event)
    }

    fn insert(&mut self, owner: Owner, delay: Duration, period: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let key = (self.now + delay, self.bump_seq());
        self.queue.insert(key, Timer { id, owner, period, event });
        self.index.insert(id, key);
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Cancel a single timer; returns whether it was still pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.index.remove(&id) {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    /// Cancel every timer belonging to `owner`; returns how many were removed
    pub fn cancel_owner(&mut self, owner: Owner) -> usize {
        let keys: Vec<_> = self.queue.iter().filter(|(_, t)| t.owner == owner).map(|(k, _)| *k).collect();
        for key in &keys {
            if let Some(timer) = self.queue.remove(key) {
                self.index.remove(&timer.id);
            }
        }
        keys.len()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time remaining until the next timer fires
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| due.saturating_sub(self.now))
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its due time.
    ///
    /// Periodic timers are re-armed before being returned, so the handler may
    /// cancel them. Timers scheduled by the handler are visible to the next call.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<E>> {
        let key = *self.queue.keys().next()?;
        if key.0 > until {
            return None;
        }

        let timer = self.queue.remove(&key)?;
        self.index.remove(&timer.id);
        self.now = self.now.max(key.0);

        if let Some(period) = timer.period {
            let next_key = (self.now + period, self.bump_seq());
            self.index.insert(timer.id, next_key);
            self.queue.insert(next_key, timer.clone());
        }

        Some(Fired { id: timer.id, owner: timer.owner, at: self.now, event: timer.event })
    }

    /// Move the clock to `until` once every due timer has been handled
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl<E: Clone> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
