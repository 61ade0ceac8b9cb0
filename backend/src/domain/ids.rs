//! Unique suffixes for generated record ids, and the clock that dates them.
//!
//! Both are injected into the ledger service so tests can pin ids and dates.

use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Produces the unique part of system-generated ids (`AUTO-REM-<suffix>`)
pub trait IdGenerator: Send + Sync {
    fn next_suffix(&self) -> String;

    /// Full id for a given prefix
    fn next_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_suffix())
    }
}

/// Random v4 UUIDs, in simple (hyphen-free) form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_suffix(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Monotonic counter starting at 1. Deterministic, for tests and replays.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first.saturating_sub(1)),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_suffix(&self) -> String {
        let value = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{:05}", value)
    }
}

/// Source of "today" for records dated by the system
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
