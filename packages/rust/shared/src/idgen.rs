//! Identifier generation for imported steps.
//!
//! The import regenerates every step id so imported data cannot collide with
//! pre-existing rows in the destination store. Generation is an injected
//! capability so the tree builder stays deterministic under test.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// A source of process-wide unique string identifiers.
///
/// Implementations must be safe for concurrent use across simultaneous
/// import requests; every call returns a value never returned before.
pub trait IdGenerator: Send + Sync {
    /// Produce the next unique identifier.
    fn next_id(&self) -> String;
}

/// Production generator: time-sortable UUID v7 strings.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic generator for tests: `prefix-1`, `prefix-2`, ...
#[derive(Debug)]
pub struct SequenceIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequenceIdGenerator {
    /// Create a generator emitting `<prefix>-<n>` starting at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_generator_produces_distinct_ids() {
        let generator = UuidIdGenerator;
        let a = generator.next_id();
        let b = generator.next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn sequence_generator_is_deterministic() {
        let generator = SequenceIdGenerator::new("new");
        assert_eq!(generator.next_id(), "new-1");
        assert_eq!(generator.next_id(), "new-2");
        assert_eq!(generator.next_id(), "new-3");
    }
}
