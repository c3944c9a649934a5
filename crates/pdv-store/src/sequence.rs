//! # Id Sequences
//!
//! Every entity kind gets its own counter. Ids start at 1, only ever grow,
//! and are never handed out twice, even when the insert that asked for one
//! is later abandoned.

use std::sync::atomic::{AtomicI64, Ordering};

/// A monotonic id allocator for one entity kind.
#[derive(Debug)]
pub struct IdSequence(AtomicI64);

impl IdSequence {
    pub const fn new() -> Self {
        IdSequence(AtomicI64::new(1))
    }

    /// Allocates the next id.
    #[inline]
    pub fn next_id(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next call to [`IdSequence::next_id`] will return.
    #[inline]
    pub fn peek(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
