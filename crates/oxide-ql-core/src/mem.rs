//! Memory accounting for parse trees.
//!
//! A [`MemTracker`] is a shared byte counter with an optional limit. Parse
//! trees charge their statement text against it while they are alive, and
//! the parser refuses to start a batch once the limit has been crossed.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared handle to a [`MemTracker`].
pub type MemTrackerPtr = Arc<MemTracker>;

/// Returned when a tracker's consumption is above its limit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Memory limit exceeded for '{id}': {consumption} bytes used, limit is {limit} bytes")]
pub struct MemoryLimitExceeded {
    /// Tracker identifier.
    pub id: String,
    /// Bytes consumed when the check failed.
    pub consumption: usize,
    /// Configured limit.
    pub limit: usize,
}

/// Byte counter shared between the parse trees of one session.
#[derive(Debug)]
pub struct MemTracker {
    id: String,
    limit: Option<usize>,
    consumption: AtomicUsize,
}

impl MemTracker {
    /// Creates an unlimited tracker.
    #[must_use]
    pub fn new(id: impl Into<String>) -> MemTrackerPtr {
        Arc::new(Self {
            id: id.into(),
            limit: None,
            consumption: AtomicUsize::new(0),
        })
    }

    /// Creates a tracker that reports an error once more than `limit` bytes
    /// are consumed.
    #[must_use]
    pub fn with_limit(id: impl Into<String>, limit: usize) -> MemTrackerPtr {
        Arc::new(Self {
            id: id.into(),
            limit: Some(limit),
            consumption: AtomicUsize::new(0),
        })
    }

    /// Returns the tracker identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the configured limit, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the number of bytes currently charged.
    #[must_use]
    pub fn consumption(&self) -> usize {
        self.consumption.load(Ordering::Relaxed)
    }

    /// Charges `bytes` against the tracker.
    pub fn consume(&self, bytes: usize) {
        self.consumption.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Releases `bytes` previously charged. Never drops below zero.
    pub fn release(&self, bytes: usize) {
        let _ = self
            .consumption
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.saturating_sub(bytes))
            });
    }

    /// Returns whether the consumption is above the limit.
    #[must_use]
    pub fn limit_exceeded(&self) -> bool {
        self.limit.is_some_and(|limit| self.consumption() > limit)
    }

    /// Checks the consumption against the limit.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryLimitExceeded`] if more bytes are charged than the
    /// limit allows.
    pub fn check_limit(&self) -> Result<(), MemoryLimitExceeded> {
        match self.limit {
            Some(limit) if self.consumption() > limit => Err(MemoryLimitExceeded {
                id: self.id.clone(),
                consumption: self.consumption(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}
