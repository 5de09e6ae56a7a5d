// Rust guideline compliant 2026-08-02

//! In-memory adapter for the `SnapshotStore` port.
//!
//! Intended for proof-of-concept runs and unit tests only. Holds at most one
//! snapshot; `save` replaces it wholesale. `SnapshotError::Unavailable` is
//! part of the port contract but is never returned by this adapter.

use std::cell::RefCell;
use std::collections::BTreeMap;

use domain::{SnapshotError, SnapshotStore};

/// `SnapshotStore` adapter backed by a `RefCell<Option<BTreeMap>>`.
#[derive(Debug)]
pub struct InMemorySnapshot {
    inner: RefCell<Option<BTreeMap<String, String>>>,
}

impl InMemorySnapshot {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: RefCell::new(None) }
    }
}

impl Default for InMemorySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshot {
    async fn save(&self, snapshot: &BTreeMap<String, String>) -> Result<(), SnapshotError> {
        *self.inner.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<BTreeMap<String, String>>, SnapshotError> {
        Ok(self.inner.borrow().clone())
    }

    async fn clear(&self) -> Result<(), SnapshotError> {
        *self.inner.borrow_mut() = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
