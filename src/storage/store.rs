//! Snapshot persistence backends
//!
//! The engine persists every accepted command through a `StateStore` before
//! the new snapshot becomes current. The trait keeps the engine independent
//! of where snapshots live; the crate ships a JSON file backend and an
//! in-memory backend.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use crate::config::paths::BudgetPaths;
use crate::error::BudgetResult;
use crate::models::BudgetState;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Abstraction over persistence backends for the budget snapshot.
pub trait StateStore: Send {
    /// Return the last persisted snapshot, or `None` if there is none usable.
    fn load(&self) -> BudgetResult<Option<BudgetState>>;

    /// Persist a snapshot. The engine treats a failure here as fatal to the
    /// command that produced the snapshot.
    fn save(&self, state: &BudgetState) -> BudgetResult<()>;
}

/// File-backed store persisting the snapshot as pretty-printed JSON.
///
/// Loading is lenient: a missing or unreadable file yields `None` (and a
/// warning for the unreadable case) so a corrupted snapshot never prevents
/// the engine from starting.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    /// Create a store at the conventional location under `paths`.
    pub fn new(paths: &BudgetPaths) -> BudgetResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            path: paths.state_file(),
        })
    }

    /// Create a store writing to an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> BudgetResult<Option<BudgetState>> {
        match read_json(&self.path) {
            Ok(state) => Ok(state),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unusable budget snapshot, starting from default");
                Ok(None)
            }
        }
    }

    fn save(&self, state: &BudgetState) -> BudgetResult<()> {
        write_json_atomic(&self.path, state)
    }
}

/// In-memory store; useful for embedders that persist elsewhere and for
/// exercising the engine in tests.
#[derive(Default)]
pub struct MemoryStateStore {
    state: Mutex<Option<BudgetState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a snapshot.
    pub fn with_state(state: BudgetState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// The currently held snapshot, if any.
    pub fn snapshot(&self) -> Option<BudgetState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> BudgetResult<Option<BudgetState>> {
        Ok(self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, state: &BudgetState) -> BudgetResult<()> {
        *self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(state.clone());
        Ok(())
    }
}
