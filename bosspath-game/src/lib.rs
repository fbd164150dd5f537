//! Bosspath Engine
//!
//! Deterministic boss-path selection for branching roguelite runs.
//! Given a seed and the set of defeated bosses, the engine decides which boss
//! waits behind the left and right branch, and funnels both branches into a
//! single final boss once the pool is nearly exhausted. This crate has no UI,
//! scene or platform dependencies.

pub mod constants;
pub mod engine;
pub mod error;
pub mod pool;
pub mod roster;
pub mod seed;
pub mod selector;
pub mod state;
pub mod tree;

// Re-export commonly used types
pub use engine::{PathEngine, SeedSource};
pub use error::{PathError, RosterError};
pub use pool::{BossIds, available, available_by_affinity, is_converged};
pub use roster::{BossEntry, Direction, Roster};
pub use seed::{
    FixedSessionSeed, NoSessionSeed, SessionSeedProvider, generate_entropy_seed, generate_seed,
    is_canonical_seed, normalize_seed,
};
pub use selector::{Selection, SelectionRoute, select, select_entry, selection_hash};
pub use state::PathState;
pub use tree::{PathNode, PathTree};

/// Trait for abstracting save/load of run snapshots.
/// Platform-specific implementations should provide this
pub trait PathStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a path snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_path(&self, slot: &str, state: &PathState) -> Result<(), Self::Error>;

    /// Load a path snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    fn load_path(&self, slot: &str) -> Result<Option<PathState>, Self::Error>;

    /// Delete a saved snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be deleted.
    fn delete_path(&self, slot: &str) -> Result<(), Self::Error>;
}

/// A path engine bound to a storage backend.
pub struct RunSession<P, S>
where
    P: SessionSeedProvider,
    S: PathStorage,
{
    engine: PathEngine<P>,
    storage: S,
}

impl<P, S> RunSession<P, S>
where
    P: SessionSeedProvider,
    S: PathStorage,
{
    pub const fn new(engine: PathEngine<P>, storage: S) -> Self {
        Self { engine, storage }
    }

    #[must_use]
    pub const fn engine(&self) -> &PathEngine<P> {
        &self.engine
    }

    pub const fn engine_mut(&mut self) -> &mut PathEngine<P> {
        &mut self.engine
    }

    /// Persist the current snapshot under `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save(&self, slot: &str) -> Result<(), S::Error> {
        self.storage.save_path(slot, &self.engine.current_state())
    }

    /// Restore the snapshot stored under `slot`. Returns `false` when the slot
    /// is empty, leaving the engine as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the snapshot names unknown bosses.
    pub fn load(&mut self, slot: &str) -> Result<bool, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let Some(snapshot) = self.storage.load_path(slot).map_err(Into::into)? else {
            return Ok(false);
        };
        self.engine.load_state(snapshot)?;
        Ok(true)
    }

    /// Remove the snapshot stored under `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn delete(&self, slot: &str) -> Result<(), S::Error> {
        self.storage.delete_path(slot)
    }

    /// Consume the session, returning the engine.
    #[must_use]
    pub fn into_engine(self) -> PathEngine<P> {
        self.engine
    }
}
