//! Path engine: owns the run seed and defeated set and answers branch queries.
use crate::constants::{
    VIS_FINAL_BOSS, VIS_LEFT_LABEL, VIS_RIGHT_LABEL, VIS_RUN_COMPLETE, VIS_SEED_PREFIX,
};
use crate::error::PathError;
use crate::pool;
use crate::roster::{BossEntry, Direction, Roster};
use crate::seed::{NoSessionSeed, SessionSeedProvider, generate_entropy_seed, normalize_seed};
use crate::selector::{self, Selection};
use crate::state::PathState;
use crate::tree::{self, PathTree};
use serde::{Deserialize, Serialize};

/// Where the active seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    Explicit,
    Session,
    Generated,
}

/// Orchestrates roster, pool tracking and selection for one run.
///
/// Only [`PathEngine::mark_boss_as_defeated`] mutates the pool; resets and
/// loads replace the whole [`PathState`]. Every query is read-only.
#[derive(Debug, Clone)]
pub struct PathEngine<P: SessionSeedProvider = NoSessionSeed> {
    roster: Roster,
    provider: P,
    state: PathState,
}

impl Default for PathEngine<NoSessionSeed> {
    fn default() -> Self {
        Self::new()
    }
}

impl PathEngine<NoSessionSeed> {
    /// Engine over the standard roster with a freshly generated seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_provider(NoSessionSeed)
    }

    /// Engine over the standard roster, reset to `seed`.
    #[must_use]
    pub fn with_seed(seed: &str) -> Self {
        let mut engine = Self::new();
        engine.reset_with_new_seed(Some(seed));
        engine
    }
}

impl<P: SessionSeedProvider> PathEngine<P> {
    #[must_use]
    pub fn with_provider(provider: P) -> Self {
        Self::with_roster(Roster::default(), provider)
    }

    #[must_use]
    pub fn with_roster(roster: Roster, provider: P) -> Self {
        let mut engine = Self {
            roster,
            provider,
            state: PathState::default(),
        };
        engine.reset_with_new_seed(None);
        engine
    }

    fn resolve_seed(&self, explicit: Option<&str>) -> (String, SeedSource) {
        if let Some(seed) = explicit.and_then(normalize_seed) {
            return (seed, SeedSource::Explicit);
        }
        if let Some(seed) = self
            .provider
            .current_session_seed()
            .as_deref()
            .and_then(normalize_seed)
        {
            return (seed, SeedSource::Session);
        }
        (generate_entropy_seed(), SeedSource::Generated)
    }

    /// Start a new run, clearing every defeat.
    ///
    /// An explicit seed is normalized (uppercase, alphabet only, at most six
    /// characters). A missing or unusable seed falls back to the session seed
    /// provider and then to a fresh random seed.
    pub fn reset_with_new_seed(&mut self, seed: Option<&str>) -> SeedSource {
        let (seed, source) = self.resolve_seed(seed);
        log::info!("path reset seed={seed} source={source:?}");
        self.state = PathState::new(seed);
        source
    }

    /// Select the next boss for the chosen branch. Never mutates state.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPool`] once every boss has been defeated.
    pub fn select_next_boss(&self, is_left_path: bool) -> Result<BossEntry, PathError> {
        self.select_in(Direction::from_is_left(is_left_path))
    }

    /// # Errors
    ///
    /// Returns [`PathError::EmptyPool`] once every boss has been defeated.
    pub fn select_in(&self, direction: Direction) -> Result<BossEntry, PathError> {
        selector::select_entry(&self.roster, &self.state, direction)
    }

    /// Selection together with its decision trace.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPool`] once every boss has been defeated.
    pub fn explain_next(&self, direction: Direction) -> Result<Selection, PathError> {
        selector::select(&self.roster, &self.state, direction)
    }

    /// `(left, right)` choices for display.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPool`] once every boss has been defeated.
    pub fn preview_next_choices(&self) -> Result<(BossEntry, BossEntry), PathError> {
        Ok((self.select_next_boss(true)?, self.select_next_boss(false)?))
    }

    /// Record a defeat. Returns `false` when `id` was already defeated.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnknownBoss`] if `id` is not in the roster.
    pub fn mark_boss_as_defeated(&mut self, id: &str) -> Result<bool, PathError> {
        if !self.roster.contains(id) {
            return Err(PathError::unknown(id));
        }
        let changed = self.state.insert_defeated(id);
        log::debug!(
            "defeated boss={id} new={changed} remaining={}",
            pool::available(&self.roster, &self.state).len()
        );
        Ok(changed)
    }

    /// Undefeated bosses in roster order.
    #[must_use]
    pub fn available_bosses(&self) -> Vec<BossEntry> {
        self.roster
            .entries()
            .iter()
            .filter(|boss| !self.state.is_defeated(&boss.id))
            .cloned()
            .collect()
    }

    /// Defeated ids in the order they were marked.
    #[must_use]
    pub fn defeated_bosses(&self) -> &[String] {
        &self.state.defeated
    }

    #[must_use]
    pub fn is_paths_converged(&self) -> bool {
        pool::is_converged(&self.roster, &self.state)
    }

    /// Every roster boss has been defeated.
    #[must_use]
    pub fn is_run_complete(&self) -> bool {
        pool::available(&self.roster, &self.state).is_empty()
    }

    #[must_use]
    pub fn current_seed(&self) -> &str {
        &self.state.seed
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Snapshot for external persistence.
    #[must_use]
    pub fn current_state(&self) -> PathState {
        self.state.clone()
    }

    /// Replace the run state with a snapshot.
    ///
    /// The seed is normalized like an explicit reset seed; a seed that
    /// normalizes to nothing is kept empty rather than replaced, so restoring
    /// the same snapshot always yields the same run. Repeated ids keep their
    /// first position. Nothing is merged with the previous state.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnknownBoss`] if the snapshot names a boss outside
    /// the roster; the current state is left untouched in that case.
    pub fn load_state(&mut self, snapshot: PathState) -> Result<(), PathError> {
        if let Some(unknown) = snapshot.defeated.iter().find(|id| !self.roster.contains(id)) {
            log::warn!("rejected snapshot: unknown boss {unknown}");
            return Err(PathError::unknown(unknown));
        }
        let mut state = PathState::new(normalize_seed(&snapshot.seed).unwrap_or_default());
        for id in &snapshot.defeated {
            state.insert_defeated(id);
        }
        log::info!(
            "path loaded seed={} defeated={}",
            state.seed,
            state.defeated.len()
        );
        self.state = state;
        Ok(())
    }

    /// Human-readable summary of the next branch choice.
    #[must_use]
    pub fn path_tree_visualization(&self) -> String {
        let mut lines = vec![format!("{VIS_SEED_PREFIX}{}]", self.state.seed)];
        match self.preview_next_choices() {
            Ok((left, _)) if self.is_paths_converged() => {
                lines.push(format!("{VIS_FINAL_BOSS}: {}", left.id));
            }
            Ok((left, right)) => {
                lines.push(format!(
                    "{VIS_LEFT_LABEL} -> {} ({})",
                    left.id,
                    left.affinity.label()
                ));
                lines.push(format!(
                    "{VIS_RIGHT_LABEL} -> {} ({})",
                    right.id,
                    right.affinity.label()
                ));
            }
            Err(_) => lines.push(VIS_RUN_COMPLETE.to_string()),
        }
        lines.join("\n")
    }

    /// Multi-level look-ahead of every distinct path.
    ///
    /// # Errors
    ///
    /// Propagates selector errors; none occur for a state built by this engine.
    pub fn preview_tree(&self, depth: usize) -> Result<PathTree, PathError> {
        tree::build(&self.roster, &self.state, depth)
    }
}
