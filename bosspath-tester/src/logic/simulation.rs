use anyhow::{Context, Result};
use bosspath_game::{BossEntry, Direction, PathEngine, SelectionRoute};

use crate::logic::policy::BranchPolicy;

/// Snapshot of one resolved branch choice.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub step: usize,
    pub direction: Direction,
    pub boss: BossEntry,
    pub route: SelectionRoute,
    pub preview: (BossEntry, BossEntry),
    pub pool_before: usize,
    pub converged_before: bool,
    pub visualization: String,
    /// Repeating every read-only query left answers and state unchanged.
    pub preview_stable: bool,
    /// Reloading the current snapshot produced the same preview.
    pub roundtrip_stable: bool,
    /// First mark changed the pool; the repeat was a no-op.
    pub defeat_idempotent: bool,
    pub policy_name: &'static str,
}

impl StepRecord {
    #[must_use]
    pub fn trace_line(&self) -> String {
        format!(
            "{} {} {:?} {} L={} R={}",
            self.step,
            self.direction.tag(),
            self.route,
            self.boss.id,
            self.preview.0.id,
            self.preview.1.id
        )
    }
}

/// Core deterministic run harness used by the tester.
pub struct SimulationSession {
    engine: PathEngine,
    max_steps: usize,
    step: usize,
}

impl SimulationSession {
    #[must_use]
    pub fn new(engine: PathEngine, max_steps: usize) -> Self {
        Self {
            engine,
            max_steps,
            step: 0,
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &PathEngine {
        &self.engine
    }

    pub const fn engine_mut(&mut self) -> &mut PathEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.engine.is_run_complete() || self.step >= self.max_steps
    }

    /// Resolve one branch choice and mark the chosen boss defeated.
    pub fn advance(&mut self, policy: &mut dyn BranchPolicy) -> Result<StepRecord> {
        let state_before = self.engine.current_state();
        let pool_before = self.engine.available_bosses().len();
        let converged_before = self.engine.is_paths_converged();
        let preview = self
            .engine
            .preview_next_choices()
            .with_context(|| format!("preview failed at step {}", self.step))?;
        let visualization = self.engine.path_tree_visualization();

        let preview_stable = self.engine.preview_next_choices()? == preview
            && self.engine.path_tree_visualization() == visualization
            && self.engine.current_state() == state_before;

        let mut reloaded = self.engine.clone();
        reloaded.load_state(self.engine.current_state())?;
        let roundtrip_stable = reloaded.preview_next_choices()? == preview
            && reloaded.current_state() == state_before;

        let decision = policy.pick_branch(&self.engine, self.step);
        let selection = self.engine.explain_next(decision.direction)?;

        let first = self.engine.mark_boss_as_defeated(&selection.boss.id)?;
        let repeat = self.engine.mark_boss_as_defeated(&selection.boss.id)?;

        let record = StepRecord {
            step: self.step,
            direction: decision.direction,
            boss: selection.boss,
            route: selection.route,
            preview,
            pool_before,
            converged_before,
            visualization,
            preview_stable,
            roundtrip_stable,
            defeat_idempotent: first && !repeat,
            policy_name: policy.name(),
        };
        self.step += 1;
        Ok(record)
    }

    #[must_use]
    pub fn into_engine(self) -> PathEngine {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::policy::BranchStrategy;

    #[test]
    fn session_runs_until_the_pool_is_empty() {
        let mut session = SimulationSession::new(PathEngine::with_seed("SIM001"), 100);
        let mut policy = BranchStrategy::Alternating.create_policy(0);
        let mut records = Vec::new();
        while !session.finished() {
            records.push(session.advance(policy.as_mut()).unwrap());
        }
        assert_eq!(records.len(), 8);
        assert!(records.iter().all(|r| r.preview_stable && r.roundtrip_stable));
        assert!(records.last().unwrap().converged_before);
        assert!(session.into_engine().is_run_complete());
    }

    #[test]
    fn max_steps_halts_early() {
        let mut session = SimulationSession::new(PathEngine::with_seed("SIM002"), 2);
        let mut policy = BranchStrategy::AlwaysLeft.create_policy(0);
        while !session.finished() {
            session.advance(policy.as_mut()).unwrap();
        }
        assert_eq!(session.engine().defeated_bosses().len(), 2);
    }
}
