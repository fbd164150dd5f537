use std::hash::Hasher;
use std::sync::Arc;

use anyhow::Result;
use bosspath_game::{PathEngine, PathError, PathState, Roster};
use twox_hash::XxHash64;

use crate::logic::policy::BranchStrategy;
use crate::logic::simulation::{SimulationSession, StepRecord};

/// Declarative plan for running a simulated path.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub strategy: BranchStrategy,
    pub max_steps: Option<usize>,
    pub setup: Option<fn(&mut PathEngine) -> Result<(), PathError>>,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub fn new(strategy: BranchStrategy) -> Self {
        Self {
            strategy,
            max_steps: None,
            setup: None,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    #[must_use]
    pub fn with_setup(mut self, setup: fn(&mut PathEngine) -> Result<(), PathError>) -> Self {
        self.setup = Some(setup);
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// Assertion hook run after a simulation completes.
type SimulationExpectationFn =
    Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl std::fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    pub fn evaluate(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Complete record of a simulated path.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: String,
    pub strategy: BranchStrategy,
    pub initial_state: PathState,
    pub steps: Vec<StepRecord>,
    pub final_state: PathState,
    pub completed: bool,
    pub digest: u64,
    /// Replaying the same choices on a fresh engine reproduced every pick.
    pub replay_matches: bool,
}

impl SimulationSummary {
    #[must_use]
    pub fn roster_len(&self) -> usize {
        Roster::standard().len()
    }
}

/// Digest of a path trace, stable across runs and platforms.
#[must_use]
pub fn trace_digest(steps: &[StepRecord]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    for step in steps {
        hasher.write(step.trace_line().as_bytes());
        hasher.write_u8(b'\n');
    }
    hasher.finish()
}

/// Headless deterministic runner for the path engine.
#[derive(Debug, Clone, Copy)]
pub struct PathTester {
    verbose: bool,
}

impl PathTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run_plan(
        &self,
        plan: &SimulationPlan,
        seed: &str,
        rng_seed: u64,
    ) -> Result<SimulationSummary> {
        let mut engine = PathEngine::with_seed(seed);
        if let Some(setup) = plan.setup {
            setup(&mut engine)?;
        }
        let initial_state = engine.current_state();
        let seed = engine.current_seed().to_string();

        if self.verbose {
            println!("🎮 Starting path | seed:{seed} policy:{}", plan.strategy.label());
            println!("{}", engine.path_tree_visualization());
        }

        let max_steps = plan.max_steps.unwrap_or(usize::MAX);
        let mut session = SimulationSession::new(engine, max_steps);
        let mut policy = plan.strategy.create_policy(rng_seed);
        let mut steps = Vec::new();
        while !session.finished() {
            let record = session.advance(policy.as_mut())?;
            if self.verbose {
                println!(
                    "  ➡️  step {} {} -> {} ({:?})",
                    record.step,
                    record.direction.label(),
                    record.boss.id,
                    record.route
                );
            }
            steps.push(record);
        }

        let engine = session.into_engine();
        let replay_matches = replay(&initial_state, &steps)?;

        Ok(SimulationSummary {
            seed,
            strategy: plan.strategy,
            digest: trace_digest(&steps),
            initial_state,
            completed: engine.is_run_complete(),
            final_state: engine.current_state(),
            steps,
            replay_matches,
        })
    }
}

fn replay(initial: &PathState, steps: &[StepRecord]) -> Result<bool> {
    let mut engine = PathEngine::new();
    engine.load_state(initial.clone())?;
    for step in steps {
        let pick = engine.select_in(step.direction)?;
        if pick != step.boss {
            return Ok(false);
        }
        engine.mark_boss_as_defeated(&pick.id)?;
    }
    Ok(true)
}
