use bosspath_game::{PathEngine, PathError};

use crate::logic::{BranchStrategy, SimulationPlan};

pub mod properties;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: String,
    pub plan: SimulationPlan,
}

impl TestScenario {
    #[must_use]
    pub fn simulation(key: &'static str, name: impl Into<String>, plan: SimulationPlan) -> Self {
        Self {
            key,
            name: name.into(),
            plan,
        }
    }
}

const SCENARIOS: &[(&str, &str)] = &[
    ("smoke", "Smoke Test"),
    ("determinism", "Deterministic Replay"),
    ("preview-purity", "Preview Purity"),
    ("pool-shrinkage", "Pool Shrinkage"),
    ("convergence", "Path Convergence"),
    ("affinity-fallback", "Affinity Fallback"),
    ("state-roundtrip", "State Round-Trip"),
    ("full-run", "Full Run Coverage"),
];

fn defeat_left_group(engine: &mut PathEngine) -> Result<(), PathError> {
    let left: Vec<String> = engine
        .roster()
        .ids_with(bosspath_game::Direction::Left)
        .map(String::from)
        .collect();
    for id in left {
        engine.mark_boss_as_defeated(&id)?;
    }
    Ok(())
}

fn plan_for(key: &str) -> Option<SimulationPlan> {
    use properties::*;

    let plan = match key {
        "smoke" => SimulationPlan::new(BranchStrategy::Alternating)
            .with_max_steps(1)
            .with_expectation(smoke_expectation),
        "determinism" => {
            SimulationPlan::new(BranchStrategy::Random).with_expectation(replay_expectation)
        }
        "preview-purity" => {
            SimulationPlan::new(BranchStrategy::Random).with_expectation(purity_expectation)
        }
        "pool-shrinkage" => {
            SimulationPlan::new(BranchStrategy::Random).with_expectation(shrinkage_expectation)
        }
        "convergence" => SimulationPlan::new(BranchStrategy::Random)
            .with_expectation(completion_expectation)
            .with_expectation(convergence_expectation),
        "affinity-fallback" => SimulationPlan::new(BranchStrategy::AlwaysLeft)
            .with_setup(defeat_left_group)
            .with_max_steps(1)
            .with_expectation(fallback_expectation),
        "state-roundtrip" => {
            SimulationPlan::new(BranchStrategy::Random).with_expectation(roundtrip_expectation)
        }
        "full-run" => SimulationPlan::new(BranchStrategy::Random)
            .with_expectation(completion_expectation)
            .with_expectation(unique_bosses_expectation)
            .with_expectation(visualization_expectation),
        _ => return None,
    };
    Some(plan)
}

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let key = name.to_lowercase();
    let (key, label) = *SCENARIOS.iter().find(|(k, _)| *k == key)?;
    plan_for(key).map(|plan| TestScenario::simulation(key, label, plan))
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.to_vec()
}
