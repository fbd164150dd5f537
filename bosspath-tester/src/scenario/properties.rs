//! Expectations checked against simulated paths.
use std::collections::HashSet;

use anyhow::Result;
use bosspath_game::{Direction, SelectionRoute};

use crate::logic::SimulationSummary;

pub fn smoke_expectation(summary: &SimulationSummary) -> Result<()> {
    anyhow::ensure!(!summary.steps.is_empty(), "Path produced no steps");
    anyhow::ensure!(
        summary.final_state.defeated.len() == 1,
        "Exactly one boss should be defeated after one step, got {}",
        summary.final_state.defeated.len()
    );
    Ok(())
}

pub fn replay_expectation(summary: &SimulationSummary) -> Result<()> {
    anyhow::ensure!(
        summary.replay_matches,
        "Replaying seed {} with the same choices diverged",
        summary.seed
    );
    Ok(())
}

pub fn purity_expectation(summary: &SimulationSummary) -> Result<()> {
    if let Some(step) = summary.steps.iter().find(|s| !s.preview_stable) {
        anyhow::bail!("Read-only queries changed state at step {}", step.step);
    }
    Ok(())
}

pub fn shrinkage_expectation(summary: &SimulationSummary) -> Result<()> {
    for pair in summary.steps.windows(2) {
        anyhow::ensure!(
            pair[1].pool_before + 1 == pair[0].pool_before,
            "Pool went from {} to {} at step {}",
            pair[0].pool_before,
            pair[1].pool_before,
            pair[1].step
        );
    }
    if let Some(step) = summary.steps.iter().find(|s| !s.defeat_idempotent) {
        anyhow::bail!("Marking {} was not idempotent", step.boss.id);
    }
    Ok(())
}

pub fn completion_expectation(summary: &SimulationSummary) -> Result<()> {
    anyhow::ensure!(summary.completed, "Run did not exhaust the roster");
    anyhow::ensure!(
        summary.steps.len() == summary.roster_len(),
        "Run took {} steps for {} bosses",
        summary.steps.len(),
        summary.roster_len()
    );
    Ok(())
}

pub fn convergence_expectation(summary: &SimulationSummary) -> Result<()> {
    for step in &summary.steps {
        let converged = step.pool_before <= 1;
        anyhow::ensure!(
            step.converged_before == converged,
            "Convergence flag {} with {} bosses left",
            step.converged_before,
            step.pool_before
        );
        if converged {
            anyhow::ensure!(
                step.preview.0 == step.preview.1,
                "Converged branches disagree: {} vs {}",
                step.preview.0.id,
                step.preview.1.id
            );
            anyhow::ensure!(
                step.route == SelectionRoute::Converged,
                "Final pick used route {:?}",
                step.route
            );
            anyhow::ensure!(
                step.visualization.contains("FINAL BOSS"),
                "Visualization should name the final boss"
            );
        }
    }
    Ok(())
}

pub fn fallback_expectation(summary: &SimulationSummary) -> Result<()> {
    let first = summary
        .steps
        .first()
        .ok_or_else(|| anyhow::anyhow!("Fallback path produced no steps"))?;
    anyhow::ensure!(
        first.direction == Direction::Left,
        "Fallback scenario should request the left branch"
    );
    anyhow::ensure!(
        first.route == SelectionRoute::Fallback,
        "Expected fallback route, got {:?}",
        first.route
    );
    anyhow::ensure!(
        first.boss.affinity == Direction::Right,
        "Exhausted left branch returned {}",
        first.boss.id
    );
    Ok(())
}

pub fn roundtrip_expectation(summary: &SimulationSummary) -> Result<()> {
    if let Some(step) = summary.steps.iter().find(|s| !s.roundtrip_stable) {
        anyhow::bail!("Snapshot reload changed the preview at step {}", step.step);
    }
    Ok(())
}

pub fn unique_bosses_expectation(summary: &SimulationSummary) -> Result<()> {
    let mut seen = HashSet::new();
    for step in &summary.steps {
        anyhow::ensure!(
            seen.insert(step.boss.id.as_str()),
            "Boss {} was selected twice",
            step.boss.id
        );
    }
    Ok(())
}

pub fn visualization_expectation(summary: &SimulationSummary) -> Result<()> {
    let header = format!("[SEED: {}]", summary.seed);
    for step in &summary.steps {
        anyhow::ensure!(
            step.visualization.starts_with(&header),
            "Visualization header missing at step {}",
            step.step
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{BranchStrategy, PathTester, SimulationPlan};

    fn summary(strategy: BranchStrategy) -> SimulationSummary {
        PathTester::new(false)
            .run_plan(&SimulationPlan::new(strategy), "PROP01", 3)
            .unwrap()
    }

    #[test]
    fn full_runs_satisfy_every_property() {
        for strategy in [
            BranchStrategy::AlwaysLeft,
            BranchStrategy::AlwaysRight,
            BranchStrategy::Alternating,
            BranchStrategy::Random,
        ] {
            let s = summary(strategy);
            replay_expectation(&s).unwrap();
            purity_expectation(&s).unwrap();
            shrinkage_expectation(&s).unwrap();
            completion_expectation(&s).unwrap();
            convergence_expectation(&s).unwrap();
            roundtrip_expectation(&s).unwrap();
            unique_bosses_expectation(&s).unwrap();
            visualization_expectation(&s).unwrap();
        }
    }

    #[test]
    fn expectations_report_violations() {
        let mut s = summary(BranchStrategy::Random);
        s.replay_matches = false;
        assert!(replay_expectation(&s).is_err());
        s.steps[2].boss = s.steps[1].boss.clone();
        assert!(unique_bosses_expectation(&s).is_err());
        s.steps.truncate(3);
        assert!(completion_expectation(&s).is_err());
        assert!(fallback_expectation(&s).is_err());
    }
}
