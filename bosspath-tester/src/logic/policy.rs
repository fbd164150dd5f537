use std::fmt;

use bosspath_game::{Direction, PathEngine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Decision returned by a [`BranchPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchDecision {
    pub direction: Direction,
}

/// Policy interface for automated branch choices.
pub trait BranchPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick the branch to take at `step`.
    fn pick_branch(&mut self, engine: &PathEngine, step: usize) -> BranchDecision;
}

/// Built-in branch strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchStrategy {
    AlwaysLeft,
    AlwaysRight,
    Alternating,
    Random,
}

impl BranchStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AlwaysLeft => "Always Left",
            Self::AlwaysRight => "Always Right",
            Self::Alternating => "Alternating",
            Self::Random => "Random",
        }
    }

    #[must_use]
    pub fn create_policy(self, rng_seed: u64) -> Box<dyn BranchPolicy + Send> {
        match self {
            Self::AlwaysLeft => Box::new(FixedPolicy(Direction::Left)),
            Self::AlwaysRight => Box::new(FixedPolicy(Direction::Right)),
            Self::Alternating => Box::new(AlternatingPolicy),
            Self::Random => Box::new(RandomPolicy {
                rng: ChaCha20Rng::seed_from_u64(rng_seed),
            }),
        }
    }
}

impl fmt::Display for BranchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct FixedPolicy(Direction);
struct AlternatingPolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl BranchPolicy for FixedPolicy {
    fn name(&self) -> &'static str {
        match self.0 {
            Direction::Left => "AlwaysLeft",
            Direction::Right => "AlwaysRight",
        }
    }

    fn pick_branch(&mut self, _engine: &PathEngine, _step: usize) -> BranchDecision {
        BranchDecision { direction: self.0 }
    }
}

impl BranchPolicy for AlternatingPolicy {
    fn name(&self) -> &'static str {
        "Alternating"
    }

    fn pick_branch(&mut self, _engine: &PathEngine, step: usize) -> BranchDecision {
        BranchDecision {
            direction: Direction::from_is_left(step % 2 == 0),
        }
    }
}

impl BranchPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn pick_branch(&mut self, _engine: &PathEngine, _step: usize) -> BranchDecision {
        BranchDecision {
            direction: Direction::from_is_left(self.rng.gen_bool(0.5)),
        }
    }
}
