pub mod path_tester;
pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;
pub mod tester;

pub use path_tester::{PathTester, SimulationPlan, SimulationSummary};
pub use policy::BranchStrategy;
pub use seeds::{SeedInfo, resolve_seed_inputs};
pub use tester::*;
