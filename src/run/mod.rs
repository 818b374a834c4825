pub mod config;
pub mod identity;
pub mod runner;
pub mod simulator;
pub mod workspace;

pub use config::{FmConfig, RunnerConfig};
pub use identity::RunIdentity;
pub use runner::{RunError, RunManager, RunOutcome, RunRequest, IMAGE_STAGE_FAILURE};
pub use simulator::{McfostCli, Simulator};
pub use workspace::{SED_ARTIFACT, SED_OUTPUT_DIR};
