//! # debris-disk-fm: MCMC log-posterior for MCFOST debris-disk models
//!
//! `debris-disk-fm` turns a sampler's parameter vector into a log-posterior
//! probability for a parametric debris-disk model. For each point it
//!
//! 1. evaluates a prior and stops early if the point is impossible,
//! 2. builds complete MCFOST parameter files for three instruments
//!    (HST/STIS, HST/NICMOS, Gemini/GPI) from one physical model,
//! 3. runs the simulator in an isolated directory keyed by a hash of the
//!    parameters, reusing the expensive SED computation across runs,
//! 4. hands the synthetic images to a likelihood function,
//!
//! and returns `ln_prior + ln_likelihood`, or `-inf` on any failure.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use debris_disk_fm::{default_configs, PosteriorEvaluator, RunIdentity, RunManager, UniformBoxPrior};
//! use std::path::Path;
//!
//! let config = default_configs::production();
//! let likelihood = |_obs: &Path, _model: &Path, _id: Option<&RunIdentity>| -> anyhow::Result<f64> {
//!     // Compare the images under `_model` with the observations here
//!     Ok(0.0)
//! };
//! let evaluator = PosteriorEvaluator::new(
//!     UniformBoxPrior::default(),
//!     likelihood,
//!     RunManager::from_config(&config),
//! );
//!
//! let ln_post = evaluator.lnpost(
//!     &[59.7, 70.0],
//!     &["inc", "PA"],
//!     Path::new("./observations"),
//!     Path::new("./mcfost_models"),
//!     false,
//!     true,
//! );
//! # let _ = ln_post;
//! ```
//!
//! ## Parameters
//!
//! The varied parameters are drawn from a fixed vocabulary
//! (`inc`, `PA`, `m_disk`, `Rc`, `R_in`, `alpha_in`, `alpha_out`, `porosity`,
//! `fmass_0`, `fmass_1`, `a_min`, `Q_powerlaw`); see [`ParamName`]. Names
//! that are not varied take their default values.
//!
//! ## Concurrency
//!
//! Evaluation is synchronous and blocking. Parallel samplers may call the
//! evaluator from many threads or processes at once as long as runs are
//! isolated: each run then writes only inside its own directory, and the
//! shared SED artifact is only ever read through links.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod mcfost;
pub mod model;
pub mod posterior;
pub mod run;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use mcfost::McfostParams;
pub use model::{
    specialize_for_instrument, Instrument, InstrumentModel, ModelBuilder, ModelError, ParamName,
    ParameterSet, SystemConfig,
};
pub use posterior::{Likelihood, Posterior, PosteriorError, PosteriorEvaluator, Prior, UniformBoxPrior};
pub use run::{
    FmConfig, McfostCli, RunError, RunIdentity, RunManager, RunOutcome, RunRequest, RunnerConfig,
    Simulator, IMAGE_STAGE_FAILURE,
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Configuration presets.
///
/// - [`production()`]: salted run identities, safe for many parallel walkers
/// - [`reproducible()`]: the same parameters always reuse the same directory
pub mod default_configs {
    use crate::run::config::FmConfig;

    /// HD 191089 with salted run identities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use debris_disk_fm::default_configs;
    ///
    /// let config = default_configs::production();
    /// assert!(config.runner.salt_identity);
    /// ```
    pub fn production() -> FmConfig {
        FmConfig::production()
    }

    /// HD 191089 with deterministic run identities. Only safe with a single
    /// walker, since identical points map to the same directory.
    pub fn reproducible() -> FmConfig {
        FmConfig::reproducible()
    }
}

/// Builds an evaluator that runs the configured MCFOST executable and uses
/// the configured uniform prior.
pub fn evaluator_from_config<L: Likelihood>(
    config: &FmConfig,
    likelihood: L,
) -> PosteriorEvaluator<UniformBoxPrior, L, McfostCli> {
    PosteriorEvaluator::new(config.prior.clone(), likelihood, RunManager::from_config(config))
}
