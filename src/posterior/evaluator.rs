// src/posterior/evaluator.rs

//! Log-posterior evaluation
//!
//! `ln_post = ln_prior + ln_likelihood`, with every failure mapped to `-inf`
//! so a sampler always receives a real number. [`PosteriorEvaluator::evaluate_detailed`]
//! keeps the failure kinds apart for callers that want to know why a point
//! was rejected.

use crate::model::params::{ModelError, ParameterSet};
use crate::posterior::likelihood::Likelihood;
use crate::posterior::prior::Prior;
use crate::run::identity::RunIdentity;
use crate::run::runner::{RunError, RunManager, RunRequest};
use crate::run::simulator::Simulator;
use crate::run::workspace;
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a point was rejected.
#[derive(Error, Debug)]
pub enum PosteriorError {
    #[error(transparent)]
    InvalidParameters(#[from] ModelError),

    #[error("prior rejected the point (ln_prior = {0})")]
    PriorRejection(f64),

    #[error("run could not be set up: {0}")]
    RunSetup(#[source] RunError),

    #[error("simulator reported {failures} failure(s) in {}", .workdir.display())]
    SimulatorFailure { failures: u32, workdir: PathBuf },

    #[error("likelihood evaluation failed: {0:#}")]
    LikelihoodFailure(anyhow::Error),
}

/// A successfully evaluated point.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    pub ln_prior: f64,
    pub ln_likelihood: f64,
    pub ln_post: f64,
    pub identity: Option<RunIdentity>,
    pub workdir: PathBuf,
}

/// Combines a prior, the simulator runs and a likelihood into a log-posterior.
pub struct PosteriorEvaluator<P, L, S> {
    prior: P,
    likelihood: L,
    runner: RunManager<S>,
}

impl<P, L, S> PosteriorEvaluator<P, L, S>
where
    P: Prior,
    L: Likelihood,
    S: Simulator,
{
    pub fn new(prior: P, likelihood: L, runner: RunManager<S>) -> Self {
        Self {
            prior,
            likelihood,
            runner,
        }
    }

    pub fn runner(&self) -> &RunManager<S> {
        &self.runner
    }

    /// Sampler-facing objective: parallel value/name arrays in, a real number
    /// out. Every failure becomes `-inf`.
    pub fn lnpost<N: AsRef<str>>(
        &self,
        values: &[f64],
        names: &[N],
        observations: &Path,
        model_path: &Path,
        compute_sed: bool,
        isolate: bool,
    ) -> f64 {
        let params = match ParameterSet::from_names_values(names, values) {
            Ok(params) => params,
            Err(e) => {
                warn!(error = %e, "rejecting point with invalid parameters");
                return f64::NEG_INFINITY;
            }
        };
        self.evaluate(&params, observations, model_path, compute_sed, isolate)
    }

    /// Log-posterior of `params`, or `-inf` on any failure.
    pub fn evaluate(
        &self,
        params: &ParameterSet,
        observations: &Path,
        model_path: &Path,
        compute_sed: bool,
        isolate: bool,
    ) -> f64 {
        match self.evaluate_detailed(params, observations, model_path, compute_sed, isolate) {
            Ok(posterior) => posterior.ln_post,
            Err(PosteriorError::PriorRejection(_)) => f64::NEG_INFINITY,
            Err(e) => {
                warn!(error = %e, "point rejected");
                f64::NEG_INFINITY
            }
        }
    }

    /// Like [`evaluate`](Self::evaluate) but reports why a point was rejected.
    /// Failed runs have their working directory removed before returning.
    pub fn evaluate_detailed(
        &self,
        params: &ParameterSet,
        observations: &Path,
        model_path: &Path,
        compute_sed: bool,
        isolate: bool,
    ) -> Result<Posterior, PosteriorError> {
        let ln_prior = self.prior.ln_prior(params);
        if !ln_prior.is_finite() {
            debug!(ln_prior, "prior rejected point, skipping simulator");
            return Err(PosteriorError::PriorRejection(ln_prior));
        }

        let request = RunRequest {
            compute_sed,
            compute_images: true,
            isolate,
        };
        let outcome = match self.runner.execute(params, model_path, request) {
            Ok(outcome) => outcome,
            Err(RunError::Model(e)) => return Err(PosteriorError::InvalidParameters(e)),
            Err(e) => {
                // Isolated directories are already gone; a shared root is not
                if !isolate {
                    workspace::remove_run_dir(model_path);
                }
                return Err(PosteriorError::RunSetup(e));
            }
        };

        if !outcome.is_success() {
            workspace::remove_run_dir(&outcome.workdir);
            return Err(PosteriorError::SimulatorFailure {
                failures: outcome.failures,
                workdir: outcome.workdir,
            });
        }

        let ln_likelihood = self
            .likelihood
            .ln_likelihood(observations, &outcome.workdir, outcome.identity.as_ref())
            .and_then(|v| {
                if v.is_nan() {
                    Err(anyhow!("likelihood is NaN"))
                } else {
                    Ok(v)
                }
            });

        match ln_likelihood {
            Ok(ln_likelihood) => Ok(Posterior {
                ln_prior,
                ln_likelihood,
                ln_post: ln_prior + ln_likelihood,
                identity: outcome.identity,
                workdir: outcome.workdir,
            }),
            Err(e) => {
                workspace::remove_run_dir(&outcome.workdir);
                Err(PosteriorError::LikelihoodFailure(e))
            }
        }
    }
}
