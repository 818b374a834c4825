use crate::run::identity::RunIdentity;
use anyhow::Result;
use std::path::Path;

/// Compares a finished model run against the observations.
///
/// `model_output` is the run's working directory. An `Err` means the model
/// output could not be read or compared.
pub trait Likelihood {
    fn ln_likelihood(
        &self,
        observations: &Path,
        model_output: &Path,
        identity: Option<&RunIdentity>,
    ) -> Result<f64>;
}

impl<F> Likelihood for F
where
    F: Fn(&Path, &Path, Option<&RunIdentity>) -> Result<f64>,
{
    fn ln_likelihood(
        &self,
        observations: &Path,
        model_output: &Path,
        identity: Option<&RunIdentity>,
    ) -> Result<f64> {
        self(observations, model_output, identity)
    }
}
