// src/run/runner.rs

//! Simulator run orchestration
//!
//! One call to [`RunManager::execute`] walks a fixed sequence:
//!
//! 1. prepare the run root (create it, or clear stale image output)
//! 2. optionally create an isolated directory keyed by [`RunIdentity`] and,
//!    for image-only runs, link the shared SED artifact into it
//! 3. write the three per-instrument parameter files
//! 4. optional SED stage (one invocation)
//! 5. optional image stage (one invocation per instrument)
//!
//! Every simulator failure is folded into a failure count instead of an
//! error, so a failing SED stage still lets the image stage run. Only
//! failures to set up the directory are returned as [`RunError`].
//!
//! The working directory is passed to each invocation explicitly, so the
//! process-wide current directory is never touched.

use crate::model::builder::ModelBuilder;
use crate::model::instrument::{Instrument, InstrumentModel};
use crate::model::params::{ModelError, ParameterSet};
use crate::run::config::{FmConfig, RunnerConfig};
use crate::run::identity::RunIdentity;
use crate::run::simulator::{McfostCli, Simulator};
use crate::run::workspace::{self, SED_OUTPUT_DIR};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

/// Failure count charged when the image stage cannot run at all: one per instrument.
pub const IMAGE_STAGE_FAILURE: u32 = Instrument::ALL.len() as u32;

/// Failures that prevent a run from being set up.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("run directory I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("no shared SED artifact in {0}; run once with SED computation enabled")]
    MissingSedArtifact(PathBuf),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("{0:#}")]
    ParaFile(#[from] anyhow::Error),
}

/// Which stages to run and whether to isolate the run directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    pub compute_sed: bool,
    pub compute_images: bool,
    pub isolate: bool,
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            compute_sed: false,
            compute_images: true,
            isolate: true,
        }
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Accumulated failure count; 0 means every requested stage succeeded
    pub failures: u32,
    /// Present when the run was isolated
    pub identity: Option<RunIdentity>,
    /// Directory holding this run's parameter files and output
    pub workdir: PathBuf,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }
}

/// Drives the simulator for one parameter set at a time.
pub struct RunManager<S> {
    config: RunnerConfig,
    builder: ModelBuilder,
    simulator: S,
}

impl RunManager<McfostCli> {
    /// Manager invoking the configured MCFOST executable.
    pub fn from_config(config: &FmConfig) -> Self {
        let simulator = McfostCli::new(&config.runner.program).with_env(config.runner.env.clone());
        Self::new(config.runner.clone(), ModelBuilder::new(config.system.clone()), simulator)
    }
}

impl<S: Simulator> RunManager<S> {
    pub fn new(config: RunnerConfig, builder: ModelBuilder, simulator: S) -> Self {
        Self {
            config,
            builder,
            simulator,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn builder(&self) -> &ModelBuilder {
        &self.builder
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    /// Identity for `params`, salted when the configuration asks for it.
    pub fn identity_for(&self, params: &ParameterSet) -> RunIdentity {
        if self.config.salt_identity {
            RunIdentity::salted(params)
        } else {
            RunIdentity::from_params(params, None)
        }
    }

    /// Runs the requested stages for `params` under `run_root`.
    pub fn execute(
        &self,
        params: &ParameterSet,
        run_root: &Path,
        request: RunRequest,
    ) -> Result<RunOutcome, RunError> {
        let variants = self.builder.variants(params)?;
        let identity = request.isolate.then(|| self.identity_for(params));

        let span = info_span!(
            "run",
            id = identity.as_ref().map(|i| i.as_str()).unwrap_or("shared")
        );
        let _guard = span.enter();

        workspace::prepare_run_root(run_root)?;

        let workdir = match &identity {
            Some(id) => {
                let dir = workspace::create_isolated_dir(run_root, id)?;
                if let Err(e) = self.populate_isolated(run_root, &dir, &variants, request) {
                    workspace::remove_run_dir(&dir);
                    return Err(e);
                }
                dir
            }
            None => {
                if request.compute_images && !request.compute_sed && !workspace::has_sed_artifact(run_root) {
                    return Err(RunError::MissingSedArtifact(run_root.to_path_buf()));
                }
                self.write_variants(run_root, &variants)?;
                run_root.to_path_buf()
            }
        };

        let mut failures = 0;
        if request.compute_sed {
            failures += self.run_sed(&workdir);
        }
        if request.compute_images {
            failures = failures.saturating_add(self.run_images(&workdir));
        }

        if failures == 0 {
            info!(workdir = %workdir.display(), "run finished");
        } else {
            warn!(failures, workdir = %workdir.display(), "run finished with failures");
        }

        Ok(RunOutcome {
            failures,
            identity,
            workdir,
        })
    }

    fn populate_isolated(
        &self,
        run_root: &Path,
        dir: &Path,
        variants: &[InstrumentModel],
        request: RunRequest,
    ) -> Result<(), RunError> {
        if request.compute_images && !request.compute_sed {
            workspace::link_sed_artifacts(run_root, dir)?;
        }
        self.write_variants(dir, variants)
    }

    fn write_variants(&self, dir: &Path, variants: &[InstrumentModel]) -> Result<(), RunError> {
        for variant in variants {
            let path = dir.join(variant.instrument.para_file(&self.config.file_stem));
            variant.params.write_para(&path)?;
            debug!(file = %path.display(), "wrote parameter file");
        }
        Ok(())
    }

    fn run_sed(&self, workdir: &Path) -> u32 {
        let sed_output = workdir.join(SED_OUTPUT_DIR);
        if sed_output.exists() {
            if let Err(e) = fs::remove_dir_all(&sed_output) {
                warn!(error = %e, "SED calculation is not performed, could not clear previous SED output");
                return 1;
            }
        }

        let para = Instrument::SED.para_file(&self.config.file_stem);
        match self.simulator.invoke(workdir, &[para.as_str()]) {
            Ok(0) => {
                debug!("SED stage finished");
                0
            }
            Ok(code) => {
                warn!(code, "SED calculation failed, check for conflicting output folders");
                1
            }
            Err(e) => {
                warn!(error = %e, "SED calculation is not performed, simulator could not be run");
                1
            }
        }
    }

    fn run_images(&self, workdir: &Path) -> u32 {
        let mut failures: u32 = 0;
        for instrument in &Instrument::ALL {
            let para = instrument.para_file(&self.config.file_stem);
            match self
                .simulator
                .invoke(workdir, &[para.as_str(), "-img", instrument.wavelength_arg])
            {
                Ok(code) => {
                    if code != 0 {
                        warn!(instrument = instrument.name, code, "image calculation failed");
                    }
                    failures = failures.saturating_add(code.unsigned_abs());
                }
                Err(e) => {
                    warn!(
                        instrument = instrument.name,
                        error = %e,
                        "image calculation is not performed, simulator could not be run"
                    );
                    return failures.saturating_add(IMAGE_STAGE_FAILURE);
                }
            }
        }
        failures
    }
}
