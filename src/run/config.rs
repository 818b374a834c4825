use crate::model::system::SystemConfig;
use crate::posterior::prior::UniformBoxPrior;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// How the external simulator is invoked and where its runs live.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunnerConfig {
    /// Simulator executable, resolved through `PATH` when relative
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// Default run root when the caller does not pass one
    #[serde(default = "default_run_root")]
    pub run_root: PathBuf,

    /// Stem of the per-instrument parameter files (`<stem>_<instrument>.para`)
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Append a random salt to run identities so that walkers evaluating the
    /// same point never share a directory
    #[serde(default = "default_salt_identity")]
    pub salt_identity: bool,

    /// Extra environment for the simulator process (e.g. `MCFOST_UTILS`)
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            run_root: default_run_root(),
            file_stem: default_file_stem(),
            salt_identity: default_salt_identity(),
            env: BTreeMap::new(),
        }
    }
}

/// Complete configuration: system constants, runner settings and prior bounds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FmConfig {
    #[serde(default)]
    pub system: SystemConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub prior: UniformBoxPrior,
}

impl FmConfig {
    /// Salted run identities, suitable for many concurrent walkers.
    pub fn production() -> Self {
        Self::default()
    }

    /// Unsalted run identities: the same parameters always map to the same
    /// run directory. Only safe with a single walker.
    pub fn reproducible() -> Self {
        Self {
            runner: RunnerConfig {
                salt_identity: false,
                ..RunnerConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid configuration")?;
        config.prior.validate().context("invalid prior section")?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

fn default_program() -> PathBuf {
    PathBuf::from("mcfost")
}

fn default_run_root() -> PathBuf {
    PathBuf::from("./mcfost_models")
}

fn default_file_stem() -> String {
    "hd191089".to_string()
}

fn default_salt_identity() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::params::ParamName;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let cfg = FmConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, FmConfig::default());
        assert_eq!(cfg.system.distance, 50.14);
        assert!(cfg.runner.salt_identity);
    }

    #[test]
    fn test_partial_override() {
        let cfg = FmConfig::from_toml_str(
            r#"
            [system]
            distance = 60.0

            [runner]
            program = "/opt/mcfost/bin/mcfost"
            salt_identity = false

            [runner.env]
            MCFOST_UTILS = "/opt/mcfost/utils"

            [prior.bounds]
            inc = [40.0, 80.0]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.system.distance, 60.0);
        assert_eq!(cfg.system.n_rad, 35);
        assert_eq!(cfg.runner.program, PathBuf::from("/opt/mcfost/bin/mcfost"));
        assert_eq!(cfg.runner.file_stem, "hd191089");
        assert!(!cfg.runner.salt_identity);
        assert_eq!(cfg.runner.env["MCFOST_UTILS"], "/opt/mcfost/utils");
        assert_eq!(cfg.prior.bounds()[&ParamName::Inclination], (40.0, 80.0));
    }

    #[test]
    fn test_unknown_parameter_in_prior_is_rejected() {
        let result = FmConfig::from_toml_str("[prior.bounds]\neccentricity = [0.0, 1.0]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_prior_interval_is_rejected() {
        let result = FmConfig::from_toml_str("[prior.bounds]\nRc = [45.0, 45.0]\n");
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Rc"));
    }

    #[test]
    fn test_reproducible_preset() {
        assert!(!FmConfig::reproducible().runner.salt_identity);
        assert!(FmConfig::production().runner.salt_identity);
    }
}
