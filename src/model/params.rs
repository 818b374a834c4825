// src/model/params.rs

//! Variable-parameter vocabulary and sparse parameter sets
//!
//! A sampler only varies a subset of the twelve model parameters. Anything it
//! leaves out is filled from [`ParamName::default_value`], and every resolved
//! value is rounded to three decimals before it reaches the simulator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while turning sampler input into a parameter set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid parameter name '{0}'")]
    UnknownParameter(String),

    #[error("got {names} parameter names but {values} values")]
    LengthMismatch { names: usize, values: usize },

    #[error("parameter '{0}' given more than once")]
    DuplicateParameter(ParamName),

    #[error("parameter '{0}' has non-finite value {1}")]
    NonFiniteValue(ParamName, f64),

    #[error("the grain model needs exactly 3 species, system config lists {0}")]
    SpeciesCount(usize),
}

/// The fixed vocabulary of variable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParamName {
    /// Inclination (deg), observer convention
    #[serde(rename = "inc")]
    Inclination,
    /// Position angle (deg), observer convention
    #[serde(rename = "PA")]
    PositionAngle,
    /// log10 of the dust mass (Msun)
    #[serde(rename = "m_disk")]
    LogDiskMass,
    /// Characteristic radius (au)
    #[serde(rename = "Rc")]
    CharacteristicRadius,
    /// Inner radius (au)
    #[serde(rename = "R_in")]
    InnerRadius,
    #[serde(rename = "alpha_in")]
    AlphaIn,
    #[serde(rename = "alpha_out")]
    AlphaOut,
    #[serde(rename = "porosity")]
    Porosity,
    /// Mass fraction of the first grain species
    #[serde(rename = "fmass_0")]
    MassFraction0,
    /// Mass fraction of the second grain species
    #[serde(rename = "fmass_1")]
    MassFraction1,
    /// Minimum grain size (um)
    #[serde(rename = "a_min")]
    MinGrainSize,
    /// Grain-size power-law index
    #[serde(rename = "Q_powerlaw")]
    PowerLawIndex,
}

impl ParamName {
    /// Every parameter, in canonical order.
    pub const ALL: [ParamName; 12] = [
        ParamName::Inclination,
        ParamName::PositionAngle,
        ParamName::LogDiskMass,
        ParamName::CharacteristicRadius,
        ParamName::InnerRadius,
        ParamName::AlphaIn,
        ParamName::AlphaOut,
        ParamName::Porosity,
        ParamName::MassFraction0,
        ParamName::MassFraction1,
        ParamName::MinGrainSize,
        ParamName::PowerLawIndex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamName::Inclination => "inc",
            ParamName::PositionAngle => "PA",
            ParamName::LogDiskMass => "m_disk",
            ParamName::CharacteristicRadius => "Rc",
            ParamName::InnerRadius => "R_in",
            ParamName::AlphaIn => "alpha_in",
            ParamName::AlphaOut => "alpha_out",
            ParamName::Porosity => "porosity",
            ParamName::MassFraction0 => "fmass_0",
            ParamName::MassFraction1 => "fmass_1",
            ParamName::MinGrainSize => "a_min",
            ParamName::PowerLawIndex => "Q_powerlaw",
        }
    }

    /// Value used whenever a parameter set does not override this name.
    pub fn default_value(&self) -> f64 {
        match self {
            ParamName::Inclination => 59.7,
            ParamName::PositionAngle => 70.0,
            ParamName::LogDiskMass => -7.0,
            ParamName::CharacteristicRadius => 45.3,
            ParamName::InnerRadius => 20.0,
            ParamName::AlphaIn => 3.5,
            ParamName::AlphaOut => -5.0,
            ParamName::Porosity => 0.95,
            ParamName::MassFraction0 => 0.3,
            ParamName::MassFraction1 => 0.3,
            ParamName::MinGrainSize => 1.0,
            ParamName::PowerLawIndex => 3.5,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamName::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ModelError::UnknownParameter(s.to_string()))
    }
}

/// Rounds to three decimal digits.
pub fn round3(x: f64) -> f64 {
    libm::round(x * 1000.0) / 1000.0
}

/// Ordered, sparse pairing of parameter names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    entries: Vec<(ParamName, f64)>,
}

impl ParameterSet {
    /// An empty set: every parameter resolves to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from the sampler's parallel name/value arrays.
    pub fn from_names_values<S: AsRef<str>>(names: &[S], values: &[f64]) -> Result<Self, ModelError> {
        if names.len() != values.len() {
            return Err(ModelError::LengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        let mut set = Self::new();
        for (name, &value) in names.iter().zip(values) {
            set.insert(name.as_ref().parse()?, value)?;
        }
        Ok(set)
    }

    /// Adds an override; a name may only be given once and the value must be finite.
    pub fn insert(&mut self, name: ParamName, value: f64) -> Result<(), ModelError> {
        if !value.is_finite() {
            return Err(ModelError::NonFiniteValue(name, value));
        }
        if self.get(name).is_some() {
            return Err(ModelError::DuplicateParameter(name));
        }
        self.entries.push((name, value));
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: ParamName, value: f64) -> Result<Self, ModelError> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// The raw override for `name`, if any.
    pub fn get(&self, name: ParamName) -> Option<f64> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// Override or default for `name`, rounded to three decimals.
    pub fn resolve(&self, name: ParamName) -> f64 {
        round3(self.get(name).unwrap_or_else(|| name.default_value()))
    }

    /// Resolved values for the whole vocabulary, in [`ParamName::ALL`] order.
    pub fn resolved(&self) -> [f64; 12] {
        let mut out = [0.0; 12];
        for name in ParamName::ALL {
            out[name.index()] = self.resolve(name);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamName, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }
}
