use crate::model::builder::mass_fractions;
use crate::model::params::{ParamName, ParameterSet};
use anyhow::{bail, Result};
use serde::Deserialize;
use statrs::distribution::{Continuous, Uniform};
use std::collections::BTreeMap;
use tracing::warn;

/// Log prior density over a parameter set. May return `-inf`.
pub trait Prior {
    fn ln_prior(&self, params: &ParameterSet) -> f64;
}

impl<F> Prior for F
where
    F: Fn(&ParameterSet) -> f64,
{
    fn ln_prior(&self, params: &ParameterSet) -> f64 {
        self(params)
    }
}

/// Independent uniform priors on the varied parameters, plus the physical
/// constraints that the derived third mass fraction lies in `[0, 1]` and the
/// inner radius stays inside the characteristic radius.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UniformBoxPrior {
    #[serde(default = "default_bounds")]
    bounds: BTreeMap<ParamName, (f64, f64)>,
}

impl Default for UniformBoxPrior {
    fn default() -> Self {
        Self {
            bounds: default_bounds(),
        }
    }
}

impl UniformBoxPrior {
    pub fn new(bounds: BTreeMap<ParamName, (f64, f64)>) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &BTreeMap<ParamName, (f64, f64)> {
        &self.bounds
    }

    /// Replaces the bounds of one parameter.
    pub fn with_bounds(mut self, name: ParamName, lo: f64, hi: f64) -> Self {
        self.bounds.insert(name, (lo, hi));
        self
    }

    /// Checks that every interval is finite and non-empty.
    pub fn validate(&self) -> Result<()> {
        for (name, &(lo, hi)) in &self.bounds {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                bail!("prior bounds for '{}' must satisfy lo < hi, got [{}, {}]", name, lo, hi);
            }
        }
        Ok(())
    }
}

impl Prior for UniformBoxPrior {
    fn ln_prior(&self, params: &ParameterSet) -> f64 {
        let mut ln_p = 0.0;
        for (name, value) in params.iter() {
            if !value.is_finite() {
                return f64::NEG_INFINITY;
            }
            let Some(&(lo, hi)) = self.bounds.get(&name) else {
                continue;
            };
            // statrs accepts lo == hi, whose density is infinite
            if !(lo < hi) {
                warn!(parameter = %name, lo, hi, "empty prior interval");
                return f64::NEG_INFINITY;
            }
            match Uniform::new(lo, hi) {
                Ok(dist) => ln_p += dist.ln_pdf(value),
                Err(e) => {
                    warn!(parameter = %name, lo, hi, error = %e, "invalid prior bounds");
                    return f64::NEG_INFINITY;
                }
            }
        }

        let [_, _, f2] = mass_fractions(params);
        if !(0.0..=1.0).contains(&f2) {
            return f64::NEG_INFINITY;
        }
        if params.resolve(ParamName::InnerRadius) >= params.resolve(ParamName::CharacteristicRadius) {
            return f64::NEG_INFINITY;
        }
        ln_p
    }
}

fn default_bounds() -> BTreeMap<ParamName, (f64, f64)> {
    BTreeMap::from([
        (ParamName::Inclination, (0.0, 90.0)),
        (ParamName::PositionAngle, (0.0, 180.0)),
        (ParamName::LogDiskMass, (-12.0, -3.0)),
        (ParamName::CharacteristicRadius, (1.0, 150.0)),
        (ParamName::InnerRadius, (0.1, 150.0)),
        (ParamName::AlphaIn, (0.0, 20.0)),
        (ParamName::AlphaOut, (-20.0, 0.0)),
        (ParamName::Porosity, (0.0, 1.0)),
        (ParamName::MassFraction0, (0.0, 1.0)),
        (ParamName::MassFraction1, (0.0, 1.0)),
        (ParamName::MinGrainSize, (0.01, 100.0)),
        (ParamName::PowerLawIndex, (2.0, 7.0)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_bounds_is_finite() {
        let prior = UniformBoxPrior::default();
        let params = ParameterSet::from_names_values(&["inc", "porosity"], &[60.0, 0.5]).unwrap();
        let ln_p = prior.ln_prior(&params);
        assert!(ln_p.is_finite());
        assert!((ln_p - (-(90.0f64).ln() - 1.0f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_outside_bounds_is_rejected() {
        let prior = UniformBoxPrior::default();
        let params = ParameterSet::from_names_values(&["inc"], &[95.0]).unwrap();
        assert_eq!(prior.ln_prior(&params), f64::NEG_INFINITY);
    }

    #[test]
    fn test_mass_fraction_overflow_is_rejected() {
        let prior = UniformBoxPrior::default();
        let params = ParameterSet::from_names_values(&["fmass_0", "fmass_1"], &[0.7, 0.6]).unwrap();
        assert_eq!(prior.ln_prior(&params), f64::NEG_INFINITY);
    }

    #[test]
    fn test_inner_radius_beyond_rc_is_rejected() {
        let prior = UniformBoxPrior::default();
        let params = ParameterSet::from_names_values(&["R_in", "Rc"], &[50.0, 40.0]).unwrap();
        assert_eq!(prior.ln_prior(&params), f64::NEG_INFINITY);
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let prior = UniformBoxPrior::default();
        // Deserialized sets do not pass through `insert`
        for value in ["nan", "inf"] {
            let params: ParameterSet = toml::from_str(&format!("entries = [[\"inc\", {}]]", value)).unwrap();
            assert_eq!(prior.ln_prior(&params), f64::NEG_INFINITY);
        }
    }

    #[test]
    fn test_validate_bounds() {
        assert!(UniformBoxPrior::default().validate().is_ok());
        let empty = UniformBoxPrior::default().with_bounds(ParamName::CharacteristicRadius, 10.0, 10.0);
        assert!(empty.validate().is_err());
        let reversed = UniformBoxPrior::default().with_bounds(ParamName::CharacteristicRadius, 10.0, 5.0);
        assert!(reversed.validate().is_err());
    }

    #[test]
    fn test_degenerate_bounds_reject() {
        let prior = UniformBoxPrior::default().with_bounds(ParamName::PositionAngle, 10.0, 10.0);
        let params = ParameterSet::from_names_values(&["PA"], &[10.0]).unwrap();
        assert_eq!(prior.ln_prior(&params), f64::NEG_INFINITY);
    }
}
