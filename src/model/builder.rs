// src/model/builder.rs

//! Parameter set to MCFOST configuration
//!
//! [`ModelBuilder::build`] starts from the parameter-file template, pins the
//! system constants and then resolves every variable parameter (override or
//! default, rounded to three decimals) into its place in the file, applying
//! the convention conversions the simulator expects:
//!
//! - inclination is stored as `180 - inc`
//! - position angle is stored as `90 - PA`
//! - dust mass is stored linearly as `10^m_disk`
//! - the third grain species takes `1 - fmass_0 - fmass_1`
//! - porosity, `a_min` and the size power law apply to all three species

use crate::mcfost::params::McfostParams;
use crate::model::instrument::{specialize_for_instrument, Instrument, InstrumentModel};
use crate::model::params::{round3, ModelError, ParamName, ParameterSet};
use crate::model::system::SystemConfig;

/// Builds simulator configurations for one fixed star + disk system.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    system: SystemConfig,
}

impl ModelBuilder {
    pub fn new(system: SystemConfig) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &SystemConfig {
        &self.system
    }

    /// Instrument-independent configuration for `params`.
    pub fn build(&self, params: &ParameterSet) -> Result<McfostParams, ModelError> {
        let sys = &self.system;
        if sys.n_species() != 3 {
            return Err(ModelError::SpeciesCount(sys.n_species()));
        }

        let mut model = McfostParams::template(1, &[sys.n_species()], 1);

        model.grid.n_rad = sys.n_rad;
        model.maps.distance = sys.distance;

        let zone = &mut model.zones[0];
        zone.density.gas_to_dust_ratio = sys.gas_to_dust_ratio;
        zone.density.reference_radius = sys.reference_radius;
        zone.density.scale_height = sys.scale_height;
        zone.density.vertical_profile_exponent = sys.vertical_profile_exponent;

        for (species, file) in zone.species.iter_mut().zip(&sys.optical_indices_files) {
            species.grain_type = sys.grain_type.clone();
            species.amax = sys.amax;
            species.optical_indices_file = file.clone();
        }

        let star = &mut model.stars[0];
        star.temp = sys.star_temp;
        star.radius = sys.star_radius;
        star.mass = sys.star_mass;
        star.f_uv = sys.star_f_uv;

        for name in ParamName::ALL {
            let value = params.resolve(name);
            self.apply(&mut model, name, value, params);
        }

        Ok(model)
    }

    fn apply(&self, model: &mut McfostParams, name: ParamName, value: f64, params: &ParameterSet) {
        match name {
            ParamName::Inclination => {
                let inc = round3(180.0 - value);
                model.maps.imin = inc;
                model.maps.imax = inc;
            }
            ParamName::PositionAngle => {
                model.maps.disk_pa = round3(90.0 - value);
            }
            ParamName::LogDiskMass => {
                model.zones[0].density.dust_mass = libm::exp10(value);
            }
            ParamName::CharacteristicRadius => {
                let density = &mut model.zones[0].density;
                density.r_c = value;
                density.r_out = self.system.outer_radius();
            }
            ParamName::InnerRadius => model.zones[0].density.r_in = value,
            ParamName::AlphaIn => model.zones[0].density.alpha_in = value,
            ParamName::AlphaOut => model.zones[0].density.alpha_out = value,
            ParamName::Porosity => {
                for species in model.species_mut() {
                    species.porosity = value;
                }
            }
            ParamName::MassFraction0 => {
                let [f0, f1, f2] = mass_fractions(params);
                let species = &mut model.zones[0].species;
                species[0].mass_fraction = f0;
                species[1].mass_fraction = f1;
                species[2].mass_fraction = f2;
            }
            // Written together with MassFraction0
            ParamName::MassFraction1 => {}
            ParamName::MinGrainSize => {
                for species in model.species_mut() {
                    species.amin = value;
                }
            }
            ParamName::PowerLawIndex => {
                for species in model.species_mut() {
                    species.aexp = value;
                }
            }
        }
    }

    /// One configuration per instrument, derived from a single base model.
    pub fn variants(&self, params: &ParameterSet) -> Result<Vec<InstrumentModel>, ModelError> {
        let base = self.build(params)?;
        Ok(Instrument::ALL
            .iter()
            .map(|instrument| specialize_for_instrument(&base, instrument))
            .collect())
    }
}

/// Resolved mass fractions of the three grain species. The third is derived
/// so that the triplet sums to one.
pub fn mass_fractions(params: &ParameterSet) -> [f64; 3] {
    let f0 = params.resolve(ParamName::MassFraction0);
    let f1 = params.resolve(ParamName::MassFraction1);
    [f0, f1, round3(1.0 - f0 - f1)]
}
