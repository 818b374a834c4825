// src/model/system.rs

use serde::Deserialize;

/// Constants of the modelled star + disk system that the sampler never varies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Distance to the system (pc)
    pub distance: f64,
    /// Radial grid resolution
    pub n_rad: u32,

    pub gas_to_dust_ratio: f64,
    /// Reference radius of the density profile (au)
    pub reference_radius: f64,
    /// Scale height at the reference radius (au)
    pub scale_height: f64,
    pub vertical_profile_exponent: f64,

    pub grain_type: String,
    /// Maximum grain size (um)
    pub amax: f64,
    /// Optical index files, one per grain species
    pub optical_indices_files: Vec<String>,

    pub star_temp: f64,
    pub star_radius: f64,
    pub star_mass: f64,
    pub star_f_uv: f64,

    /// Angular resolution used to size the outer halo ("/px)
    pub halo_resolution: f64,
    /// Outer radius in units of `halo_resolution * distance`
    pub halo_extent_factor: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::hd191089()
    }
}

impl SystemConfig {
    /// HD 191089, observed with HST/STIS, HST/NICMOS and Gemini/GPI.
    pub fn hd191089() -> Self {
        Self {
            distance: 50.14,
            n_rad: 35,
            gas_to_dust_ratio: 0.0,
            reference_radius: 45.3,
            scale_height: 1.812,
            vertical_profile_exponent: 2.0,
            grain_type: "Mie".to_string(),
            amax: 1e3,
            optical_indices_files: vec![
                "dlsi_opct.dat".to_string(),
                "ac_opct.dat".to_string(),
                "ice_opct.dat".to_string(),
            ],
            star_temp: 6440.0,
            star_radius: 1.4,
            star_mass: 1.4,
            star_f_uv: 0.03,
            halo_resolution: 0.05078,
            halo_extent_factor: 130.0,
        }
    }

    /// Number of grain species the model carries.
    pub fn n_species(&self) -> usize {
        self.optical_indices_files.len()
    }

    /// Outer edge of the disk halo (au), rounded to three decimals.
    pub fn outer_radius(&self) -> f64 {
        crate::model::params::round3(self.halo_extent_factor * self.halo_resolution * self.distance)
    }
}
