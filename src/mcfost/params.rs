// src/mcfost/params.rs

//! Typed MCFOST parameter-file model
//!
//! An MCFOST `.para` file is a sequence of `#`-headed sections, each holding
//! one parameter row per line. [`McfostParams`] mirrors that layout with one
//! struct per section so that every field the simulator reads is always
//! populated. Zones and stars are vectors because their count is part of the
//! file itself.
//!
//! [`McfostParams::template`] produces a complete configuration filled with
//! engineering defaults. Each call returns a freshly owned value, so callers
//! may mutate it freely without affecting any other template.

use serde::{Deserialize, Serialize};

/// Parameter-file format version written in the header row.
pub const MCFOST_VERSION: &str = "3.0";

/// `#Number of photon packages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonPackages {
    /// Packets for the temperature computation
    pub nbr_photons_eq_th: f64,
    /// Packets for the SED computation
    pub nbr_photons_lambda: f64,
    /// Packets for the image computation
    pub nbr_photons_image: f64,
}

/// `#Wavelength`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wavelength {
    pub n_lambda: u32,
    /// Lower edge of the wavelength grid (um)
    pub lambda_min: f64,
    /// Upper edge of the wavelength grid (um)
    pub lambda_max: f64,
    pub compute_temperature: bool,
    pub compute_sed: bool,
    pub use_default_wavelength_grid: bool,
    /// Only read when `use_default_wavelength_grid` is false
    pub wavelength_file: String,
    pub separate_contributions: bool,
    /// Whether Stokes (polarization) maps are produced
    pub stokes_parameters: bool,
}

/// `#Grid geometry and size`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// 1 = cylindrical, 2 = spherical
    pub geometry: u8,
    pub n_rad: u32,
    pub nz: u32,
    pub n_az: u32,
    pub n_rad_in: u32,
}

/// `#Maps`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maps {
    pub nx: u32,
    pub ny: u32,
    /// Physical size of the image (au)
    pub size: f64,
    /// Inclination range in the MCFOST convention (deg)
    pub imin: f64,
    pub imax: f64,
    pub n_incl: u32,
    pub centered: bool,
    pub az_min: f64,
    pub az_max: f64,
    pub n_az: u32,
    /// Distance to the system (pc)
    pub distance: f64,
    /// Disk position angle in the MCFOST convention (deg)
    pub disk_pa: f64,
}

/// `#Scattering method`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatteringMethod {
    /// 0 = auto, 1 = grain properties, 2 = cell properties
    pub method: u8,
    /// 1 = Mie, 2 = Henyey-Greenstein
    pub phase_function: u8,
}

/// `#Symetries` (sic, the simulator spells it that way)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symmetries {
    pub image: bool,
    pub central: bool,
    pub axial: bool,
}

/// `#Disk physics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskPhysics {
    /// 0 = none, 1 = parametric, 2 = Dubrulle, 3 = Fromang
    pub dust_settling: u8,
    pub exp_strat: f64,
    pub a_strat: f64,
    pub radial_migration: bool,
    pub sublimate_dust: bool,
    pub hydrostatic_equilibrium: bool,
    pub viscous_heating: bool,
    pub alpha_viscosity: f64,
}

/// One zone entry of `#Density structure`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityStructure {
    /// 1 = disk, 2 = tapered-edge disk, 3 = envelope, 4 = debris disk, 5 = wall
    pub zone_type: u8,
    /// Dust mass (Msun)
    pub dust_mass: f64,
    pub gas_to_dust_ratio: f64,
    /// Scale height at the reference radius (au)
    pub scale_height: f64,
    pub reference_radius: f64,
    pub vertical_profile_exponent: f64,
    pub r_in: f64,
    pub edge: f64,
    pub r_out: f64,
    /// Critical radius for tapered-edge and debris disks (au)
    pub r_c: f64,
    pub flaring_exponent: f64,
    /// Surface density exponent, or `alpha_in` for debris disks
    pub alpha_in: f64,
    /// `-gamma_exp`, or `alpha_out` for debris disks
    pub alpha_out: f64,
}

/// One species entry of `#Grain properties`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrainSpecies {
    /// `Mie` or `DHS`
    pub grain_type: String,
    pub n_components: u32,
    /// 1 = EMT, 2 = coating
    pub mixing_rule: u8,
    pub porosity: f64,
    pub mass_fraction: f64,
    pub vmax: f64,
    pub optical_indices_file: String,
    pub volume_fraction: f64,
    /// 1 = RE + LTE, 2 = RE + NLTE, 3 = NRE
    pub heating_method: u8,
    /// Minimum grain size (um)
    pub amin: f64,
    /// Maximum grain size (um)
    pub amax: f64,
    /// Size distribution power-law index
    pub aexp: f64,
    pub n_grains: u32,
}

/// A density zone together with the grain species populating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub density: DensityStructure,
    pub species: Vec<GrainSpecies>,
}

/// `#Molecular RT settings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolecularRt {
    pub lpop: bool,
    pub laccurate_pop: bool,
    pub lte: bool,
    pub profile_width: f64,
    pub v_turb: f64,
    pub nmol: u32,
    pub molecular_data_file: String,
    pub level_max: u32,
    pub vmax: f64,
    pub n_speed: u32,
    pub constant_abundance: bool,
    pub abundance: f64,
    pub abundance_file: String,
    pub ray_tracing: bool,
    pub n_lines: u32,
    pub transitions: Vec<u32>,
}

/// One entry of `#Star properties`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Effective temperature (K)
    pub temp: f64,
    /// Radius (Rsun)
    pub radius: f64,
    /// Mass (Msun)
    pub mass: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub is_blackbody: bool,
    pub spectrum_file: String,
    pub f_uv: f64,
    pub slope_f_uv: f64,
}

/// Complete description of one disk + star + grid + grain system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McfostParams {
    pub photons: PhotonPackages,
    pub wavelength: Wavelength,
    pub grid: GridGeometry,
    pub maps: Maps,
    pub scattering: ScatteringMethod,
    pub symmetries: Symmetries,
    pub disk_physics: DiskPhysics,
    pub zones: Vec<Zone>,
    pub molecular: MolecularRt,
    pub stars: Vec<Star>,
}

impl McfostParams {
    /// Builds a fully populated default configuration with `n_zones` zones,
    /// `species_per_zone[i]` grain species in zone `i` (one species when the
    /// slice is shorter than `n_zones`) and `n_stars` stars.
    pub fn template(n_zones: usize, species_per_zone: &[usize], n_stars: usize) -> Self {
        let zones = (0..n_zones)
            .map(|i| {
                let n_species = species_per_zone.get(i).copied().unwrap_or(1).max(1);
                Zone {
                    density: DensityStructure::default(),
                    species: vec![GrainSpecies::default(); n_species],
                }
            })
            .collect();

        Self {
            photons: PhotonPackages {
                nbr_photons_eq_th: 1.28e5,
                nbr_photons_lambda: 1.28e3,
                nbr_photons_image: 1.28e5,
            },
            wavelength: Wavelength {
                n_lambda: 50,
                lambda_min: 0.1,
                lambda_max: 3000.0,
                compute_temperature: true,
                compute_sed: true,
                use_default_wavelength_grid: true,
                wavelength_file: "IMLup.lambda".to_string(),
                separate_contributions: false,
                stokes_parameters: false,
            },
            grid: GridGeometry {
                geometry: 1,
                n_rad: 100,
                nz: 70,
                n_az: 1,
                n_rad_in: 20,
            },
            maps: Maps {
                nx: 101,
                ny: 101,
                size: 100.0,
                imin: 0.0,
                imax: 0.0,
                n_incl: 1,
                centered: false,
                az_min: 0.0,
                az_max: 0.0,
                n_az: 1,
                distance: 140.0,
                disk_pa: 0.0,
            },
            scattering: ScatteringMethod {
                method: 0,
                phase_function: 1,
            },
            symmetries: Symmetries {
                image: true,
                central: true,
                axial: true,
            },
            disk_physics: DiskPhysics {
                dust_settling: 0,
                exp_strat: 0.5,
                a_strat: 1.0,
                radial_migration: false,
                sublimate_dust: false,
                hydrostatic_equilibrium: false,
                viscous_heating: false,
                alpha_viscosity: 1e-5,
            },
            zones,
            molecular: MolecularRt::default(),
            stars: vec![Star::default(); n_stars.max(1)],
        }
    }

    /// Iterates over every grain species in every zone.
    pub fn species_mut(&mut self) -> impl Iterator<Item = &mut GrainSpecies> {
        self.zones.iter_mut().flat_map(|z| z.species.iter_mut())
    }
}

impl Default for DensityStructure {
    fn default() -> Self {
        Self {
            zone_type: 4,
            dust_mass: 1e-7,
            gas_to_dust_ratio: 100.0,
            scale_height: 10.0,
            reference_radius: 100.0,
            vertical_profile_exponent: 2.0,
            r_in: 10.0,
            edge: 0.0,
            r_out: 300.0,
            r_c: 100.0,
            flaring_exponent: 1.125,
            alpha_in: 5.0,
            alpha_out: -5.0,
        }
    }
}

impl Default for GrainSpecies {
    fn default() -> Self {
        Self {
            grain_type: "Mie".to_string(),
            n_components: 1,
            mixing_rule: 2,
            porosity: 0.0,
            mass_fraction: 1.0,
            vmax: 0.9,
            optical_indices_file: "Draine_Si_sUV.dat".to_string(),
            volume_fraction: 1.0,
            heating_method: 1,
            amin: 0.03,
            amax: 1000.0,
            aexp: 3.5,
            n_grains: 100,
        }
    }
}

impl Default for MolecularRt {
    fn default() -> Self {
        Self {
            lpop: true,
            laccurate_pop: true,
            lte: true,
            profile_width: 15.0,
            v_turb: 0.2,
            nmol: 1,
            molecular_data_file: "co@xpol.dat".to_string(),
            level_max: 6,
            vmax: 1.0,
            n_speed: 20,
            constant_abundance: true,
            abundance: 1e-6,
            abundance_file: "abundance.fits.gz".to_string(),
            ray_tracing: true,
            n_lines: 3,
            transitions: vec![1, 2, 3],
        }
    }
}

impl Default for Star {
    fn default() -> Self {
        Self {
            temp: 4000.0,
            radius: 2.0,
            mass: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            is_blackbody: true,
            spectrum_file: "lte4000-3.5.NextGen.fits.gz".to_string(),
            f_uv: 0.0,
            slope_f_uv: 2.2,
        }
    }
}
