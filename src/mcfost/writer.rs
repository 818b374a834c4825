// src/mcfost/writer.rs

//! Serializer for the MCFOST `.para` text format
//!
//! The simulator reads the file positionally: one row per line inside each
//! section, values separated by whitespace, anything after the values is a
//! free-form comment. Section headers and blank separators are reproduced so
//! that files diff cleanly against the reference layout.

use crate::mcfost::params::{McfostParams, MCFOST_VERSION};
use anyhow::{Context, Result};
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

/// Column at which row comments start.
const COMMENT_COLUMN: usize = 26;

/// Formats a real number the way Fortran list-directed input accepts it.
pub fn fmt_real(x: f64) -> String {
    let ax = x.abs();
    if x != 0.0 && (ax < 1e-3 || ax >= 1e6) {
        format!("{:e}", x)
    } else if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

fn fmt_bool(b: bool) -> &'static str {
    if b {
        "T"
    } else {
        "F"
    }
}

fn row(out: &mut String, values: &[String], comment: &str) -> fmt::Result {
    let body = format!("  {}", values.join("  "));
    if body.len() < COMMENT_COLUMN {
        writeln!(out, "{:<width$}{}", body, comment, width = COMMENT_COLUMN)
    } else {
        writeln!(out, "{}  {}", body, comment)
    }
}

fn section(out: &mut String, header: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "#{}", header)
}

macro_rules! vals {
    ($($v:expr),* $(,)?) => {
        &[$($v.to_string()),*]
    };
}

impl McfostParams {
    /// Renders the full parameter file.
    pub fn to_para_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(&mut out);
        out
    }

    /// Writes the parameter file to `path`, replacing any existing file.
    pub fn write_para(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_para_string())
            .with_context(|| format!("failed to write parameter file {}", path.display()))
    }

    fn render(&self, out: &mut String) -> fmt::Result {
        row(out, vals![MCFOST_VERSION], "mcfost version")?;

        let p = &self.photons;
        section(out, "Number of photon packages")?;
        row(out, vals![fmt_real(p.nbr_photons_eq_th)], "nbr_photons_eq_th  : T computation")?;
        row(out, vals![fmt_real(p.nbr_photons_lambda)], "nbr_photons_lambda : SED computation")?;
        row(out, vals![fmt_real(p.nbr_photons_image)], "nbr_photons_image  : images computation")?;

        let w = &self.wavelength;
        section(out, "Wavelength")?;
        row(
            out,
            vals![w.n_lambda, fmt_real(w.lambda_min), fmt_real(w.lambda_max)],
            "n_lambda, lambda_min, lambda_max [mum]",
        )?;
        row(
            out,
            vals![
                fmt_bool(w.compute_temperature),
                fmt_bool(w.compute_sed),
                fmt_bool(w.use_default_wavelength_grid)
            ],
            "compute temperature?, compute sed?, use default wavelength grid for output ?",
        )?;
        row(out, vals![w.wavelength_file], "wavelength file (if previous parameter is F)")?;
        row(
            out,
            vals![fmt_bool(w.separate_contributions), fmt_bool(w.stokes_parameters)],
            "separation of different contributions?, stokes parameters?",
        )?;

        let g = &self.grid;
        section(out, "Grid geometry and size")?;
        row(out, vals![g.geometry], "1 = cylindrical, 2 = spherical")?;
        row(
            out,
            vals![g.n_rad, g.nz, g.n_az, g.n_rad_in],
            "n_rad (log distribution), nz (or n_theta), n_az, n_rad_in",
        )?;

        let m = &self.maps;
        section(out, "Maps")?;
        row(out, vals![m.nx, m.ny, fmt_real(m.size)], "grid (nx,ny), size [AU]")?;
        row(
            out,
            vals![fmt_real(m.imin), fmt_real(m.imax), m.n_incl, fmt_bool(m.centered)],
            "RT: imin, imax, n_incl, centered ?",
        )?;
        row(
            out,
            vals![fmt_real(m.az_min), fmt_real(m.az_max), m.n_az],
            "RT: az_min, az_max, n_az angles",
        )?;
        row(out, vals![fmt_real(m.distance)], "distance (pc)")?;
        row(out, vals![fmt_real(m.disk_pa)], "disk PA")?;

        let s = &self.scattering;
        section(out, "Scattering method")?;
        row(out, vals![s.method], "0=auto, 1=grain prop, 2=cell prop")?;
        row(out, vals![s.phase_function], "1=Mie, 2=hg (2 implies the loss of polarizarion)")?;

        let sym = &self.symmetries;
        section(out, "Symetries")?;
        row(out, vals![fmt_bool(sym.image)], "image symmetry")?;
        row(out, vals![fmt_bool(sym.central)], "central symmetry")?;
        row(out, vals![fmt_bool(sym.axial)], "axial symmetry (important only if N_phot > 1)")?;

        let d = &self.disk_physics;
        section(out, "Disk physics")?;
        row(
            out,
            vals![d.dust_settling, fmt_real(d.exp_strat), fmt_real(d.a_strat)],
            "dust_settling (0=no settling, 1=parametric, 2=Dubrulle, 3=Fromang), exp_strat, a_strat",
        )?;
        row(out, vals![fmt_bool(d.radial_migration)], "dust radial migration")?;
        row(out, vals![fmt_bool(d.sublimate_dust)], "sublimate dust")?;
        row(out, vals![fmt_bool(d.hydrostatic_equilibrium)], "hydostatic equilibrium")?;
        row(
            out,
            vals![fmt_bool(d.viscous_heating), fmt_real(d.alpha_viscosity)],
            "viscous heating, alpha_viscosity",
        )?;

        section(out, "Number of zones : 1 zone = 1 density structure + corresponding grain properties")?;
        row(out, vals![self.zones.len()], "")?;

        section(out, "Density structure")?;
        for zone in &self.zones {
            let z = &zone.density;
            row(
                out,
                vals![z.zone_type],
                "zone type : 1 = disk, 2 = tappered-edge disk, 3 = envelope, 4 = debris disk, 5 = wall",
            )?;
            row(
                out,
                vals![fmt_real(z.dust_mass), fmt_real(z.gas_to_dust_ratio)],
                "dust mass,  gas-to-dust mass ratio",
            )?;
            row(
                out,
                vals![
                    fmt_real(z.scale_height),
                    fmt_real(z.reference_radius),
                    fmt_real(z.vertical_profile_exponent)
                ],
                "scale height, reference radius (AU), vertical profile exponent (only for debris disk)",
            )?;
            row(
                out,
                vals![fmt_real(z.r_in), fmt_real(z.edge), fmt_real(z.r_out), fmt_real(z.r_c)],
                "Rin, edge, Rout, Rc (AU) Rc is only used for tappered-edge & debris disks",
            )?;
            row(out, vals![fmt_real(z.flaring_exponent)], "flaring exponent, unused for envelope")?;
            row(
                out,
                vals![fmt_real(z.alpha_in), fmt_real(z.alpha_out)],
                "surface density exponent, -gamma_exp (or alpha_in & alpha_out for debris disk)",
            )?;
            writeln!(out)?;
        }

        writeln!(out, "#Grain properties")?;
        for zone in &self.zones {
            row(out, vals![zone.species.len()], "Number of species")?;
            for sp in &zone.species {
                row(
                    out,
                    vals![
                        sp.grain_type,
                        sp.n_components,
                        sp.mixing_rule,
                        fmt_real(sp.porosity),
                        fmt_real(sp.mass_fraction),
                        fmt_real(sp.vmax)
                    ],
                    "Grain type (Mie or DHS), N_components, mixing rule (1 = EMT or 2 = coating),  porosity, mass fraction, Vmax (for DHS)",
                )?;
                row(
                    out,
                    vals![sp.optical_indices_file, fmt_real(sp.volume_fraction)],
                    "Optical indices file, volume fraction",
                )?;
                row(out, vals![sp.heating_method], "Heating method : 1 = RE + LTE, 2 = RE + NLTE, 3 = NRE")?;
                row(
                    out,
                    vals![fmt_real(sp.amin), fmt_real(sp.amax), fmt_real(sp.aexp), sp.n_grains],
                    "amin, amax [mum], aexp, n_grains (log distribution)",
                )?;
            }
        }

        let mol = &self.molecular;
        section(out, "Molecular RT settings")?;
        row(
            out,
            vals![
                fmt_bool(mol.lpop),
                fmt_bool(mol.laccurate_pop),
                fmt_bool(mol.lte),
                fmt_real(mol.profile_width)
            ],
            "lpop, laccurate_pop, LTE, profile width (km.s^-1)",
        )?;
        row(out, vals![fmt_real(mol.v_turb)], "v_turb (delta)")?;
        row(out, vals![mol.nmol], "nmol")?;
        row(out, vals![mol.molecular_data_file, mol.level_max], "molecular data filename, level_max")?;
        row(out, vals![fmt_real(mol.vmax), mol.n_speed], "vmax (km.s^-1), n_speed")?;
        row(
            out,
            vals![fmt_bool(mol.constant_abundance), fmt_real(mol.abundance), mol.abundance_file],
            "cst molecule abundance ?, abundance, abundance file",
        )?;
        row(
            out,
            vals![fmt_bool(mol.ray_tracing), mol.n_lines],
            "ray tracing ?,  number of lines in ray-tracing",
        )?;
        let transitions: Vec<String> = mol.transitions.iter().map(|t| t.to_string()).collect();
        row(out, &transitions, "transition numbers")?;

        section(out, "Star properties")?;
        row(out, vals![self.stars.len()], "Number of stars")?;
        for st in &self.stars {
            row(
                out,
                vals![
                    fmt_real(st.temp),
                    fmt_real(st.radius),
                    fmt_real(st.mass),
                    fmt_real(st.x),
                    fmt_real(st.y),
                    fmt_real(st.z),
                    fmt_bool(st.is_blackbody)
                ],
                "Temp, radius (solar radius),M (solar mass),x,y,z (AU), is a blackbody?",
            )?;
            row(out, vals![st.spectrum_file], "")?;
            row(out, vals![fmt_real(st.f_uv), fmt_real(st.slope_f_uv)], "fUV, slope_fUV")?;
        }

        Ok(())
    }
}

impl fmt::Display for McfostParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_para_string())
    }
}
