// src/model/instrument.rs

//! Observing instruments and per-instrument configuration variants

use crate::mcfost::params::McfostParams;

/// A fixed observing setup: detector footprint, pixel scale and the
/// monochromatic wavelength at which its image is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instrument {
    /// Short name, also used in the parameter-file name
    pub name: &'static str,
    /// Image width and height (px)
    pub width: u32,
    /// Angular pixel scale ("/px)
    pub pixel_scale: f64,
    /// Whether Stokes maps are requested
    pub stokes: bool,
    /// Image wavelength (um)
    pub wavelength: f64,
    /// Wavelength argument as passed on the simulator command line
    pub wavelength_arg: &'static str,
}

impl Instrument {
    /// HST/STIS coronagraphic imaging.
    pub const STIS: Instrument = Instrument {
        name: "stis",
        width: 315,
        pixel_scale: 0.05078,
        stokes: false,
        wavelength: 0.5852,
        wavelength_arg: "0.5852",
    };

    /// HST/NICMOS coronagraphic imaging.
    pub const NICMOS: Instrument = Instrument {
        name: "nicmos",
        width: 139,
        pixel_scale: 0.07565,
        stokes: false,
        wavelength: 1.12347,
        wavelength_arg: "1.12347",
    };

    /// Gemini/GPI polarimetric imaging.
    pub const GPI: Instrument = Instrument {
        name: "gpi",
        width: 281,
        pixel_scale: 14.166e-3,
        stokes: true,
        wavelength: 1.65,
        wavelength_arg: "1.65",
    };

    /// All instruments in evaluation order.
    pub const ALL: [Instrument; 3] = [Instrument::STIS, Instrument::NICMOS, Instrument::GPI];

    /// Instrument whose parameter file drives the SED computation.
    pub const SED: Instrument = Instrument::STIS;

    /// Physical field of view (au) at `distance` (pc).
    pub fn field_of_view(&self, distance: f64) -> f64 {
        distance * self.width as f64 * self.pixel_scale
    }

    /// Parameter-file name for this instrument, e.g. `hd191089_stis.para`.
    pub fn para_file(&self, stem: &str) -> String {
        format!("{}_{}.para", stem, self.name)
    }

    /// Image output directory the simulator creates for this instrument.
    pub fn image_dir(&self) -> String {
        format!("data_{}", self.wavelength_arg)
    }
}

/// A base model specialised for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentModel {
    pub instrument: Instrument,
    pub params: McfostParams,
}

/// Returns an independent copy of `base` with the image grid, field of view
/// and Stokes flag set for `instrument`. `base` is left untouched.
pub fn specialize_for_instrument(base: &McfostParams, instrument: &Instrument) -> InstrumentModel {
    let mut params = base.clone();
    params.wavelength.stokes_parameters = instrument.stokes;
    params.maps.nx = instrument.width;
    params.maps.ny = instrument.width;
    params.maps.size = instrument.field_of_view(base.maps.distance);

    InstrumentModel {
        instrument: *instrument,
        params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_polarimetric_instrument() {
        let stokes: Vec<&str> = Instrument::ALL.iter().filter(|i| i.stokes).map(|i| i.name).collect();
        assert_eq!(stokes, ["gpi"]);
    }

    #[test]
    fn test_specialization_only_touches_instrument_fields() {
        let mut base = McfostParams::template(1, &[3], 1);
        base.maps.distance = 50.14;
        let snapshot = base.clone();

        let gpi = specialize_for_instrument(&base, &Instrument::GPI);
        assert_eq!(base, snapshot);
        assert_eq!(gpi.params.maps.nx, 281);
        assert_eq!(gpi.params.maps.ny, 281);
        assert!((gpi.params.maps.size - 50.14 * 281.0 * 14.166e-3).abs() < 1e-12);
        assert!(gpi.params.wavelength.stokes_parameters);

        let mut restored = gpi.params.clone();
        restored.maps.nx = snapshot.maps.nx;
        restored.maps.ny = snapshot.maps.ny;
        restored.maps.size = snapshot.maps.size;
        restored.wavelength.stokes_parameters = snapshot.wavelength.stokes_parameters;
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_variants_are_independent() {
        let base = McfostParams::template(1, &[3], 1);
        let mut stis = specialize_for_instrument(&base, &Instrument::STIS);
        let nicmos = specialize_for_instrument(&base, &Instrument::NICMOS);

        stis.params.zones[0].species[0].porosity = 0.7;
        assert_eq!(nicmos.params.zones[0].species[0].porosity, 0.0);
        assert_eq!(base.zones[0].species[0].porosity, 0.0);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Instrument::NICMOS.para_file("hd191089"), "hd191089_nicmos.para");
        assert_eq!(Instrument::GPI.image_dir(), "data_1.65");
    }
}
