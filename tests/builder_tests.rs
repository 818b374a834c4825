use debris_disk_fm::{
    Instrument, ModelBuilder, ModelError, ParamName, ParameterSet, SystemConfig,
};

fn builder() -> ModelBuilder {
    ModelBuilder::new(SystemConfig::hd191089())
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
}

#[test]
fn test_unknown_parameter_names_are_rejected() {
    let err = ParameterSet::from_names_values(&["inc", "ecc"], &[59.7, 0.1]).unwrap_err();
    assert_eq!(err, ModelError::UnknownParameter("ecc".to_string()));

    let err = ParameterSet::from_names_values(&["inc"], &[59.7, 0.1]).unwrap_err();
    assert!(matches!(err, ModelError::LengthMismatch { .. }));
}

#[test]
fn test_omitted_parameters_take_defaults() {
    let model = builder().build(&ParameterSet::new()).unwrap();
    let zone = &model.zones[0];

    assert_close(model.maps.imin, 120.3);
    assert_close(model.maps.disk_pa, 20.0);
    assert_close(zone.density.r_c, 45.3);
    assert_close(zone.density.r_in, 20.0);
    assert_close(zone.density.alpha_in, 3.5);
    assert_close(zone.density.alpha_out, -5.0);
    assert_close(zone.density.r_out, 330.994);
    for species in &zone.species {
        assert_close(species.porosity, 0.95);
        assert_close(species.amin, 1.0);
        assert_close(species.aexp, 3.5);
    }
    let fractions: Vec<f64> = zone.species.iter().map(|s| s.mass_fraction).collect();
    assert_eq!(fractions, [0.3, 0.3, 0.4]);
}

#[test]
fn test_mass_fractions_always_sum_to_one() {
    for i in 0..=10 {
        for j in 0..=(10 - i) {
            let f0 = i as f64 / 10.0;
            let f1 = j as f64 / 10.0;
            let params = ParameterSet::new()
                .with(ParamName::MassFraction0, f0)
                .and_then(|p| p.with(ParamName::MassFraction1, f1))
                .unwrap();

            let model = builder().build(&params).unwrap();
            let total: f64 = model.zones[0].species.iter().map(|s| s.mass_fraction).sum();
            assert!((total - 1.0).abs() <= 1e-3, "f0={} f1={} sum={}", f0, f1, total);
        }
    }
}

#[test]
fn test_single_companion_fraction_uses_default_for_the_other() {
    let params = ParameterSet::new().with(ParamName::MassFraction0, 0.5).unwrap();
    let model = builder().build(&params).unwrap();
    let fractions: Vec<f64> = model.zones[0].species.iter().map(|s| s.mass_fraction).collect();
    assert_eq!(fractions, [0.5, 0.3, 0.2]);
}

#[test]
fn test_build_is_deterministic() {
    let params = ParameterSet::from_names_values(&["inc", "m_disk", "a_min"], &[61.23456, -6.5, 2.0]).unwrap();
    let first = builder().build(&params).unwrap();
    let second = builder().build(&params).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_para_string(), second.to_para_string());
}

#[test]
fn test_inclination_is_flipped_and_rounded() {
    let params = ParameterSet::new().with(ParamName::Inclination, 59.7).unwrap();
    let model = builder().build(&params).unwrap();
    assert_close(model.maps.imin, 120.3);
    assert_close(model.maps.imax, 120.3);

    let params = ParameterSet::new().with(ParamName::Inclination, 61.23456).unwrap();
    let model = builder().build(&params).unwrap();
    assert_close(model.maps.imin, 118.765);
}

#[test]
fn test_disk_mass_is_log_scaled() {
    let params = ParameterSet::new().with(ParamName::LogDiskMass, -6.0).unwrap();
    let model = builder().build(&params).unwrap();
    let mass = model.zones[0].density.dust_mass;
    assert!((mass / 1e-6 - 1.0).abs() < 1e-12);
}

#[test]
fn test_variants_share_the_base_model() {
    let params = ParameterSet::new().with(ParamName::Porosity, 0.5).unwrap();
    let base = builder().build(&params).unwrap();
    let variants = builder().variants(&params).unwrap();

    let names: Vec<&str> = variants.iter().map(|v| v.instrument.name).collect();
    assert_eq!(names, ["stis", "nicmos", "gpi"]);

    for variant in &variants {
        let p = &variant.params;
        assert_eq!(p.wavelength.stokes_parameters, variant.instrument.name == "gpi");
        assert_eq!(p.maps.nx, variant.instrument.width);
        assert_eq!(p.maps.ny, variant.instrument.width);
        assert_close(
            p.maps.size,
            base.maps.distance * variant.instrument.width as f64 * variant.instrument.pixel_scale,
        );

        // Everything else is the base model
        let mut restored = p.clone();
        restored.wavelength.stokes_parameters = base.wavelength.stokes_parameters;
        restored.maps.nx = base.maps.nx;
        restored.maps.ny = base.maps.ny;
        restored.maps.size = base.maps.size;
        assert_eq!(restored, base);
    }
}

#[test]
fn test_sed_instrument_is_part_of_the_run() {
    assert!(Instrument::ALL.contains(&Instrument::SED));
}

#[test]
fn test_wrong_species_count_is_rejected() {
    let mut system = SystemConfig::hd191089();
    system.optical_indices_files.pop();
    let err = ModelBuilder::new(system).build(&ParameterSet::new()).unwrap_err();
    assert_eq!(err, ModelError::SpeciesCount(2));
}
