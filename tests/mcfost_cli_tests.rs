#![cfg(unix)]

use debris_disk_fm::{evaluator_from_config, FmConfig, RunIdentity};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Shell stand-in for the real program: writes the same outputs MCFOST
/// leaves behind and records the environment it was started with.
const FAKE_MCFOST: &str = r#"#!/bin/sh
[ -f "$1" ] || exit 1
if [ "$2" = "-img" ]; then
    [ -f _dust_prop_th.tmp ] || exit 1
    mkdir -p "data_$3"
    echo image > "data_$3/RT.fits.gz"
else
    mkdir -p data_th
    echo sed > data_th/sed_rt.fits.gz
    echo dust > _dust_prop_th.tmp
    echo "$MCFOST_UTILS" > env.txt
fi
"#;

// Writing and executing the script in one test avoids ETXTBSY races
#[test]
fn test_full_evaluation_through_the_command_line() {
    let tmp = tempfile::tempdir().unwrap();
    let program = tmp.path().join("mcfost");
    fs::write(&program, FAKE_MCFOST).unwrap();
    fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

    let mut config = FmConfig::reproducible();
    config.runner.program = program;
    config.runner.env.insert("MCFOST_UTILS".into(), "/opt/mcfost/utils".into());

    let likelihood = |_obs: &Path, model: &Path, _id: Option<&RunIdentity>| -> anyhow::Result<f64> {
        let image = fs::read_to_string(model.join("data_1.65").join("RT.fits.gz"))?;
        Ok(if image.trim() == "image" { -2.0 } else { f64::NAN })
    };
    let evaluator = evaluator_from_config(&config, likelihood);
    let root = tmp.path().join("mcfost_models");

    let posterior = evaluator
        .lnpost(&[59.7, 0.5], &["inc", "porosity"], Path::new("obs"), &root, true, true);
    assert!(posterior.is_finite());

    let dir = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.is_dir() && p.file_name().unwrap().to_string_lossy().starts_with("mcfost_models"))
        .expect("isolated run directory");
    for image_dir in ["data_0.5852", "data_1.12347", "data_1.65", "data_th"] {
        assert!(dir.join(image_dir).is_dir(), "missing {}", image_dir);
    }
    let env = fs::read_to_string(dir.join("env.txt")).unwrap();
    assert_eq!(env.trim(), "/opt/mcfost/utils");

    // A program that cannot be started rejects the point
    config.runner.program = tmp.path().join("missing-mcfost");
    let likelihood = |_obs: &Path, _model: &Path, _id: Option<&RunIdentity>| -> anyhow::Result<f64> { Ok(0.0) };
    let evaluator = evaluator_from_config(&config, likelihood);
    let ln_post = evaluator.lnpost(&[60.0], &["inc"], Path::new("obs"), &root, true, true);
    assert_eq!(ln_post, f64::NEG_INFINITY);
}
