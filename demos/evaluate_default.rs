use debris_disk_fm::{default_configs, evaluator_from_config, FmConfig, RunIdentity};
use std::env;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Optional TOML config as the first argument
    let config = match env::args().nth(1) {
        Some(path) => FmConfig::from_file(Path::new(&path))?,
        None => default_configs::production(),
    };

    println!("debris-disk-fm: single posterior evaluation\n");
    println!("   Simulator: {}", config.runner.program.display());
    println!("   Run root: {}", config.runner.run_root.display());
    println!("   Distance: {} pc", config.system.distance);
    println!("   Salted identities: {}\n", config.runner.salt_identity);

    // Placeholder likelihood: accepts any run that produced the GPI image
    let likelihood = |_obs: &Path, model: &Path, id: Option<&RunIdentity>| -> anyhow::Result<f64> {
        let image = model.join("data_1.65");
        anyhow::ensure!(image.is_dir(), "no GPI image in {}", model.display());
        println!("   Model {} written to {}", id.map(RunIdentity::as_str).unwrap_or("-"), model.display());
        Ok(0.0)
    };
    let evaluator = evaluator_from_config(&config, likelihood);

    let names = ["inc", "PA", "m_disk", "Rc", "porosity"];
    let values = [59.7, 70.0, -7.0, 45.3, 0.95];
    let run_root: PathBuf = config.runner.run_root.clone();

    let ln_post = evaluator.lnpost(&values, &names, Path::new("./observations"), &run_root, true, true);
    println!("\n   ln_post = {}", ln_post);
    Ok(())
}
