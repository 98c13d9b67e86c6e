use anyhow::Result;
use clap::Parser;
use ht_core::config::DitherConfig;
use ht_dither::MonochromeDither;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider l'entrée
    cli.validate_source()?;

    // 4. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config)?;
    log::debug!("Configuration effective : {config:?}");

    let mut dither = MonochromeDither::from_seed_option(config.seed);

    // 5. Traiter
    if let Some(ref folder) = cli.batch {
        log::info!("Traitement par lots : {}", folder.display());
        return pipeline::run_batch(&mut dither, folder, &config);
    }
    if let Some(ref image) = cli.image {
        let written = pipeline::process_file(&mut dither, image, &config)?;
        log::info!(
            "{written} fichier(s) écrit(s) dans {}",
            config.output_dir.display()
        );
    }
    Ok(())
}

/// Resolve config: a missing file falls back to defaults.
fn resolve_config(cli: &cli::Cli) -> Result<DitherConfig> {
    if cli.config.exists() {
        ht_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(DitherConfig::default())
    }
}
