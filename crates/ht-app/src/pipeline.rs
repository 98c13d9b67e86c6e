use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ht_core::config::DitherConfig;
use ht_core::traits::Dither;
use ht_source::folder_batch::collect_images;
use ht_source::image::{load_grayscale, save_raster};

/// Suffixe du fichier niveaux de gris optionnel.
const GRAYSCALE_SUFFIX: &str = "grayscale";

/// `<dir>/<stem>_<suffix>.png`
#[must_use]
pub fn output_path(dir: &Path, stem: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{stem}_{suffix}.png"))
}

/// Process one image: decode, convert to grayscale, run every selected
/// algorithm (once per pattern bank or matrix where it applies) and write one
/// PNG per result, named `<stem>_<run label>.png`. Returns the number of files written.
///
/// # Errors
/// Returns an error if the image cannot be decoded or an output cannot be written.
pub fn process_file<D: Dither + ?Sized>(
    dither: &mut D,
    path: &Path,
    config: &DitherConfig,
) -> Result<usize> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("Nom de fichier invalide : {}", path.display()))?;
    let gray = load_grayscale(path)?;
    let mut written = 0;

    if config.save_grayscale {
        let out = output_path(&config.output_dir, &stem, GRAYSCALE_SUFFIX);
        save_raster(&out, &gray)?;
        log::info!("Écrit : {}", out.display());
        written += 1;
    }

    for run in config.runs() {
        let result = dither.apply(&gray, run, config);
        let out = output_path(&config.output_dir, &stem, &run.label());
        save_raster(&out, &result)?;
        log::info!("Écrit : {}", out.display());
        written += 1;
    }
    Ok(written)
}

/// Point d'entrée du traitement par lots : chaque image du dossier est
/// traitée ; un échec est journalisé puis ignoré.
///
/// # Errors
/// Retourne une erreur si le dossier est illisible ou si au moins un fichier a échoué.
pub fn run_batch<D: Dither + ?Sized>(
    dither: &mut D,
    folder: &Path,
    config: &DitherConfig,
) -> Result<()> {
    let files = collect_images(folder)?;
    if files.is_empty() {
        log::warn!("Aucune image trouvée dans {}", folder.display());
        return Ok(());
    }

    let mut failures = 0usize;
    let mut written = 0usize;
    for path in &files {
        match process_file(dither, path, config) {
            Ok(n) => written += n,
            Err(e) => {
                log::error!("{} : {e:#}", path.display());
                failures += 1;
            }
        }
    }
    log::info!(
        "Lot terminé : {} image(s), {written} fichier(s) écrit(s), {failures} échec(s)",
        files.len()
    );

    if failures > 0 {
        anyhow::bail!("{failures}/{} image(s) en échec", files.len());
    }
    Ok(())
}
