use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions image reconnues.
const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Liste récursivement les images d'un dossier, triées par chemin.
///
/// # Errors
/// Retourne une erreur si le dossier n'existe pas ou ne peut être lu.
pub fn collect_images(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        anyhow::bail!("{} n'est pas un dossier", folder.display());
    }
    let mut files = Vec::new();
    scan_dir(folder, &mut files)?;
    files.sort();
    log::info!("{} image(s) trouvée(s) dans {}", files.len(), folder.display());
    Ok(files)
}

/// Extrait récursivement les images reconnues.
fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Lecture impossible : {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            scan_dir(&path, files)?;
        } else if is_image(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Vrai si l'extension (insensible à la casse) est une image reconnue.
#[must_use]
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTS.contains(&ext.to_lowercase().as_str()))
}
