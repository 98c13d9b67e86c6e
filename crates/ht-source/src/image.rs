use std::path::Path;

use anyhow::{Context, Result};
use ht_core::frame::{FrameBuffer, Raster};

/// Charge une image depuis le disque en RGBA.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use ht_source::image::load_frame;
/// use std::path::Path;
/// let frame = load_frame(Path::new("photo.png")).unwrap();
/// ```
pub fn load_frame(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("{} : {width}×{height}", path.display());
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}

/// Charge une image et la convertit en niveaux de gris.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use ht_source::image::load_grayscale;
/// use std::path::Path;
/// let gray = load_grayscale(Path::new("photo.png")).unwrap();
/// ```
pub fn load_grayscale(path: &Path) -> Result<Raster> {
    Ok(load_frame(path)?.to_grayscale())
}

/// Écrit une grille 8 bits en PNG niveaux de gris. Crée le dossier parent au besoin.
///
/// # Errors
/// Returns an error if the raster is empty, the directory cannot be created,
/// or the encoder fails.
pub fn save_raster(path: &Path, raster: &Raster) -> Result<()> {
    if raster.is_empty() {
        anyhow::bail!(
            "Grille vide ({}×{}), rien à écrire dans {}",
            raster.width(),
            raster.height(),
            path.display()
        );
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer {}", parent.display()))?;
    }
    let img = image::GrayImage::from_raw(raster.width(), raster.height(), raster.as_raw().to_vec())
        .context("Dimensions incohérentes pour l'encodeur")?;
    img.save(path)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    Ok(())
}
