//! Seuillage fixe, seuillage bruité et tramage aléatoire.

use ht_core::frame::Raster;
use ht_core::traits::UniformSource;
use rayon::prelude::*;

#[inline(always)]
fn binarize(below: bool) -> u8 {
    if below { 0 } else { 255 }
}

/// Seuil global : 0 si `v < threshold`, 255 sinon.
///
/// Les lignes sont indépendantes et traitées en parallèle.
///
/// # Example
/// ```
/// use ht_core::frame::Raster;
/// use ht_dither::threshold::fixed_threshold;
///
/// let gray = Raster::filled(4, 4, 128);
/// assert!(fixed_threshold(&gray, 128).as_raw().iter().all(|&v| v == 255));
/// assert!(fixed_threshold(&gray, 129).as_raw().iter().all(|&v| v == 0));
/// ```
#[must_use]
pub fn fixed_threshold(src: &Raster, threshold: u8) -> Raster {
    let mut out = src.clone();
    if out.is_empty() {
        return out;
    }
    let width = out.width() as usize;
    out.as_raw_mut().par_chunks_mut(width).for_each(|row| {
        for px in row.iter_mut() {
            *px = binarize(*px < threshold);
        }
    });
    out
}

/// Seuil global appliqué à la valeur perturbée `v + bruit`, où le bruit est
/// tiré uniformément dans `[-noise_threshold/2, noise_threshold/2]`.
///
/// La somme est calculée en `i16` : aucune valeur ne boucle, un pixel à 250
/// poussé de +20 reste au-dessus de tout seuil.
///
/// Les tirages suivent l'ordre de balayage (ligne par ligne), un par pixel.
#[must_use]
pub fn noise_threshold<S: UniformSource + ?Sized>(
    src: &Raster,
    noise_threshold: u8,
    threshold: u8,
    rng: &mut S,
) -> Raster {
    let mut out = src.clone();
    let offset = i16::from(noise_threshold / 2);
    let threshold = i16::from(threshold);
    for px in out.as_raw_mut() {
        let perturbed = i16::from(*px) + rng.next_in_range(-offset, offset);
        *px = binarize(perturbed < threshold);
    }
    out
}

/// Tramage aléatoire : 0 si `v` est sous un tirage uniforme dans [0, 255].
#[must_use]
pub fn random<S: UniformSource + ?Sized>(src: &Raster, rng: &mut S) -> Raster {
    let mut out = src.clone();
    for px in out.as_raw_mut() {
        *px = binarize(*px < rng.next_u8());
    }
    out
}
