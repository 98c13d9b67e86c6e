//! Algorithmique de Tramage Ordonné (Ordered Dithering)
//! Matrices de seuil répétées sur l'image, modulo leur côté.

use ht_core::config::MatrixType;
use ht_core::frame::Raster;
use rayon::prelude::*;

use crate::tables::{ThresholdMatrix, threshold_matrix};

/// Ramène une luminance [0..255] sur [0..N²] : `floor(lum / 255 * N²)`.
///
/// Calcul entier exact, sans flottant.
///
/// # Example
/// ```
/// use ht_dither::ordered::scale_to_levels;
/// assert_eq!(scale_to_levels(128, 16), 8);
/// assert_eq!(scale_to_levels(255, 16), 16);
/// assert_eq!(scale_to_levels(0, 64), 0);
/// ```
#[must_use]
#[inline(always)]
pub fn scale_to_levels(lum: u8, levels: u32) -> u32 {
    u32::from(lum) * levels / 255
}

/// Décision pour un pixel : 0 si la valeur ramenée est sous l'entrée de la
/// matrice en `(y mod N, x mod N)`, 255 sinon.
#[must_use]
#[inline(always)]
pub fn apply_matrix(lum: u8, x: usize, y: usize, matrix: &ThresholdMatrix) -> u8 {
    if scale_to_levels(lum, matrix.levels()) < u32::from(matrix.at(x, y)) {
        0
    } else {
        255
    }
}

/// Tramage ordonné d'une grille entière.
///
/// Chaque pixel ne dépend que de sa valeur et de sa position ; les lignes
/// sont traitées en parallèle.
///
/// # Example
/// ```
/// use ht_core::config::MatrixType;
/// use ht_core::frame::Raster;
/// use ht_dither::ordered::ordered;
///
/// let out = ordered(&Raster::filled(8, 8, 0), MatrixType::Bayer8x8);
/// assert!(out.as_raw().iter().all(|&v| v == 0));
/// let out = ordered(&Raster::filled(8, 8, 255), MatrixType::Bayer8x8);
/// assert!(out.as_raw().iter().all(|&v| v == 255));
/// ```
#[must_use]
pub fn ordered(src: &Raster, kind: MatrixType) -> Raster {
    let mut out = src.clone();
    if out.is_empty() {
        return out;
    }
    let matrix = threshold_matrix(kind);
    let width = out.width() as usize;
    out.as_raw_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                *px = apply_matrix(*px, x, y, &matrix);
            }
        });
    out
}
