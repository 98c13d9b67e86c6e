//! Tramage par motifs 3×3 (growth sequence).

use ht_core::config::PatternType;
use ht_core::frame::Raster;

use crate::tables::{Pattern, pattern_bank};

/// Bornes hautes (incluses) des 9 premiers paliers de moyenne ; au-delà, palier 9.
const BUCKET_LIMITS: [u8; 9] = [25, 50, 75, 100, 125, 150, 175, 200, 225];

/// Index du motif pour une moyenne de fenêtre.
///
/// # Example
/// ```
/// use ht_dither::pattern::bucket;
/// assert_eq!(bucket(0), 0);
/// assert_eq!(bucket(25), 0);
/// assert_eq!(bucket(26), 1);
/// assert_eq!(bucket(225), 8);
/// assert_eq!(bucket(226), 9);
/// ```
#[must_use]
#[inline]
pub fn bucket(mean: u8) -> usize {
    BUCKET_LIMITS
        .iter()
        .position(|&limit| mean <= limit)
        .unwrap_or(BUCKET_LIMITS.len())
}

/// Moyenne tronquée des 9 échantillons de la fenêtre centrée en (cx, cy).
fn window_mean(buf: &Raster, cx: u32, cy: u32) -> u8 {
    let mut sum = 0u32;
    for y in cy - 1..=cy + 1 {
        for x in cx - 1..=cx + 1 {
            sum += u32::from(buf.get(x, y));
        }
    }
    (sum / 9) as u8
}

fn stamp(buf: &mut Raster, cx: u32, cy: u32, pattern: &Pattern) {
    for (dy, row) in pattern.iter().enumerate() {
        for (dx, &v) in row.iter().enumerate() {
            buf.set(cx + dx as u32 - 1, cy + dy as u32 - 1, v);
        }
    }
}

/// Remplace chaque fenêtre 3×3 centrée sur des coordonnées impaires par le
/// motif de la banque choisie selon sa moyenne.
///
/// Les centres avancent de 2 : deux fenêtres voisines partagent une ligne ou
/// une colonne. Le balayage suit l'ordre ligne par ligne et la moyenne est
/// lue dans le buffer de travail, donc la ligne/colonne partagée porte déjà le
/// motif précédent. Les pixels couverts par aucune fenêtre complète (dernière
/// colonne si la largeur est paire, dernière ligne si la hauteur est paire,
/// ou toute l'image sous 3×3) gardent leur niveau de gris.
///
/// # Example
/// ```
/// use ht_core::config::PatternType;
/// use ht_core::frame::Raster;
/// use ht_dither::pattern::patterned;
///
/// let out = patterned(&Raster::filled(4, 4, 255), PatternType::Clustered);
/// assert_eq!(out.get(1, 1), 255);
/// assert_eq!(out.get(3, 3), 255);
/// ```
#[must_use]
pub fn patterned(src: &Raster, kind: PatternType) -> Raster {
    let mut out = src.clone();
    let (width, height) = (out.width(), out.height());
    if width < 3 || height < 3 {
        return out;
    }
    let bank = pattern_bank(kind);
    for cy in (1..height - 1).step_by(2) {
        for cx in (1..width - 1).step_by(2) {
            let mean = window_mean(&out, cx, cy);
            stamp(&mut out, cx, cy, &bank[bucket(mean)]);
        }
    }
    out
}
