//! Diffusion d'erreur : propagation simple et Floyd–Steinberg.
//!
//! Balayage strictement séquentiel, ligne par ligne puis gauche à droite :
//! chaque décision lit des valeurs déjà corrigées par les pixels précédents.

use ht_core::frame::Raster;

use crate::saturate::saturating_add;

/// Seuil de décision des deux filtres de diffusion.
pub const DIFFUSION_THRESHOLD: u8 = 127;

/// Poids Floyd–Steinberg en seizièmes : droite, bas-gauche, bas, bas-droite.
pub const FLOYD_STEINBERG_WEIGHTS: [i32; 4] = [7, 3, 5, 1];

#[inline(always)]
fn quantize(v: u8) -> u8 {
    if v < DIFFUSION_THRESHOLD { 0 } else { 255 }
}

/// Erreur de quantification `ancien - nouveau`, dans [-128, 126].
#[inline(always)]
fn quantization_error(old: u8, new: u8) -> i32 {
    i32::from(old) - i32::from(new)
}

/// Diffusion simple : toute l'erreur va au voisin de droite.
///
/// Rien ne passe d'une ligne à la suivante ; la dernière colonne perd son
/// erreur.
///
/// # Example
/// ```
/// use ht_core::frame::Raster;
/// use ht_dither::diffusion::simple_error_diffusion;
///
/// let src = Raster::from_raw(3, 1, vec![100, 100, 100]).unwrap();
/// // 100 → 0 (err 100), 200 → 255 (err -55), 45 → 0.
/// assert_eq!(simple_error_diffusion(&src).as_raw(), &[0, 255, 0]);
/// ```
#[must_use]
pub fn simple_error_diffusion(src: &Raster) -> Raster {
    let mut buf = src.clone();
    if buf.is_empty() {
        return buf;
    }
    let width = buf.width();
    for y in 0..buf.height() {
        let row = buf.row_mut(y);
        for x in 0..width as usize {
            let old = row[x];
            let new = quantize(old);
            row[x] = new;
            if x + 1 < width as usize {
                row[x + 1] = saturating_add(row[x + 1], quantization_error(old, new));
            }
        }
    }
    buf
}

/// Floyd–Steinberg : erreur répartie en 7/16 (droite), 3/16 (bas-gauche),
/// 5/16 (bas) et 1/16 (bas-droite).
///
/// Chaque part est `err * poids / 16` en division entière tronquée vers
/// zéro. Les pixels de la dernière ligne, de la première colonne et de la
/// dernière colonne ne diffusent rien : leur erreur est perdue.
///
/// # Example
/// ```
/// use ht_core::frame::Raster;
/// use ht_dither::diffusion::floyd_steinberg;
///
/// let out = floyd_steinberg(&Raster::filled(6, 6, 90));
/// assert!(out.is_bitonal());
/// ```
#[must_use]
pub fn floyd_steinberg(src: &Raster) -> Raster {
    let mut buf = src.clone();
    if buf.is_empty() {
        return buf;
    }
    let (width, height) = (buf.width(), buf.height());
    for y in 0..height {
        for x in 0..width {
            let old = buf.get(x, y);
            let new = quantize(old);
            buf.set(x, y, new);
            if y + 1 < height && x > 0 && x + 1 < width {
                spread_error(&mut buf, x, y, quantization_error(old, new));
            }
        }
    }
    buf
}

/// Distribue `err` autour de (x, y), pixel intérieur hors dernière ligne.
#[inline(always)]
fn spread_error(buf: &mut Raster, x: u32, y: u32, err: i32) {
    let [right, below_left, below, below_right] = FLOYD_STEINBERG_WEIGHTS.map(|w| err * w / 16);
    diffuse(buf, x + 1, y, right);
    diffuse(buf, x - 1, y + 1, below_left);
    diffuse(buf, x, y + 1, below);
    diffuse(buf, x + 1, y + 1, below_right);
}

#[inline(always)]
fn diffuse(buf: &mut Raster, x: u32, y: u32, delta: i32) {
    buf.set(x, y, saturating_add(buf.get(x, y), delta));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_sixteen() {
        assert_eq!(FLOYD_STEINBERG_WEIGHTS.iter().sum::<i32>(), 16);
    }

    #[test]
    fn truncated_shares_never_exceed_error() {
        for err in -128..=126 {
            let shares = FLOYD_STEINBERG_WEIGHTS.map(|w| err * w / 16);
            let total: i32 = shares.iter().sum();
            for s in shares {
                assert!(s.abs() <= err.abs(), "err={err} share={s}");
            }
            assert!(total.abs() <= err.abs());
            assert!(err.abs() - total.abs() <= 3, "err={err} total={total}");
        }
    }

    #[test]
    fn one_step_never_moves_a_neighbour_further_than_the_error() {
        let neighbours = [(2, 0), (0, 1), (1, 1), (2, 1)];
        for base in [0u8, 1, 60, 127, 128, 200, 254, 255] {
            for err in -128..=126 {
                let before = Raster::filled(3, 2, base);
                let mut after = before.clone();
                spread_error(&mut after, 1, 0, err);
                for (x, y) in neighbours {
                    let delta = i32::from(after.get(x, y)) - i32::from(before.get(x, y));
                    assert!(
                        delta.abs() <= err.abs(),
                        "base={base} err={err} ({x}, {y}) delta={delta}"
                    );
                    assert!(delta == 0 || delta.signum() == err.signum());
                }
                // The source pixel and the left one on its row are untouched.
                assert_eq!(after.get(0, 0), base);
                assert_eq!(after.get(1, 0), base);
            }
        }
    }

    #[test]
    fn simple_diffusion_does_not_wrap_rows() {
        let src = Raster::from_raw(2, 2, vec![100, 100, 100, 100]).unwrap();
        // Row 1 starts fresh at 100: the error of row 0's last pixel is dropped.
        assert_eq!(simple_error_diffusion(&src).as_raw(), &[0, 255, 0, 255]);
    }

    #[test]
    fn simple_diffusion_saturates_neighbour() {
        let src = Raster::from_raw(3, 1, vec![126, 200, 10]).unwrap();
        // 126 → 0, err 126 → 200+126 saturates to 255 → err 0 → 10 → 0.
        assert_eq!(simple_error_diffusion(&src).as_raw(), &[0, 255, 0]);
    }

    #[test]
    fn floyd_steinberg_interior_pixel_spreads_error() {
        // 3×2: only (1,0) is interior (not last row, not first/last column).
        #[rustfmt::skip]
        let src = Raster::from_raw(3, 2, vec![
            200, 100, 100,
            100, 100, 100,
        ]).unwrap();
        // (0,0): 200 → 255, edge column, no diffusion.
        // (1,0): 100 → 0, err 100 → right +43, below-left +18, below +31, below-right +6.
        // (2,0): 143 → 255. Row 1: 118 → 0, 131 → 255, 106 → 0.
        let out = floyd_steinberg(&src);
        assert_eq!(out.as_raw(), &[255, 0, 255, 0, 255, 0]);
    }

    #[test]
    fn floyd_steinberg_edges_discard_error() {
        // Two columns: every pixel is on the first or last column.
        let src = Raster::filled(2, 4, 100);
        assert!(floyd_steinberg(&src).as_raw().iter().all(|&v| v == 0));
        // Single row: last row never diffuses.
        let src = Raster::filled(5, 1, 100);
        assert!(floyd_steinberg(&src).as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn diffusion_outputs_are_bitonal() {
        let data = (0..17 * 13).map(|i| (i * 37 % 256) as u8).collect();
        let src = Raster::from_raw(17, 13, data).unwrap();
        assert!(simple_error_diffusion(&src).is_bitonal());
        assert!(floyd_steinberg(&src).is_bitonal());
    }

    #[test]
    fn diffusion_keeps_average_close() {
        let src = Raster::filled(64, 64, 64);
        let out = floyd_steinberg(&src);
        let white = out.as_raw().iter().filter(|&&v| v == 255).count();
        let fraction = white as f32 / (64.0 * 64.0);
        // 64/255 ≈ 0.25, minus the error lost on the edges.
        assert!(fraction > 0.15 && fraction < 0.30, "fraction={fraction}");
    }

    #[test]
    fn empty_raster_is_noop() {
        let empty = Raster::new(4, 0);
        assert_eq!(simple_error_diffusion(&empty), empty);
        assert_eq!(floyd_steinberg(&empty), empty);
    }
}
