use crate::config::{Algorithm, DitherConfig, MatrixType, PatternType, Run};
use crate::frame::Raster;

/// Source de tirages uniformes pour les filtres aléatoires.
///
/// Chaque appel est un tirage indépendant ; deux pixels ne partagent
/// jamais un tirage.
///
/// # Example
/// ```
/// use ht_core::traits::UniformSource;
///
/// struct Constant(u8);
/// impl UniformSource for Constant {
///     fn next_u8(&mut self) -> u8 { self.0 }
///     fn next_in_range(&mut self, low: i16, _high: i16) -> i16 { low }
/// }
/// assert_eq!(Constant(7).next_u8(), 7);
/// ```
pub trait UniformSource {
    /// Uniform integer over [0, 255].
    fn next_u8(&mut self) -> u8;

    /// Uniform integer over the inclusive range [low, high].
    fn next_in_range(&mut self, low: i16, high: i16) -> i16;
}

/// Famille de filtres de tramage bitonal.
///
/// Chaque filtre lit `src` sans le modifier et retourne une nouvelle grille
/// de mêmes dimensions. Une grille vide donne une grille vide.
///
/// Implémenté par : `MonochromeDither`.
pub trait Dither {
    /// 0 if the sample is below `threshold`, else 255.
    fn fixed_threshold(&self, src: &Raster, threshold: u8) -> Raster;

    /// Fixed threshold on the sample plus a uniform perturbation in
    /// [-noise_threshold/2, noise_threshold/2].
    fn noise_threshold(&mut self, src: &Raster, noise_threshold: u8, threshold: u8) -> Raster;

    /// 0 if the sample is below a fresh uniform draw in [0, 255], else 255.
    fn random(&mut self, src: &Raster) -> Raster;

    /// Replace stride-2 3×3 windows by a pattern-bank entry chosen from the
    /// window mean. Pixels outside every complete window keep their gray value.
    fn patterned(&self, src: &Raster, pattern: PatternType) -> Raster;

    /// Compare the sample scaled to [0, N²] against the tiled matrix entry.
    fn ordered(&self, src: &Raster, matrix: MatrixType) -> Raster;

    /// Threshold at 127 and push the whole error to the right neighbour.
    fn simple_error_diffusion(&self, src: &Raster) -> Raster;

    /// Threshold at 127 and split the error 7/5/3/1 sixteenths.
    fn floyd_steinberg(&self, src: &Raster) -> Raster;

    /// Nom lisible pour le debug.
    fn name(&self) -> &'static str;

    /// Run one algorithm with the bank or matrix chosen by `run` and the
    /// thresholds held in `config`.
    fn apply(&mut self, src: &Raster, run: Run, config: &DitherConfig) -> Raster {
        log::debug!(
            "{} : {} sur {}×{}",
            self.name(),
            run.label(),
            src.width(),
            src.height()
        );
        match run.algorithm {
            Algorithm::FixedThreshold => self.fixed_threshold(src, config.threshold),
            Algorithm::NoiseThreshold => {
                self.noise_threshold(src, config.noise_threshold, config.threshold)
            }
            Algorithm::Random => self.random(src),
            Algorithm::Patterned => self.patterned(src, run.pattern),
            Algorithm::Ordered => self.ordered(src, run.matrix),
            Algorithm::SimpleErrorDiffusion => self.simple_error_diffusion(src),
            Algorithm::FloydSteinberg => self.floyd_steinberg(src),
        }
    }
}
