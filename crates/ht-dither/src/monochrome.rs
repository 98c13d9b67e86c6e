use ht_core::config::{MatrixType, PatternType};
use ht_core::frame::Raster;
use ht_core::traits::{Dither, UniformSource};
use rand::rngs::StdRng;

use crate::rng::RngSource;
use crate::{diffusion, ordered, pattern, threshold};

/// Implémentation bitonale (noir/blanc) de la famille de filtres.
///
/// Les tables sont des constantes ; la seule donnée propre à l'instance est
/// la source aléatoire des filtres bruité et aléatoire.
///
/// # Example
/// ```
/// use ht_core::config::{Algorithm, DitherConfig};
/// use ht_core::frame::Raster;
/// use ht_core::traits::Dither;
/// use ht_dither::MonochromeDither;
///
/// let mut dither = MonochromeDither::seeded(1);
/// let gray = Raster::filled(4, 4, 128);
/// let config = DitherConfig::default();
/// let out = dither.apply(&gray, Algorithm::FixedThreshold.into(), &config);
/// assert!(out.as_raw().iter().all(|&v| v == 255));
/// ```
pub struct MonochromeDither<S = RngSource<StdRng>> {
    source: S,
}

impl MonochromeDither {
    /// Reproducible instance: random-driven filters replay the same draws.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        log::debug!("Source aléatoire initialisée avec la graine {seed}");
        Self::with_source(RngSource::seeded(seed))
    }

    /// Instance seeded from operating-system entropy.
    #[must_use]
    pub fn from_os() -> Self {
        log::debug!("Source aléatoire initialisée depuis l'entropie système");
        Self::with_source(RngSource::from_os())
    }

    /// Seeded when `seed` is given, OS entropy otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_os(),
        }
    }
}

impl<S: UniformSource> MonochromeDither<S> {
    /// Use a caller-supplied uniform source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }
}

impl<S: UniformSource> Dither for MonochromeDither<S> {
    fn fixed_threshold(&self, src: &Raster, threshold: u8) -> Raster {
        threshold::fixed_threshold(src, threshold)
    }

    fn noise_threshold(&mut self, src: &Raster, noise_threshold: u8, threshold: u8) -> Raster {
        threshold::noise_threshold(src, noise_threshold, threshold, &mut self.source)
    }

    fn random(&mut self, src: &Raster) -> Raster {
        threshold::random(src, &mut self.source)
    }

    fn patterned(&self, src: &Raster, pattern: PatternType) -> Raster {
        pattern::patterned(src, pattern)
    }

    fn ordered(&self, src: &Raster, matrix: MatrixType) -> Raster {
        ordered::ordered(src, matrix)
    }

    fn simple_error_diffusion(&self, src: &Raster) -> Raster {
        diffusion::simple_error_diffusion(src)
    }

    fn floyd_steinberg(&self, src: &Raster) -> Raster {
        diffusion::floyd_steinberg(src)
    }

    fn name(&self) -> &'static str {
        "monochrome"
    }
}
