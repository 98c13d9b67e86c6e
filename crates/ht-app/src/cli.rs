use std::path::PathBuf;

use std::str::FromStr;

use clap::Parser;
use ht_core::CoreError;
use ht_core::config::{Algorithm, DitherConfig, MatrixType, PatternType};

/// halftone — Monochrome halftoning of grayscale images.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image à traiter (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Dossier d'images à traiter récursivement.
    #[arg(long)]
    pub batch: Option<PathBuf>,

    /// Algorithme à appliquer (répétable) ; "all" sélectionne tous les filtres.
    #[arg(short, long = "algorithm")]
    pub algorithms: Vec<String>,

    /// Seuil des filtres à seuil fixe et bruité.
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Amplitude du bruit du filtre bruité.
    #[arg(short, long)]
    pub noise: Option<u8>,

    /// Banque de motifs (répétable) : clustered, dispersed, all.
    #[arg(long = "pattern")]
    pub patterns: Vec<String>,

    /// Matrice de seuils (répétable) : bayer_2x2, bayer_4x4, bayer_8x8,
    /// clustered_3x3_a, clustered_3x3_b, all.
    #[arg(long = "matrix")]
    pub matrices: Vec<String>,

    /// Graine des filtres aléatoires (sortie reproductible).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dossier de sortie des PNG.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Écrire aussi l'image en niveaux de gris.
    #[arg(long, default_value_t = false)]
    pub save_gray: bool,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that exactly one input is provided.
    ///
    /// # Errors
    /// Returns an error if neither or both of `--image` and `--batch` are given.
    pub fn validate_source(&self) -> anyhow::Result<()> {
        match (&self.image, &self.batch) {
            (None, None) => {
                anyhow::bail!("Aucune entrée spécifiée. Utilisez --image ou --batch.")
            }
            (Some(_), Some(_)) => {
                anyhow::bail!("Une seule entrée à la fois. Spécifiez --image OU --batch.")
            }
            _ => Ok(()),
        }
    }

    /// Algorithms named on the command line, `None` when the flag is absent.
    ///
    /// # Errors
    /// Returns an error on the first unknown algorithm name.
    pub fn selected_algorithms(&self) -> anyhow::Result<Option<Vec<Algorithm>>> {
        parse_selection(&self.algorithms, &Algorithm::ALL)
    }

    /// Appliquer les overrides CLI sur la configuration chargée.
    ///
    /// # Errors
    /// Returns an error if an algorithm, pattern or matrix name is unknown.
    pub fn apply_overrides(&self, config: &mut DitherConfig) -> anyhow::Result<()> {
        if let Some(algorithms) = self.selected_algorithms()? {
            config.algorithms = algorithms;
        }
        if let Some(t) = self.threshold {
            config.threshold = t;
        }
        if let Some(n) = self.noise {
            config.noise_threshold = n;
        }
        if let Some(patterns) = parse_selection(&self.patterns, &PatternType::ALL)? {
            config.patterns = patterns;
        }
        if let Some(matrices) = parse_selection(&self.matrices, &MatrixType::ALL)? {
            config.matrices = matrices;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(ref dir) = self.output {
            config.output_dir.clone_from(dir);
        }
        if self.save_gray {
            config.save_grayscale = true;
        }
        config.sanitize();
        Ok(())
    }
}

/// Noms répétés d'un sélecteur ; "all" ajoute toutes les valeurs.
fn parse_selection<T>(names: &[String], all: &[T]) -> anyhow::Result<Option<Vec<T>>>
where
    T: FromStr<Err = CoreError> + Copy,
{
    if names.is_empty() {
        return Ok(None);
    }
    let mut selected = Vec::new();
    for name in names {
        if name.eq_ignore_ascii_case("all") {
            selected.extend_from_slice(all);
        } else {
            selected.push(name.parse::<T>()?);
        }
    }
    Ok(Some(selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("halftone").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn exactly_one_input() {
        assert!(parse(&[]).validate_source().is_err());
        assert!(parse(&["--image", "a.png", "--batch", "d"]).validate_source().is_err());
        assert!(parse(&["--image", "a.png"]).validate_source().is_ok());
        assert!(parse(&["--batch", "d"]).validate_source().is_ok());
    }

    #[test]
    fn overrides_replace_file_values() {
        let cli = parse(&[
            "--image", "a.png", "-a", "ordered", "-a", "floyd-steinberg", "-t", "90", "-n", "20",
            "--matrix", "bayer_8x8", "--pattern", "dispersed", "--seed", "7", "-o", "res",
            "--save-gray",
        ]);
        let mut config = DitherConfig::default();
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(
            config.algorithms,
            vec![Algorithm::Ordered, Algorithm::FloydSteinberg]
        );
        assert_eq!(config.threshold, 90);
        assert_eq!(config.noise_threshold, 20);
        assert_eq!(config.matrices, vec![MatrixType::Bayer8x8]);
        assert_eq!(config.patterns, vec![PatternType::Dispersed]);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.output_dir, PathBuf::from("res"));
        assert!(config.save_grayscale);
    }

    #[test]
    fn all_selects_every_filter_once() {
        let cli = parse(&["--image", "a.png", "-a", "random", "-a", "all"]);
        let mut config = DitherConfig::default();
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.algorithms.len(), Algorithm::ALL.len());
        assert_eq!(config.algorithms[0], Algorithm::Random);
    }

    #[test]
    fn patterns_and_matrices_repeat() {
        let cli = parse(&[
            "--image", "a.png", "--pattern", "dispersed", "--pattern", "clustered", "--matrix",
            "all",
        ]);
        let mut config = DitherConfig::default();
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(
            config.patterns,
            vec![PatternType::Dispersed, PatternType::Clustered]
        );
        assert_eq!(config.matrices, MatrixType::ALL.to_vec());
    }

    #[test]
    fn unknown_selectors_fail_fast() {
        let cli = parse(&["--image", "a.png", "-a", "atkinson"]);
        assert!(cli.apply_overrides(&mut DitherConfig::default()).is_err());
        let cli = parse(&["--image", "a.png", "--matrix", "bayer_3x3"]);
        assert!(cli.apply_overrides(&mut DitherConfig::default()).is_err());
        let cli = parse(&["--image", "a.png", "--pattern", "checker"]);
        assert!(cli.apply_overrides(&mut DitherConfig::default()).is_err());
        assert!(Cli::try_parse_from(["halftone", "--image", "a.png", "-t", "300"]).is_err());
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = parse(&["--batch", "d"]);
        let mut config = DitherConfig {
            threshold: 42,
            ..Default::default()
        };
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.threshold, 42);
        assert_eq!(config.algorithms.len(), 7);
    }
}
