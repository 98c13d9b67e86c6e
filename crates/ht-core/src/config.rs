use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Seuil par défaut des filtres à seuil fixe.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Amplitude par défaut du bruit du seuil bruité.
pub const DEFAULT_NOISE_THRESHOLD: u8 = 64;

/// Normalise un nom de sélecteur : casse ignorée, `-` ≡ `_`.
fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

/// Halftoning algorithm selector.
///
/// # Example
/// ```
/// use ht_core::config::Algorithm;
/// let a: Algorithm = "floyd-steinberg".parse().unwrap();
/// assert_eq!(a, Algorithm::FloydSteinberg);
/// assert_eq!(a.to_string(), "floyd_steinberg");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Single global threshold.
    FixedThreshold,
    /// Global threshold on a noise-perturbed value.
    NoiseThreshold,
    /// Threshold against a fresh uniform draw per pixel.
    Random,
    /// 3×3 growth-sequence pattern substitution.
    Patterned,
    /// Tiled threshold matrix.
    Ordered,
    /// Whole error pushed to the right neighbour.
    SimpleErrorDiffusion,
    /// Floyd–Steinberg four-neighbour diffusion.
    FloydSteinberg,
}

impl Algorithm {
    /// Every algorithm, in presentation order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::FixedThreshold,
        Algorithm::NoiseThreshold,
        Algorithm::Random,
        Algorithm::Patterned,
        Algorithm::Ordered,
        Algorithm::SimpleErrorDiffusion,
        Algorithm::FloydSteinberg,
    ];

    /// Stable snake_case name, used for output file suffixes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::FixedThreshold => "fixed_threshold",
            Algorithm::NoiseThreshold => "noise_threshold",
            Algorithm::Random => "random",
            Algorithm::Patterned => "patterned",
            Algorithm::Ordered => "ordered",
            Algorithm::SimpleErrorDiffusion => "simple_error_diffusion",
            Algorithm::FloydSteinberg => "floyd_steinberg",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize(s);
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .ok_or_else(|| CoreError::UnknownSelector {
                kind: "algorithme",
                value: s.to_string(),
            })
    }
}

/// Pattern bank used by the pattern filter.
///
/// # Example
/// ```
/// use ht_core::config::PatternType;
/// assert_eq!(PatternType::default(), PatternType::Clustered);
/// assert!("checker".parse::<PatternType>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Intensified cells grow as one blob (hides dot gain).
    #[default]
    Clustered,
    /// Intensified cells are spread out (less grain on precise displays).
    Dispersed,
}

impl PatternType {
    /// Both banks.
    pub const ALL: [PatternType; 2] = [PatternType::Clustered, PatternType::Dispersed];

    /// Stable snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::Clustered => "clustered",
            PatternType::Dispersed => "dispersed",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize(s);
        PatternType::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| CoreError::UnknownSelector {
                kind: "type de motif",
                value: s.to_string(),
            })
    }
}

/// Threshold matrix used by the ordered filter.
///
/// # Example
/// ```
/// use ht_core::config::MatrixType;
/// assert_eq!(MatrixType::default(), MatrixType::Bayer4x4);
/// assert_eq!("BAYER-8X8".parse::<MatrixType>().unwrap(), MatrixType::Bayer8x8);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum MatrixType {
    /// 2×2 Bayer.
    #[serde(rename = "bayer_2x2")]
    Bayer2x2,
    /// 4×4 Bayer.
    #[default]
    #[serde(rename = "bayer_4x4")]
    Bayer4x4,
    /// 8×8 Bayer.
    #[serde(rename = "bayer_8x8")]
    Bayer8x8,
    /// First 3×3 clustered-dot variant.
    #[serde(rename = "clustered_3x3_a")]
    Clustered3x3A,
    /// Second 3×3 clustered-dot variant.
    #[serde(rename = "clustered_3x3_b")]
    Clustered3x3B,
}

impl MatrixType {
    /// Every matrix.
    pub const ALL: [MatrixType; 5] = [
        MatrixType::Bayer2x2,
        MatrixType::Bayer4x4,
        MatrixType::Bayer8x8,
        MatrixType::Clustered3x3A,
        MatrixType::Clustered3x3B,
    ];

    /// Stable snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatrixType::Bayer2x2 => "bayer_2x2",
            MatrixType::Bayer4x4 => "bayer_4x4",
            MatrixType::Bayer8x8 => "bayer_8x8",
            MatrixType::Clustered3x3A => "clustered_3x3_a",
            MatrixType::Clustered3x3B => "clustered_3x3_b",
        }
    }
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize(s);
        MatrixType::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| CoreError::UnknownSelector {
                kind: "matrice",
                value: s.to_string(),
            })
    }
}

/// Une passe concrète : un algorithme avec le motif et la matrice qu'il utilise.
///
/// Seul le filtre par motifs lit `pattern`, seul le filtre ordonné lit `matrix`.
///
/// # Example
/// ```
/// use ht_core::config::{Algorithm, MatrixType, PatternType, Run};
/// let run = Run { algorithm: Algorithm::Ordered, pattern: PatternType::Clustered, matrix: MatrixType::Bayer8x8 };
/// assert_eq!(run.label(), "ordered_bayer_8x8");
/// assert_eq!(Run::from(Algorithm::Random).label(), "random");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub algorithm: Algorithm,
    pub pattern: PatternType,
    pub matrix: MatrixType,
}

impl Run {
    /// Suffixe de fichier : l'algorithme, suivi du motif ou de la matrice
    /// quand l'algorithme en dépend.
    #[must_use]
    pub fn label(&self) -> String {
        match self.algorithm {
            Algorithm::Patterned => format!("{}_{}", self.algorithm, self.pattern),
            Algorithm::Ordered => format!("{}_{}", self.algorithm, self.matrix),
            other => other.as_str().to_string(),
        }
    }
}

impl From<Algorithm> for Run {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            pattern: PatternType::default(),
            matrix: MatrixType::default(),
        }
    }
}

/// Paramètres complets d'une passe de tramage.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ht_core::config::DitherConfig;
/// let config = DitherConfig::default();
/// assert_eq!(config.threshold, 128);
/// assert_eq!(config.noise_threshold, 64);
/// assert_eq!(config.algorithms.len(), 7);
/// // Les deux banques de motifs, une passe chacune.
/// assert_eq!(config.runs().len(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DitherConfig {
    // === Filtres ===
    /// Algorithms to run, in order.
    pub algorithms: Vec<Algorithm>,
    /// Threshold for fixed and noise thresholding.
    pub threshold: u8,
    /// Noise amplitude; perturbation is drawn from [-n/2, n/2].
    pub noise_threshold: u8,
    /// Banks rendered by the pattern filter, one output each.
    pub patterns: Vec<PatternType>,
    /// Matrices rendered by the ordered filter, one output each.
    pub matrices: Vec<MatrixType>,
    /// Seed for the random-driven filters. `None` = OS entropy.
    pub seed: Option<u64>,

    // === Sortie ===
    /// Dossier de sortie des PNG.
    pub output_dir: PathBuf,
    /// Écrire aussi l'image en niveaux de gris.
    pub save_grayscale: bool,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            threshold: DEFAULT_THRESHOLD,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            patterns: PatternType::ALL.to_vec(),
            matrices: vec![MatrixType::default()],
            seed: None,
            output_dir: PathBuf::from("out"),
            save_grayscale: false,
        }
    }
}

/// Retire les doublons, première occurrence gardée.
fn dedup_in_order<T: PartialEq>(items: &mut Vec<T>) {
    let mut seen = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    *items = seen;
}

impl DitherConfig {
    /// Drop duplicate selectors (first occurrence wins) and restore the
    /// defaults of any list left empty.
    ///
    /// # Example
    /// ```
    /// use ht_core::config::{Algorithm, DitherConfig};
    /// let mut c = DitherConfig { algorithms: vec![Algorithm::Ordered, Algorithm::Ordered], ..Default::default() };
    /// c.sanitize();
    /// assert_eq!(c.algorithms, vec![Algorithm::Ordered]);
    /// ```
    pub fn sanitize(&mut self) {
        dedup_in_order(&mut self.algorithms);
        dedup_in_order(&mut self.patterns);
        dedup_in_order(&mut self.matrices);
        if self.algorithms.is_empty() {
            log::warn!("Aucun algorithme sélectionné, utilisation de la liste complète.");
            self.algorithms = Algorithm::ALL.to_vec();
        }
        if self.patterns.is_empty() {
            log::warn!("Aucun motif sélectionné, utilisation des deux banques.");
            self.patterns = PatternType::ALL.to_vec();
        }
        if self.matrices.is_empty() {
            log::warn!("Aucune matrice sélectionnée, utilisation de bayer_4x4.");
            self.matrices = vec![MatrixType::default()];
        }
    }

    /// Expand the selection into concrete runs, in algorithm order: one run
    /// per bank for the pattern filter, one per matrix for the ordered filter,
    /// one for every other algorithm.
    #[must_use]
    pub fn runs(&self) -> Vec<Run> {
        let pattern = self.patterns.first().copied().unwrap_or_default();
        let matrix = self.matrices.first().copied().unwrap_or_default();
        let mut runs = Vec::new();
        for &algorithm in &self.algorithms {
            match algorithm {
                Algorithm::Patterned => runs.extend(self.patterns.iter().map(|&pattern| Run {
                    algorithm,
                    pattern,
                    matrix,
                })),
                Algorithm::Ordered => runs.extend(self.matrices.iter().map(|&matrix| Run {
                    algorithm,
                    pattern,
                    matrix,
                })),
                _ => runs.push(Run {
                    algorithm,
                    pattern,
                    matrix,
                }),
            }
        }
        runs
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    dither: DitherSection,
    output: Option<OutputSection>,
}

/// Dither section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DitherSection {
    algorithms: Option<Vec<Algorithm>>,
    threshold: Option<u8>,
    noise_threshold: Option<u8>,
    patterns: Option<Vec<PatternType>>,
    matrices: Option<Vec<MatrixType>>,
    seed: Option<u64>,
}

/// Output section of the TOML config, all fields optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    directory: Option<PathBuf>,
    save_grayscale: Option<bool>,
}

/// Parse une configuration TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the text is not valid TOML, if `[dither]` is missing,
/// or if a selector name is unknown.
///
/// # Example
/// ```
/// use ht_core::config::{parse_config, MatrixType};
/// let config = parse_config("[dither]\nmatrices = [\"bayer_8x8\"]\n").unwrap();
/// assert_eq!(config.matrices, vec![MatrixType::Bayer8x8]);
/// assert_eq!(config.threshold, 128);
/// ```
pub fn parse_config(content: &str) -> Result<DitherConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = DitherConfig::default();

    let d = file.dither;
    if let Some(v) = d.algorithms {
        config.algorithms = v;
    }
    if let Some(v) = d.threshold {
        config.threshold = v;
    }
    if let Some(v) = d.noise_threshold {
        config.noise_threshold = v;
    }
    if let Some(v) = d.patterns {
        config.patterns = v;
    }
    if let Some(v) = d.matrices {
        config.matrices = v;
    }
    if d.seed.is_some() {
        config.seed = d.seed;
    }

    if let Some(o) = file.output {
        if let Some(v) = o.directory {
            config.output_dir = v;
        }
        if let Some(v) = o.save_grayscale {
            config.save_grayscale = v;
        }
    }

    config.sanitize();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ht_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<DitherConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn selectors_reject_unknown_names() {
        let err = "bayer_16x16".parse::<MatrixType>().unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownSelector {
                kind: "matrice",
                value: "bayer_16x16".into()
            }
        );
        assert!("".parse::<Algorithm>().is_err());
        assert!("cluster".parse::<PatternType>().is_err());
    }

    #[test]
    fn selector_names_roundtrip() {
        for a in Algorithm::ALL {
            assert_eq!(a.to_string().parse::<Algorithm>().unwrap(), a);
        }
        for m in MatrixType::ALL {
            assert_eq!(m.to_string().parse::<MatrixType>().unwrap(), m);
        }
        for p in PatternType::ALL {
            assert_eq!(p.to_string().parse::<PatternType>().unwrap(), p);
        }
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let config = parse_config(
            r#"
            [dither]
            algorithms = ["ordered", "floyd_steinberg", "ordered"]
            noise_threshold = 120
            patterns = ["dispersed"]
            matrices = ["bayer_2x2", "bayer_8x8", "bayer_2x2"]
            seed = 7

            [output]
            directory = "renders"
            save_grayscale = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.algorithms,
            vec![Algorithm::Ordered, Algorithm::FloydSteinberg]
        );
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.noise_threshold, 120);
        assert_eq!(config.patterns, vec![PatternType::Dispersed]);
        assert_eq!(
            config.matrices,
            vec![MatrixType::Bayer2x2, MatrixType::Bayer8x8]
        );
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.output_dir, PathBuf::from("renders"));
        assert!(config.save_grayscale);
    }

    #[test]
    fn unknown_matrix_in_file_fails() {
        assert!(parse_config("[dither]\nmatrices = [\"bayer_3x3\"]\n").is_err());
        assert!(parse_config("[dither]\nmatrix = \"bayer_4x4\"\n").is_err());
        assert!(parse_config("[dither]\nthreshold = 300\n").is_err());
        assert!(parse_config("[output]\ndirectory = \"x\"\n").is_err());
    }

    #[test]
    fn empty_lists_restore_defaults() {
        let config =
            parse_config("[dither]\nalgorithms = []\npatterns = []\nmatrices = []\n").unwrap();
        assert_eq!(config.algorithms, Algorithm::ALL.to_vec());
        assert_eq!(config.patterns, PatternType::ALL.to_vec());
        assert_eq!(config.matrices, vec![MatrixType::Bayer4x4]);
    }

    #[test]
    fn runs_expand_banks_and_matrices() {
        let config = DitherConfig {
            algorithms: vec![
                Algorithm::Patterned,
                Algorithm::FloydSteinberg,
                Algorithm::Ordered,
            ],
            patterns: vec![PatternType::Dispersed, PatternType::Clustered],
            matrices: vec![MatrixType::Bayer8x8, MatrixType::Clustered3x3A],
            ..Default::default()
        };
        let labels: Vec<String> = config.runs().iter().map(Run::label).collect();
        assert_eq!(
            labels,
            [
                "patterned_dispersed",
                "patterned_clustered",
                "floyd_steinberg",
                "ordered_bayer_8x8",
                "ordered_clustered_3x3_a",
            ]
        );
    }

    #[test]
    fn load_config_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dither]\nthreshold = 100\nmatrices = [\"clustered_3x3_b\"]").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.threshold, 100);
        assert_eq!(config.matrices, vec![MatrixType::Clustered3x3B]);
    }

    #[test]
    fn load_config_missing_file() {
        assert!(load_config(Path::new("/nonexistent/halftone.toml")).is_err());
    }
}
