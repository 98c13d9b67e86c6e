//! Tables de tramage : banques de motifs 3×3 et matrices de seuil.
//!
//! Toutes les tables sont des constantes ; les filtres y accèdent par
//! une sélection exhaustive (`match`) sans cas par défaut.

use ht_core::config::{MatrixType, PatternType};

/// One 3×3 bitonal cell, row-major.
pub type Pattern = [[u8; 3]; 3];

/// Ten patterns forming a growth sequence, index 0 = all black, 9 = all white.
pub type PatternBank = [Pattern; 10];

const O: u8 = 0;
const X: u8 = 255;

/// Banque groupée : les cellules allumées croissent en un seul amas.
///
/// ```text
/// ---   ---   ---   -X-   -XX   -XX   -XX   -XX   XXX   XXX
/// ---   -X-   -XX   -XX   -XX   -XX   XXX   XXX   XXX   XXX
/// ---   ---   ---   ---   ---   -X-   -X-   XX-   XX-   XXX
/// ```
pub const CLUSTERED_PATTERNS: PatternBank = [
    [[O, O, O], [O, O, O], [O, O, O]],
    [[O, O, O], [O, X, O], [O, O, O]],
    [[O, O, O], [O, X, X], [O, O, O]],
    [[O, X, O], [O, X, X], [O, O, O]],
    [[O, X, X], [O, X, X], [O, O, O]],
    [[O, X, X], [O, X, X], [O, X, O]],
    [[O, X, X], [X, X, X], [O, X, O]],
    [[O, X, X], [X, X, X], [X, X, O]],
    [[X, X, X], [X, X, X], [X, X, O]],
    [[X, X, X], [X, X, X], [X, X, X]],
];

/// Banque dispersée : les cellules allumées restent éloignées.
///
/// ```text
/// ---   X--   X--   X--   X-X   X-X   X-X   XXX   XXX   XXX
/// ---   ---   ---   --X   --X   X-X   X-X   X-X   XXX   XXX
/// ---   ---   -X-   -X-   -X-   -X-   XX-   XX-   XX-   XXX
/// ```
pub const DISPERSED_PATTERNS: PatternBank = [
    [[O, O, O], [O, O, O], [O, O, O]],
    [[X, O, O], [O, O, O], [O, O, O]],
    [[X, O, O], [O, O, O], [O, X, O]],
    [[X, O, O], [O, O, X], [O, X, O]],
    [[X, O, X], [O, O, X], [O, X, O]],
    [[X, O, X], [X, O, X], [O, X, O]],
    [[X, O, X], [X, O, X], [X, X, O]],
    [[X, X, X], [X, O, X], [X, X, O]],
    [[X, X, X], [X, X, X], [X, X, O]],
    [[X, X, X], [X, X, X], [X, X, X]],
];

/// Matrice de Bayer 2×2. Entrées 1..=4.
pub const BAYER_2X2: [u8; 4] = [
    1, 3, //
    4, 2,
];

/// Matrice de Bayer 4×4. Entrées 1..=16.
pub const BAYER_4X4: [u8; 16] = [
    1, 9, 3, 11, //
    13, 5, 15, 7, //
    4, 12, 2, 10, //
    16, 8, 14, 6,
];

/// Matrice de Bayer 8×8 classique décalée de +1. Entrées 1..=64.
pub const BAYER_8X8: [u8; 64] = [
    1, 33, 9, 41, 3, 35, 11, 43, //
    49, 17, 57, 25, 51, 19, 59, 27, //
    13, 45, 5, 37, 15, 47, 7, 39, //
    61, 29, 53, 21, 63, 31, 55, 23, //
    4, 36, 12, 44, 2, 34, 10, 42, //
    52, 20, 60, 28, 50, 18, 58, 26, //
    16, 48, 8, 40, 14, 46, 6, 38, //
    64, 32, 56, 24, 62, 30, 54, 22,
];

/// Point groupé 3×3, première variante. Entrées 1..=9.
pub const CLUSTERED_3X3_A: [u8; 9] = [
    8, 3, 4, //
    6, 1, 2, //
    7, 5, 9,
];

/// Point groupé 3×3, seconde variante. Entrées 1..=9.
pub const CLUSTERED_3X3_B: [u8; 9] = [
    1, 7, 4, //
    5, 8, 3, //
    6, 2, 9,
];

/// Square threshold matrix tiled over the image.
///
/// # Example
/// ```
/// use ht_core::config::MatrixType;
/// use ht_dither::tables::threshold_matrix;
/// let m = threshold_matrix(MatrixType::Bayer2x2);
/// assert_eq!(m.side(), 2);
/// assert_eq!(m.at(3, 2), 3);
/// assert_eq!(m.at(2, 1), 4);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ThresholdMatrix {
    side: usize,
    cells: &'static [u8],
}

impl ThresholdMatrix {
    /// Side length N.
    #[inline(always)]
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// N², also the largest entry.
    #[inline(always)]
    #[must_use]
    pub fn levels(&self) -> u32 {
        (self.side * self.side) as u32
    }

    /// Entry at `(y mod N, x mod N)`.
    #[inline(always)]
    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.cells[(y % self.side) * self.side + (x % self.side)]
    }

    /// All entries, row-major.
    #[must_use]
    pub fn cells(&self) -> &'static [u8] {
        self.cells
    }
}

/// Matrice associée au sélecteur. Chaque variante a sa propre table.
#[must_use]
pub fn threshold_matrix(kind: MatrixType) -> ThresholdMatrix {
    let (side, cells): (usize, &'static [u8]) = match kind {
        MatrixType::Bayer2x2 => (2, &BAYER_2X2),
        MatrixType::Bayer4x4 => (4, &BAYER_4X4),
        MatrixType::Bayer8x8 => (8, &BAYER_8X8),
        MatrixType::Clustered3x3A => (3, &CLUSTERED_3X3_A),
        MatrixType::Clustered3x3B => (3, &CLUSTERED_3X3_B),
    };
    ThresholdMatrix { side, cells }
}

/// Banque associée au sélecteur.
#[must_use]
pub fn pattern_bank(kind: PatternType) -> &'static PatternBank {
    match kind {
        PatternType::Clustered => &CLUSTERED_PATTERNS,
        PatternType::Dispersed => &DISPERSED_PATTERNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_cells(p: &Pattern) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (y, row) in p.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v == X {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn banks_are_growth_sequences() {
        for kind in PatternType::ALL {
            let bank = pattern_bank(kind);
            for i in 0..9 {
                let current = lit_cells(&bank[i]);
                let next = lit_cells(&bank[i + 1]);
                assert_eq!(next.len(), current.len() + 1, "{kind} : {i} → {}", i + 1);
                assert!(
                    current.iter().all(|c| next.contains(c)),
                    "{kind} : motif {i} pas inclus dans {}",
                    i + 1
                );
            }
        }
    }

    #[test]
    fn banks_are_bitonal_and_anchored() {
        for kind in PatternType::ALL {
            let bank = pattern_bank(kind);
            assert!(bank.iter().flatten().flatten().all(|&v| v == O || v == X));
            assert!(lit_cells(&bank[0]).is_empty());
            assert_eq!(lit_cells(&bank[9]).len(), 9);
        }
    }

    #[test]
    fn matrices_are_permutations() {
        for kind in MatrixType::ALL {
            let m = threshold_matrix(kind);
            let n2 = m.side() * m.side();
            assert_eq!(m.cells().len(), n2, "{kind}");
            let mut sorted = m.cells().to_vec();
            sorted.sort_unstable();
            let expected: Vec<u8> = (1..=n2 as u8).collect();
            assert_eq!(sorted, expected, "{kind} n'est pas une permutation de 1..={n2}");
        }
    }

    #[test]
    fn each_selector_has_its_own_matrix() {
        let a = threshold_matrix(MatrixType::Bayer8x8);
        assert_eq!(a.side(), 8);
        let b = threshold_matrix(MatrixType::Clustered3x3A);
        let c = threshold_matrix(MatrixType::Clustered3x3B);
        assert_eq!(b.side(), 3);
        assert_ne!(b.cells(), c.cells());
    }

    #[test]
    fn matrix_tiles_modulo_side() {
        let m = threshold_matrix(MatrixType::Bayer4x4);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(m.at(x, y), m.at(x + 4, y + 8));
            }
        }
        assert_eq!(m.at(1, 0), 9);
        assert_eq!(m.at(0, 3), 16);
    }
}
