use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// A selector name (algorithm, pattern type, matrix type) outside the known set.
    #[error("{kind} inconnu : '{value}'")]
    UnknownSelector {
        /// Which selector family was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Raw pixel buffer does not match the declared dimensions.
    #[error("Buffer de {actual} octets pour {width}×{height} (attendu {expected})")]
    BufferSize {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },

    /// Sub-rectangle does not fit inside the raster.
    #[error("Région {w}×{h} à ({x}, {y}) hors de la grille {width}×{height}")]
    RegionOutOfBounds {
        /// Left edge of the region.
        x: u32,
        /// Top edge of the region.
        y: u32,
        /// Region width.
        w: u32,
        /// Region height.
        h: u32,
        /// Raster width.
        width: u32,
        /// Raster height.
        height: u32,
    },
}
