//! Halftoning engine for halftone.
//!
//! Converts grayscale rasters to bitonal (0/255) rasters with threshold,
//! noise, random, pattern, ordered and error-diffusion filters.

pub mod diffusion;
pub mod monochrome;
pub mod ordered;
pub mod pattern;
pub mod rng;
pub mod saturate;
pub mod tables;
pub mod threshold;

pub use monochrome::MonochromeDither;
pub use rng::RngSource;
