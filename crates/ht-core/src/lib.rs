//! Configuration, types, and shared structures for halftone.
//!
//! This crate contains the raster containers, selectors, configuration
//! loading and the filter traits shared across the halftone workspace.

pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use config::{Algorithm, DitherConfig, MatrixType, PatternType, Run};
pub use error::CoreError;
pub use frame::{FrameBuffer, Raster};
pub use traits::{Dither, UniformSource};
