//! Image sources for halftone: decoding, PNG encoding, folder scanning.

pub mod folder_batch;
pub mod image;
