//! Image ingestion and cropping
//!
//! This module consolidates:
//! - Source image decoding and media type checks (image.rs)
//! - Lossless crop and PNG encoding (crop.rs)

pub mod crop;
pub mod image;
