//! Rendering module
//!
//! This module contains:
//! - Shared geometry for the selection overlay (geometry.rs)
//! - Selection preview rendering using tiny-skia (preview.rs)

pub mod geometry;
pub mod preview;
