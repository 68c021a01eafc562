//! Pure domain types with minimal dependencies
//!
//! This module contains the selection geometry and history types. Nothing
//! here depends on image decoding, networking or a UI toolkit.

pub mod geometry;
pub mod selection;

pub use geometry::*;
pub use selection::*;
