//! Core application module
//!
//! This module contains:
//! - Screen flow from upload through selection to results (app.rs)
//! - The results view with optional table formatting (results.rs)

pub mod app;
pub mod results;

pub use app::{App, Screen};
pub use results::ResultsView;
