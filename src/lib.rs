//! Select a region of an uploaded image, crop it losslessly at full
//! resolution and send it to a remote text extraction service.

pub mod capture;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod ocr;
pub mod render;
pub mod session;
pub mod table;

pub use error::{Error, Result};

/// Install the default logger, honouring `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
