//! Error type shared across the crate

use thiserror::Error;

/// Everything that can go wrong between upload and results
///
/// Every variant is recoverable at the boundary where it occurs; none ends
/// the session.
#[derive(Debug, Error)]
pub enum Error {
    /// Dropped or selected file is not an image
    #[error("not an image: {0}")]
    InvalidFileType(String),

    /// Confirm pressed with no usable selection
    #[error("no area selected")]
    EmptySelection,

    /// Confirm requested while no image is loaded
    #[error("no image loaded")]
    NoImage,

    /// A confirm is already waiting on the extraction service
    #[error("an extraction is already in progress")]
    Busy,

    /// Network error, non-2xx status or unsuccessful response
    #[error("text extraction failed: {0}")]
    ExtractionFailure(String),

    /// Table formatting service error
    #[error("table formatting failed: {0}")]
    FormattingFailure(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptySelection => "Please select an area of the image first.".to_string(),
            Error::ExtractionFailure(_) => {
                "Failed to extract text. Please make sure the backend server is running and try again."
                    .to_string()
            }
            Error::FormattingFailure(_) => "Could not format the text as a table.".to_string(),
            Error::NoImage => "Please upload an image first.".to_string(),
            Error::Busy => "Text extraction is already in progress.".to_string(),
            Error::InvalidFileType(_) | Error::Decode(_) => {
                "Please choose an image file.".to_string()
            }
            Error::Encode(_) | Error::Io(_) => format!("Something went wrong: {self}"),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
