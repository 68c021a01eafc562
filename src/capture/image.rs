//! Uploaded source image and the ingestion boundary

use std::path::Path;
use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbaImage;

use crate::domain::RectDimension;
use crate::error::{Error, Result};

/// A decoded upload at full original resolution
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub rgba: Arc<RgbaImage>,
    /// Media type the upload was accepted as
    pub media_type: String,
    dimensions: RectDimension,
}

impl SourceImage {
    /// Wrap an already decoded bitmap
    pub fn from_rgba(rgba: RgbaImage, media_type: impl Into<String>) -> Result<Self> {
        let dimensions = RectDimension::new(rgba.width(), rgba.height())
            .ok_or_else(|| Error::InvalidFileType("image has no pixels".to_string()))?;
        Ok(Self {
            rgba: Arc::new(rgba),
            media_type: media_type.into(),
            dimensions,
        })
    }

    /// Decode an in-memory upload whose media type was reported by the caller
    ///
    /// Anything outside the `image/*` family is rejected before decoding.
    pub fn from_bytes(bytes: &[u8], media_type: &str) -> Result<Self> {
        ensure_image_media_type(media_type)?;
        let decoded = image::load_from_memory(bytes)?;
        log::debug!(
            "Decoded {} upload: {}x{} pixels",
            media_type,
            decoded.width(),
            decoded.height()
        );
        Self::from_rgba(decoded.into_rgba8(), media_type)
    }

    /// Read and decode a file, judging its media type by extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let media_type = mime_guess::from_path(path)
            .first()
            .ok_or_else(|| Error::InvalidFileType(path.display().to_string()))?;
        ensure_image_media_type(media_type.essence_str())?;
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, media_type.essence_str())
    }

    /// Decode a `data:<media type>;base64,<payload>` URI
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let invalid = || Error::InvalidFileType("malformed data URI".to_string());
        let rest = uri.strip_prefix("data:").ok_or_else(invalid)?;
        let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let media_type = header.strip_suffix(";base64").ok_or_else(invalid)?;
        ensure_image_media_type(media_type)?;
        let bytes = STANDARD.decode(payload.trim()).map_err(|_| invalid())?;
        Self::from_bytes(&bytes, media_type)
    }

    pub fn dimensions(&self) -> RectDimension {
        self.dimensions
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }
}

/// Accept only media types in the image family
pub fn ensure_image_media_type(media_type: &str) -> Result<()> {
    let top_level = media_type.split('/').next().unwrap_or_default();
    if top_level.trim().eq_ignore_ascii_case("image") && media_type.contains('/') {
        Ok(())
    } else {
        Err(Error::InvalidFileType(media_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| image::Rgba([x as u8, y as u8, 7, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_media_type_check() {
        assert!(ensure_image_media_type("image/png").is_ok());
        assert!(ensure_image_media_type("image/jpeg").is_ok());
        assert!(ensure_image_media_type("IMAGE/webp").is_ok());
        assert!(matches!(
            ensure_image_media_type("application/pdf"),
            Err(Error::InvalidFileType(_))
        ));
        assert!(ensure_image_media_type("text/plain").is_err());
        assert!(ensure_image_media_type("image").is_err());
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        let source = SourceImage::from_bytes(&png_bytes(12, 5), "image/png").unwrap();
        assert_eq!((source.width(), source.height()), (12, 5));
        assert_eq!(source.rgba.get_pixel(3, 4).0, [3, 4, 7, 255]);
    }

    #[test]
    fn test_from_bytes_rejects_non_image_type() {
        let err = SourceImage::from_bytes(&png_bytes(2, 2), "application/octet-stream").unwrap_err();
        assert!(matches!(err, Error::InvalidFileType(_)));
    }

    #[test]
    fn test_from_bytes_reports_undecodable_payload() {
        let err = SourceImage::from_bytes(b"definitely not a png", "image/png").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_from_path_uses_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("scan.png");
        std::fs::write(&image_path, png_bytes(4, 3)).unwrap();
        let source = SourceImage::from_path(&image_path).unwrap();
        assert_eq!(source.media_type, "image/png");
        assert_eq!(source.height(), 3);

        let text_path = dir.path().join("notes.txt");
        std::fs::write(&text_path, "hello").unwrap();
        assert!(matches!(
            SourceImage::from_path(&text_path),
            Err(Error::InvalidFileType(_))
        ));
    }

    #[test]
    fn test_from_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(6, 2)));
        let source = SourceImage::from_data_uri(&uri).unwrap();
        assert_eq!((source.width(), source.height()), (6, 2));

        assert!(SourceImage::from_data_uri("data:text/plain;base64,aGk=").is_err());
        assert!(SourceImage::from_data_uri("image/png;base64,AAAA").is_err());
    }
}
