//! Lossless cropping of a display-space selection out of the source bitmap

use std::io;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbaImage;

use crate::domain::{ImageGeometry, PixelRect, Rect};
use crate::error::{Error, Result};

/// Losslessly encoded crop, ready to hand to the extraction service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// Render as a `data:image/png;base64,…` URI
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Copy the selected region at original resolution
///
/// `rect` is in display space. It is mapped through `geometry` and clamped
/// to the source bounds; pixels are copied 1:1 without resampling.
pub fn crop(source: &RgbaImage, rect: Rect, geometry: &ImageGeometry) -> Result<RgbaImage> {
    let region = geometry.to_source_space(rect);
    crop_region(source, region)
}

/// Copy an already mapped source-space region
pub fn crop_region(source: &RgbaImage, region: PixelRect) -> Result<RgbaImage> {
    let dims = region.dimensions().ok_or(Error::EmptySelection)?;
    log::debug!(
        "Cropping {}x{} at ({}, {}) from {}x{} source",
        dims.width(),
        dims.height(),
        region.x,
        region.y,
        source.width(),
        source.height()
    );
    Ok(image::imageops::crop_imm(source, region.x, region.y, dims.width(), dims.height()).to_image())
}

/// Encode as 8-bit RGBA PNG
pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage> {
    let mut png = Vec::new();
    write_png(&mut png, image)?;
    Ok(EncodedImage {
        png,
        width: image.width(),
        height: image.height(),
    })
}

/// Crop then encode, the full path from confirmed selection to payload
pub fn crop_and_encode(source: &RgbaImage, rect: Rect, geometry: &ImageGeometry) -> Result<EncodedImage> {
    let cropped = crop(source, rect, geometry)?;
    encode_png(&cropped)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
