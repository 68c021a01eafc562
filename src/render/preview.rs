//! Display-sized preview of the source image with the selection overlay
//!
//! The preview is for showing on screen only. Cropping always reads from
//! the full-resolution source.

use image::RgbaImage;
use image::imageops::FilterType;
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{self, overlay};
use crate::domain::{ImageGeometry, Rect};

/// Downscale (or upscale) the source to its display size
pub fn display_copy(source: &RgbaImage, geometry: &ImageGeometry) -> RgbaImage {
    let display = geometry.display();
    image::imageops::resize(source, display.width(), display.height(), FilterType::CatmullRom)
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    img.copy_from_slice(pixmap.data());
}

/// Draw the selection overlay onto a copy of `display`
///
/// Outside the selection is dimmed and the selection is outlined. An empty
/// selection leaves the image untouched.
pub fn render_preview(display: &RgbaImage, selection: Rect) -> RgbaImage {
    let mut img = display.clone();
    if selection.is_empty() {
        return img;
    }

    let (width, height) = (img.width() as f32, img.height() as f32);
    with_pixmap(&mut img, |pixmap| {
        let [r, g, b, a] = overlay::MASK_RGBA;
        let mut mask = Paint::default();
        mask.set_color_rgba8(r, g, b, a);

        for (x, y, w, h) in geometry::mask_bands(
            width,
            height,
            selection.x,
            selection.y,
            selection.width,
            selection.height,
        ) {
            if let Some(band) = tiny_skia::Rect::from_xywh(x, y, w, h) {
                pixmap.fill_rect(band, &mask, Transform::identity(), None);
            }
        }

        let Some(outline) =
            tiny_skia::Rect::from_xywh(selection.x, selection.y, selection.width, selection.height)
        else {
            return;
        };
        let path = PathBuilder::from_rect(outline);
        let [r, g, b, a] = overlay::STROKE_RGBA;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: overlay::STROKE_WIDTH,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    });
    img
}
