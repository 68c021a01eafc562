//! Geometric types for selections and the display/source coordinate mapping

use std::num::NonZeroU32;

/// Selection rectangle in display-space pixels
///
/// A rectangle with zero width or height is the empty sentinel: no active
/// selection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// The empty selection
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a new rectangle from position and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Axis-aligned box spanned by two arbitrary corner points
    pub fn from_points(anchor: (f32, f32), current: (f32, f32)) -> Self {
        let (min_x, min_y, max_x, max_y) =
            normalize_rect(anchor.0, anchor.1, current.0, current.1);
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Check whether this is the empty sentinel
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Rectangle in source-image pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Convert to dimensions, `None` if either side is zero
    pub fn dimensions(self) -> Option<RectDimension> {
        RectDimension::new(self.width, self.height)
    }
}

/// Non-zero dimensions of a rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectDimension {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl RectDimension {
    /// Build from raw sizes, `None` if either is zero
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    /// Get the width as u32
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Get the height as u32
    pub fn height(&self) -> u32 {
        self.height.get()
    }
}

/// Relation between a loaded image and its on-screen rendering
///
/// Created once per loaded image by [`ImageGeometry::fit_to_viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageGeometry {
    natural: RectDimension,
    display: RectDimension,
    scale_ratio: f64,
}

impl ImageGeometry {
    /// Fit `natural` into `viewport`, preserving aspect ratio
    ///
    /// Width is anchored first. If the resulting height overflows the
    /// viewport, height is anchored instead. Display sizes are truncated to
    /// whole pixels, like a raster surface would be. The scale ratio keeps
    /// the exact value so both axes map with the same factor.
    pub fn fit_to_viewport(natural: RectDimension, viewport: RectDimension) -> Self {
        let nat_w = natural.width() as f64;
        let nat_h = natural.height() as f64;
        let view_w = viewport.width() as f64;
        let view_h = viewport.height() as f64;

        let mut display_w = view_w;
        let mut display_h = nat_h * view_w / nat_w;
        if display_h > view_h {
            display_h = view_h;
            display_w = nat_w * view_h / nat_h;
        }

        let display = RectDimension {
            width: NonZeroU32::new((display_w as u32).min(viewport.width()))
                .unwrap_or(NonZeroU32::MIN),
            height: NonZeroU32::new((display_h as u32).min(viewport.height()))
                .unwrap_or(NonZeroU32::MIN),
        };

        // Ratio of the anchored fit, not of the truncated pixel sizes
        Self {
            natural,
            display,
            scale_ratio: display_w / nat_w,
        }
    }

    pub fn natural(&self) -> RectDimension {
        self.natural
    }

    pub fn display(&self) -> RectDimension {
        self.display
    }

    /// Display width divided by natural width, before truncation
    pub fn scale_ratio(&self) -> f64 {
        self.scale_ratio
    }

    /// Map a display-space selection to clamped source-space pixels
    ///
    /// The result never references pixels outside the source bitmap.
    pub fn to_source_space(&self, rect: Rect) -> PixelRect {
        let scale = |v: f32| -> i64 { (v as f64 / self.scale_ratio).round() as i64 };
        let nat_w = self.natural.width() as i64;
        let nat_h = self.natural.height() as i64;

        let x = scale(rect.x).clamp(0, nat_w);
        let y = scale(rect.y).clamp(0, nat_h);
        let width = scale(rect.width).clamp(0, nat_w - x);
        let height = scale(rect.height).clamp(0, nat_h - y);

        PixelRect {
            x: x as u32,
            y: y as u32,
            width: width as u32,
            height: height as u32,
        }
    }

    /// Scale source-space pixels back into display space
    pub fn to_display_space(&self, rect: PixelRect) -> Rect {
        let scale = |v: u32| -> f32 { (v as f64 * self.scale_ratio) as f32 };
        Rect {
            x: scale(rect.x),
            y: scale(rect.y),
            width: scale(rect.width),
            height: scale(rect.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(w: u32, h: u32) -> RectDimension {
        RectDimension::new(w, h).unwrap()
    }

    #[test]
    fn test_fit_landscape_scenario() {
        let geometry = ImageGeometry::fit_to_viewport(dim(4000, 3000), dim(800, 600));
        assert_eq!(geometry.display(), dim(800, 600));
        assert!((geometry.scale_ratio() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_fit_anchors_on_height_for_tall_images() {
        let geometry = ImageGeometry::fit_to_viewport(dim(1000, 2000), dim(800, 600));
        assert_eq!(geometry.display(), dim(300, 600));
        assert!((geometry.scale_ratio() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_tall_image_maps_rows_with_unrounded_ratio() {
        // 576 * 600 / 4000 = 86.4, shown 86 px wide
        let geometry = ImageGeometry::fit_to_viewport(dim(576, 4000), dim(800, 600));
        let display = geometry.display();
        assert_eq!(display, dim(86, 600));
        assert!((geometry.scale_ratio() - 0.15).abs() < 1e-12);

        let bottom_half = Rect::new(0.0, 300.0, display.width() as f32, 300.0);
        let source = geometry.to_source_space(bottom_half);
        assert_eq!((source.y, source.height), (2000, 2000));
    }

    #[test]
    fn test_sliver_image_maps_full_height() {
        // Display width 0.12 is forced to one pixel
        let geometry = ImageGeometry::fit_to_viewport(dim(1, 5000), dim(800, 600));
        assert_eq!(geometry.display(), dim(1, 600));

        let middle = geometry.to_source_space(Rect::new(0.0, 300.0, 1.0, 1.0));
        assert_eq!(middle.y, 2500);
        let whole = geometry.to_source_space(Rect::new(0.0, 0.0, 1.0, 600.0));
        assert_eq!((whole.y, whole.height), (0, 5000));
    }

    #[test]
    fn test_normalize_rect_swaps_reversed_points() {
        assert_eq!(normalize_rect(5.0, 9.0, 1.0, 2.0), (1.0, 2.0, 5.0, 9.0));
        assert_eq!(normalize_rect(1.0, 2.0, 5.0, 9.0), (1.0, 2.0, 5.0, 9.0));
    }

    #[test]
    fn test_fit_upscales_small_images_to_viewport_width() {
        let geometry = ImageGeometry::fit_to_viewport(dim(200, 100), dim(800, 600));
        assert_eq!(geometry.display(), dim(800, 400));
        assert!((geometry.scale_ratio() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_stays_inside_viewport_and_keeps_aspect() {
        let naturals = [(1, 1), (7, 3), (3, 7), (1920, 1080), (1080, 1920), (5000, 17), (17, 5000)];
        let viewports = [(1, 1), (800, 600), (600, 800), (1366, 768), (333, 999)];
        for (nw, nh) in naturals {
            for (vw, vh) in viewports {
                let geometry = ImageGeometry::fit_to_viewport(dim(nw, nh), dim(vw, vh));
                let display = geometry.display();
                assert!(display.width() <= vw && display.height() <= vh);

                // Truncation to whole pixels costs at most one pixel on the
                // dimension derived from the anchored one
                let (dw, dh) = (display.width() as f64, display.height() as f64);
                let aspect = nw as f64 / nh as f64;
                assert!(
                    (dw - dh * aspect).abs() <= 1.0 || (dh - dw / aspect).abs() <= 1.0,
                    "{nw}x{nh} in {vw}x{vh}: {display:?}"
                );
            }
        }
    }

    #[test]
    fn test_to_source_space_scenario_a() {
        let geometry = ImageGeometry::fit_to_viewport(dim(4000, 3000), dim(800, 600));
        let source = geometry.to_source_space(Rect::new(100.0, 100.0, 200.0, 150.0));
        assert_eq!(
            source,
            PixelRect {
                x: 500,
                y: 500,
                width: 1000,
                height: 750
            }
        );
    }

    #[test]
    fn test_to_source_space_clamps_at_viewport_edge() {
        let geometry = ImageGeometry::fit_to_viewport(dim(4000, 3000), dim(800, 600));
        let source = geometry.to_source_space(Rect::new(790.0, 590.0, 50.0, 50.0));
        assert_eq!(
            source,
            PixelRect {
                x: 3950,
                y: 2950,
                width: 50,
                height: 50
            }
        );
    }

    #[test]
    fn test_to_source_space_entirely_outside_is_empty() {
        let geometry = ImageGeometry::fit_to_viewport(dim(4000, 3000), dim(800, 600));
        let source = geometry.to_source_space(Rect::new(900.0, 100.0, 40.0, 40.0));
        assert_eq!(source.x, 4000);
        assert_eq!(source.width, 0);
        assert!(source.dimensions().is_none());
    }

    #[test]
    fn test_to_source_space_rounds_half_away_from_zero() {
        // scale 0.5: 10.25 / 0.5 = 20.5 -> 21
        let geometry = ImageGeometry::fit_to_viewport(dim(200, 100), dim(100, 100));
        let source = geometry.to_source_space(Rect::new(10.25, 10.25, 1.25, 1.25));
        assert_eq!((source.x, source.y, source.width, source.height), (21, 21, 3, 3));
    }

    #[test]
    fn test_to_source_space_always_within_bounds() {
        let geometry = ImageGeometry::fit_to_viewport(dim(1234, 777), dim(640, 480));
        let natural = geometry.natural();
        for x in [0.0, 1.5, 320.0, 639.0, 700.0, 5000.0] {
            for w in [0.0, 0.4, 10.0, 639.0, 2000.0] {
                let source = geometry.to_source_space(Rect::new(x, x / 2.0, w, w));
                assert!(source.x + source.width <= natural.width());
                assert!(source.y + source.height <= natural.height());
            }
        }
    }

    #[test]
    fn test_round_trip_within_one_display_pixel() {
        let geometry = ImageGeometry::fit_to_viewport(dim(3001, 1999), dim(800, 600));
        let display = geometry.display();
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(13.7, 22.1, 100.3, 50.9),
            Rect::new(200.0, 100.0, 300.0, 200.0),
            Rect::new(0.0, 0.0, display.width() as f32, display.height() as f32),
        ];
        for rect in rects {
            let back = geometry.to_display_space(geometry.to_source_space(rect));
            assert!((back.x - rect.x).abs() <= 1.0);
            assert!((back.y - rect.y).abs() <= 1.0);
            assert!((back.width - rect.width).abs() <= 1.0);
            assert!((back.height - rect.height).abs() <= 1.0);
        }
    }

    #[test]
    fn test_rect_from_points_normalizes_any_direction() {
        let expected = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(Rect::from_points((10.0, 20.0), (40.0, 60.0)), expected);
        assert_eq!(Rect::from_points((40.0, 60.0), (10.0, 20.0)), expected);
        assert_eq!(Rect::from_points((40.0, 20.0), (10.0, 60.0)), expected);
        assert_eq!(Rect::from_points((10.0, 60.0), (40.0, 20.0)), expected);
    }

    #[test]
    fn test_rect_is_empty() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(5.0, 5.0, 10.0, 0.0).is_empty());
        assert!(!Rect::new(5.0, 5.0, 1.0, 1.0).is_empty());
    }
}
