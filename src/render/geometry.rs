//! Shared geometry for the selection overlay
//!
//! Overlay constants and the mask layout used by the preview renderer.

/// Selection overlay constants
pub mod overlay {
    /// Stroke width of the selection outline in display pixels
    pub const STROKE_WIDTH: f32 = 2.0;
    /// Selection outline color (#3B82F6)
    pub const STROKE_RGBA: [u8; 4] = [0x3B, 0x82, 0xF6, 0xFF];
    /// Dimming applied outside the selection (50% black)
    pub const MASK_RGBA: [u8; 4] = [0, 0, 0, 128];
}

/// The four bands surrounding `(x, y, w, h)` inside a `width`×`height` surface
///
/// Returned as (x, y, w, h) tuples in top, right, bottom, left order. Bands
/// with no area are omitted.
pub fn mask_bands(
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
) -> Vec<(f32, f32, f32, f32)> {
    let right = x + w;
    let bottom = y + h;
    [
        (0.0, 0.0, width, y),
        (right, y, width - right, h),
        (0.0, bottom, width, height - bottom),
        (0.0, y, x, h),
    ]
    .into_iter()
    .filter(|&(_, _, bw, bh)| bw > 0.0 && bh > 0.0)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bands_cover_outside_area() {
        let bands = mask_bands(100.0, 50.0, 10.0, 10.0, 20.0, 20.0);
        assert_eq!(bands.len(), 4);
        let area: f32 = bands.iter().map(|(_, _, w, h)| w * h).sum();
        assert_eq!(area, 100.0 * 50.0 - 20.0 * 20.0);
    }

    #[test]
    fn test_mask_bands_skip_empty_edges() {
        // Selection touching the top-left corner has no top or left band
        let bands = mask_bands(100.0, 50.0, 0.0, 0.0, 40.0, 30.0);
        assert_eq!(bands.len(), 2);
    }
}
