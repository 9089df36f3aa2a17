// Scaled rasterizer - Paints the luminance map onto an output surface
//
// Each OLED pixel becomes a scale×scale block of gray at
// (x*scale + offset_x, y*scale + offset_y). The whole frame is repainted
// every call.

use super::geometry::DisplayGeometry;
use super::luma::LumaBuffer;
use super::surface::{Color, Surface};
use super::vram::{OLED_HEIGHT, OLED_WIDTH};

/// Background color behind and around the OLED image
pub const BACKGROUND: Color = Color::BLACK;

/// Convert an 8-bit luminance to a surface color
#[inline]
pub fn luma_to_color(luma: u8) -> Color {
    Color::gray(luma)
}

/// Paint a luminance buffer onto a surface
///
/// # Arguments
/// * `luma` - Luminance buffer to draw
/// * `geometry` - Resolved scale and offsets
/// * `surface` - Write target (clips out-of-bounds writes)
pub fn rasterize<S: Surface + ?Sized>(luma: &LumaBuffer, geometry: &DisplayGeometry, surface: &mut S) {
    surface.fill(BACKGROUND);

    let scale = geometry.scale.max(1) as i32;
    let pixels = luma.as_slice();

    for y in 0..OLED_HEIGHT {
        let block_y = y as i32 * scale + geometry.offset_y;
        for x in 0..OLED_WIDTH {
            let color = luma_to_color(pixels[y * OLED_WIDTH + x]);
            let block_x = x as i32 * scale + geometry.offset_x;

            for dy in 0..scale {
                for dx in 0..scale {
                    surface.set_px(block_x + dx, block_y + dy, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::surface::{Canvas, RgbaFrame};

    /// Surface that records every write for inspection
    struct RecordingSurface {
        width: u32,
        height: u32,
        fills: Vec<Color>,
        writes: Vec<(i32, i32, Color)>,
    }

    impl RecordingSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                fills: Vec::new(),
                writes: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn fill(&mut self, color: Color) {
            self.fills.push(color);
        }

        fn set_px(&mut self, x: i32, y: i32, color: Color) {
            self.writes.push((x, y, color));
        }
    }

    #[test]
    fn test_clears_before_drawing() {
        let luma = LumaBuffer::new();
        let geometry = DisplayGeometry::resolve(128, 64);
        let mut surface = RecordingSurface::new(128, 64);

        rasterize(&luma, &geometry, &mut surface);
        assert_eq!(surface.fills, vec![BACKGROUND]);
    }

    #[test]
    fn test_every_pixel_painted_as_scaled_block() {
        let luma = LumaBuffer::new();
        let geometry = DisplayGeometry::resolve(256, 128);
        let mut surface = RecordingSurface::new(256, 128);

        rasterize(&luma, &geometry, &mut surface);
        assert_eq!(surface.writes.len(), 128 * 64 * 4);
    }

    #[test]
    fn test_block_placement_with_offset() {
        let mut luma = LumaBuffer::new();
        luma.set(1, 2, 200);

        let geometry = DisplayGeometry::resolve(384, 168); // scale 2, offset (64, 20)
        let mut canvas = Canvas::new(&geometry);
        rasterize(&luma, &geometry, &mut canvas);

        // Source (1,2) covers canvas-local (2..4, 4..6)
        for dy in 0..2 {
            for dx in 0..2 {
                assert_eq!(canvas.get_px(2 + dx, 4 + dy), Color::gray(200));
            }
        }
        assert_eq!(canvas.get_px(1, 4), Color::BLACK);
        assert_eq!(canvas.get_px(4, 4), Color::BLACK);
        assert_eq!(canvas.get_px(2, 6), Color::BLACK);
    }

    #[test]
    fn test_writes_use_screen_coordinates() {
        let mut luma = LumaBuffer::new();
        luma.set(0, 0, 255);

        let geometry = DisplayGeometry::resolve(260, 130);
        let mut surface = RecordingSurface::new(260, 130);
        rasterize(&luma, &geometry, &mut surface);

        let white: Vec<_> = surface
            .writes
            .iter()
            .filter(|(_, _, c)| *c == Color::WHITE)
            .map(|&(x, y, _)| (x, y))
            .collect();
        assert_eq!(white, vec![(2, 1), (3, 1), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_negative_offsets_clip_instead_of_overflowing() {
        let mut luma = LumaBuffer::new();
        for x in 0..128 {
            luma.set(x, 0, 255);
            luma.set(x, 63, 255);
        }

        // Surface smaller than the OLED: offsets are (-14, -12)
        let geometry = DisplayGeometry::resolve(100, 40);
        let mut bytes = vec![0u8; 100 * 40 * 4];
        let mut frame = RgbaFrame::new(&mut bytes, 100, 40);
        rasterize(&luma, &geometry, &mut frame);

        // Rows 0 and 63 of the OLED fall outside the 40-row surface
        assert!(bytes.chunks_exact(4).all(|px| *px == [0, 0, 0, 0xFF]));
    }

    #[test]
    fn test_luma_to_color_is_linear_gray() {
        for level in [0u8, 1, 64, 128, 255] {
            assert_eq!(luma_to_color(level), Color::new(level, level, level));
        }
    }
}
