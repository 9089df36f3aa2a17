// Luminance map - Simulates OLED afterglow
//
// Each logical pixel carries an 8-bit brightness accumulator. Every emulated
// frame the accumulator loses `decay` and gains `increment` if the controller
// bit is set, so a pixel toggled faster than the eye can follow settles at a
// partial brightness instead of flickering.

use super::vram::{Vram, OLED_HEIGHT, OLED_PIXELS, OLED_WIDTH, PAGE_COUNT};

/// Grayscale luminance buffer (128×64, row-major)
#[derive(Clone, PartialEq, Eq)]
pub struct LumaBuffer {
    pixels: [u8; OLED_PIXELS],
}

impl LumaBuffer {
    /// Create a dark luminance buffer
    pub fn new() -> Self {
        Self {
            pixels: [0; OLED_PIXELS],
        }
    }

    /// Apply one emulated frame of decay and excitation
    ///
    /// For every pixel: `luma = clamp(luma - decay + (bit ? increment : 0), 0, 255)`.
    /// Decay applies to every pixel, lit or not.
    ///
    /// # Arguments
    /// * `vram` - Latest controller frame
    /// * `decay` - Amount subtracted from every pixel
    /// * `increment` - Amount added to pixels whose bit is set
    pub fn update(&mut self, vram: &Vram, decay: u8, increment: u8) {
        let decay = i16::from(decay);
        let increment = i16::from(increment);

        for page in 0..PAGE_COUNT {
            let row_base = page * 8;
            for col in 0..OLED_WIDTH {
                let mut bits = vram.column(page, col);

                for bit in 0..8 {
                    let index = (row_base + bit) * OLED_WIDTH + col;
                    let mut luma = i16::from(self.pixels[index]) - decay;
                    if bits & 0x01 != 0 {
                        luma += increment;
                    }

                    self.pixels[index] = luma.clamp(0, 255) as u8;
                    bits >>= 1;
                }
            }
        }
    }

    /// Luminance at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < OLED_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < OLED_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * OLED_WIDTH + x]
    }

    /// Overwrite the luminance at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, luma: u8) {
        assert!(x < OLED_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < OLED_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * OLED_WIDTH + x] = luma;
    }

    /// Reset every pixel to dark
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Raw luminance values, row-major
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for LumaBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LumaBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let peak = self.pixels.iter().copied().max().unwrap_or(0);
        f.debug_struct("LumaBuffer").field("peak", &peak).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pixel_frame() -> Vram {
        let mut vram = Vram::new();
        vram.set_column(0, 0, 0b0000_0001);
        vram
    }

    #[test]
    fn test_luma_starts_dark() {
        let luma = LumaBuffer::new();
        assert!(luma.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_single_pixel_accumulates() {
        let vram = single_pixel_frame();
        let mut luma = LumaBuffer::new();

        // 0 - 10 + 50
        luma.update(&vram, 10, 50);
        assert_eq!(luma.get(0, 0), 40);
        assert_eq!(luma.as_slice().iter().filter(|&&v| v != 0).count(), 1);

        luma.update(&vram, 10, 50);
        assert_eq!(luma.get(0, 0), 80);
    }

    #[test]
    fn test_formula_over_all_levels() {
        let lit = {
            let mut vram = Vram::new();
            vram.fill(0xFF);
            vram
        };
        let dark = Vram::new();

        for &(decay, increment) in &[(0u8, 0u8), (1, 0), (0, 255), (10, 50), (200, 100), (255, 255)] {
            for start in [0u8, 1, 9, 10, 127, 200, 254, 255] {
                let mut luma = LumaBuffer::new();
                luma.set(3, 17, start);
                luma.update(&dark, decay, increment);
                assert_eq!(
                    luma.get(3, 17),
                    start.saturating_sub(decay),
                    "dark: L={} d={} i={}",
                    start,
                    decay,
                    increment
                );

                let mut luma = LumaBuffer::new();
                luma.set(3, 17, start);
                luma.update(&lit, decay, increment);
                let expected = (i16::from(start) - i16::from(decay) + i16::from(increment))
                    .clamp(0, 255) as u8;
                assert_eq!(luma.get(3, 17), expected, "lit: L={} d={} i={}", start, decay, increment);
            }
        }
    }

    #[test]
    fn test_zero_decay_zero_increment_is_identity() {
        let mut vram = Vram::new();
        vram.set_pixel(10, 10, true);
        vram.set_pixel(100, 60, true);

        let mut luma = LumaBuffer::new();
        luma.set(10, 10, 77);
        luma.set(50, 20, 200);
        let before = luma.clone();

        for _ in 0..16 {
            luma.update(&vram, 0, 0);
        }
        assert_eq!(luma, before);
    }

    #[test]
    fn test_unlit_pixel_decays_monotonically() {
        let vram = Vram::new();
        let mut luma = LumaBuffer::new();
        luma.set(64, 32, 255);

        let mut previous = luma.get(64, 32);
        loop {
            luma.update(&vram, 7, 99);
            let current = luma.get(64, 32);
            if previous == 0 {
                assert_eq!(current, 0);
                break;
            }
            assert!(current < previous);
            previous = current;
        }

        luma.update(&vram, 7, 99);
        assert_eq!(luma.get(64, 32), 0);
    }

    #[test]
    fn test_saturates_at_full_brightness() {
        let vram = single_pixel_frame();
        let mut luma = LumaBuffer::new();
        for _ in 0..10 {
            luma.update(&vram, 0, 100);
        }
        assert_eq!(luma.get(0, 0), 255);
    }

    #[test]
    fn test_bit_order_within_page() {
        let mut vram = Vram::new();
        vram.set_column(2, 9, 0b0000_0100); // row 2*8+2 = 18
        let mut luma = LumaBuffer::new();
        luma.update(&vram, 0, 40);

        assert_eq!(luma.get(9, 18), 40);
        assert_eq!(luma.get(9, 16), 0);
        assert_eq!(luma.get(9, 17), 0);
    }

    #[test]
    fn test_clear() {
        let vram = single_pixel_frame();
        let mut luma = LumaBuffer::new();
        luma.update(&vram, 0, 100);
        luma.clear();
        assert_eq!(luma.get(0, 0), 0);
    }
}
