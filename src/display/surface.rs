// Output surfaces - Pixel-addressable write targets for the rasterizer
//
// The rasterizer addresses surfaces in screen coordinates. Every surface
// clips writes that land outside its bounds, so a geometry with negative
// offsets never writes out of range.

use super::geometry::{DisplayGeometry, MAX_CANVAS_PIXELS};
use log::warn;

/// Opaque 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Black background
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Full-brightness white
    pub const WHITE: Color = Color {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };

    /// Create a color from three 8-bit channels
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray level replicated across all channels (no gamma correction)
    #[inline]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Convert to the RGBA byte layout used by the pixels crate
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

/// Write target for the rasterizer
pub trait Surface {
    /// Surface width in pixels
    fn width(&self) -> u32;

    /// Surface height in pixels
    fn height(&self) -> u32;

    /// Fill the entire surface with one opaque color
    fn fill(&mut self, color: Color);

    /// Set a single pixel in screen coordinates; out-of-bounds writes are dropped
    fn set_px(&mut self, x: i32, y: i32, color: Color);
}

/// Fixed-capacity canvas placed on the screen at an offset
///
/// The backing arena is allocated once and sized for the largest supported
/// scale factor; nothing is allocated while rendering.
pub struct Canvas {
    buffer: Box<[Color]>,
    width: u32,
    height: u32,
    origin_x: i32,
    origin_y: i32,
}

impl Canvas {
    /// Create a canvas matching a resolved geometry
    ///
    /// The canvas covers `canvas_width × canvas_height` screen pixels starting
    /// at the geometry offsets, and is cleared to black. A geometry too large
    /// for the arena is placed at 1x instead.
    pub fn new(geometry: &DisplayGeometry) -> Self {
        let fitted = geometry.fit_arena();
        if fitted.scale != geometry.scale {
            warn!(
                "{}x canvas exceeds the {} pixel arena, using 1x",
                geometry.scale, MAX_CANVAS_PIXELS
            );
        }
        let geometry = &fitted;

        Self {
            buffer: vec![Color::BLACK; MAX_CANVAS_PIXELS].into_boxed_slice(),
            width: geometry.canvas_width,
            height: geometry.canvas_height,
            origin_x: geometry.offset_x,
            origin_y: geometry.offset_y,
        }
    }

    /// Screen position of the canvas' top-left pixel
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Arena capacity in pixels
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Read a pixel in canvas-local coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    pub fn get_px(&self, x: u32, y: u32) -> Color {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.buffer[(y * self.width + x) as usize]
    }

    /// Canvas pixels in use, row-major
    pub fn pixels(&self) -> &[Color] {
        &self.buffer[..self.len()]
    }

    /// Copy the canvas onto a larger RGBA frame at the canvas origin
    ///
    /// Rows and columns falling outside the frame are skipped.
    pub fn blit_to(&self, frame: &mut RgbaFrame<'_>) {
        for y in 0..self.height {
            let row = &self.buffer[(y * self.width) as usize..((y + 1) * self.width) as usize];
            for (x, &color) in row.iter().enumerate() {
                frame.set_px(self.origin_x + x as i32, self.origin_y + y as i32, color);
            }
        }
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Color) {
        let len = self.len();
        self.buffer[..len].fill(color);
    }

    #[inline]
    fn set_px(&mut self, x: i32, y: i32, color: Color) {
        let local_x = x - self.origin_x;
        let local_y = y - self.origin_y;
        if local_x < 0 || local_y < 0 || local_x >= self.width as i32 || local_y >= self.height as i32 {
            return;
        }

        self.buffer[local_y as usize * self.width as usize + local_x as usize] = color;
    }
}

/// Screen-sized RGBA frame borrowed from the presentation layer
pub struct RgbaFrame<'a> {
    bytes: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> RgbaFrame<'a> {
    /// Wrap an RGBA byte buffer
    ///
    /// # Panics
    /// Panics if the buffer is smaller than `width * height * 4` bytes
    pub fn new(bytes: &'a mut [u8], width: u32, height: u32) -> Self {
        assert!(
            bytes.len() >= width as usize * height as usize * 4,
            "RGBA buffer too small for {}x{} frame",
            width,
            height
        );

        Self {
            bytes,
            width,
            height,
        }
    }
}

impl Surface for RgbaFrame<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba();
        let len = self.width as usize * self.height as usize * 4;
        for pixel in self.bytes[..len].chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    #[inline]
    fn set_px(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.bytes[offset..offset + 4].copy_from_slice(&color.to_rgba());
    }
}
