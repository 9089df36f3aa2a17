// Display geometry - Integer scaling and centering of the OLED image
//
// The OLED image is scaled by the largest whole factor that fits the output
// surface in both dimensions, then centered. The scaled canvas must also fit
// the fixed canvas arena; if it does not, the image falls back to 1:1.

use super::vram::{OLED_HEIGHT, OLED_PIXELS, OLED_WIDTH};
use log::warn;

/// Canvas arena size in multiples of the OLED pixel count
pub const ARENA_FACTOR: usize = 8;

/// Canvas arena capacity in pixels
pub const MAX_CANVAS_PIXELS: usize = OLED_PIXELS * ARENA_FACTOR;

/// Resolved placement of the scaled OLED image on the output surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    /// Integer scale factor (always at least 1)
    pub scale: u32,
    /// Horizontal offset of the canvas on the surface (may be negative)
    pub offset_x: i32,
    /// Vertical offset of the canvas on the surface (may be negative)
    pub offset_y: i32,
    /// Scaled image width in pixels
    pub canvas_width: u32,
    /// Scaled image height in pixels
    pub canvas_height: u32,
}

impl DisplayGeometry {
    /// Resolve geometry against the default canvas capacity
    ///
    /// # Arguments
    /// * `surface_width` - Output surface width in pixels
    /// * `surface_height` - Output surface height in pixels
    pub fn resolve(surface_width: i32, surface_height: i32) -> Self {
        Self::resolve_with_capacity(surface_width, surface_height, MAX_CANVAS_PIXELS)
    }

    /// Resolve geometry against an explicit canvas capacity
    ///
    /// Never fails: surfaces smaller than the OLED render at 1:1 with
    /// negative offsets, and canvases larger than `capacity` fall back to 1:1.
    ///
    /// # Arguments
    /// * `surface_width` - Output surface width in pixels
    /// * `surface_height` - Output surface height in pixels
    /// * `capacity` - Maximum number of canvas pixels
    pub fn resolve_with_capacity(surface_width: i32, surface_height: i32, capacity: usize) -> Self {
        let surface_width = surface_width.max(0);
        let surface_height = surface_height.max(0);

        let scale_by_height = surface_height / OLED_HEIGHT as i32;
        let scale_by_width = surface_width / OLED_WIDTH as i32;
        let scale = scale_by_height.min(scale_by_width).max(1) as u32;

        let geometry = Self::centered(scale, surface_width, surface_height);

        if geometry.canvas_pixels() > capacity {
            warn!(
                "{}x canvas ({}x{}) exceeds capacity of {} pixels, falling back to 1x",
                scale, geometry.canvas_width, geometry.canvas_height, capacity
            );
            return Self::centered(1, surface_width, surface_height);
        }

        geometry
    }

    /// Geometry for a fixed scale centered on the surface
    fn centered(scale: u32, surface_width: i32, surface_height: i32) -> Self {
        let canvas_width = OLED_WIDTH as u32 * scale;
        let canvas_height = OLED_HEIGHT as u32 * scale;

        Self {
            scale,
            offset_x: (surface_width - canvas_width as i32) / 2,
            offset_y: (surface_height - canvas_height as i32) / 2,
            canvas_width,
            canvas_height,
        }
    }

    /// The same placement at 1x if this canvas does not fit the arena
    ///
    /// Keeps the image centered on the same surface.
    pub fn fit_arena(&self) -> Self {
        if self.canvas_pixels() <= MAX_CANVAS_PIXELS {
            return *self;
        }

        let center_x = self.offset_x + self.canvas_width as i32 / 2;
        let center_y = self.offset_y + self.canvas_height as i32 / 2;
        Self {
            scale: 1,
            offset_x: center_x - OLED_WIDTH as i32 / 2,
            offset_y: center_y - OLED_HEIGHT as i32 / 2,
            canvas_width: OLED_WIDTH as u32,
            canvas_height: OLED_HEIGHT as u32,
        }
    }

    /// Number of pixels in the scaled canvas
    pub fn canvas_pixels(&self) -> usize {
        self.canvas_width as usize * self.canvas_height as usize
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::centered(1, OLED_WIDTH as i32, OLED_HEIGHT as i32)
    }
}
