// Render session - The single rendering context for the OLED image
//
// Owns the luminance map, the resolved geometry and the canvas. The session
// is created empty and becomes active on `init`; `render` is a no-op until
// then so out-of-order host callbacks are harmless.

use super::geometry::DisplayGeometry;
use super::luma::LumaBuffer;
use super::raster::{rasterize, BACKGROUND};
use super::surface::{Canvas, Surface};
use super::vram::Vram;
use log::{debug, info};

/// Rendering context with an explicit init/cleanup lifecycle
pub struct RenderSession {
    canvas: Option<Canvas>,
    geometry: DisplayGeometry,
    luma: LumaBuffer,
    initialized: bool,
}

impl RenderSession {
    /// Create an uninitialized session
    pub fn new() -> Self {
        Self {
            canvas: None,
            geometry: DisplayGeometry::default(),
            luma: LumaBuffer::new(),
            initialized: false,
        }
    }

    /// Initialize the session for an output surface of the given size
    ///
    /// Resets the luminance map, resolves geometry and creates a black canvas.
    /// Calling this on an initialized session does nothing.
    ///
    /// # Arguments
    /// * `screen_width` - Output surface width in pixels
    /// * `screen_height` - Output surface height in pixels
    pub fn init(&mut self, screen_width: u32, screen_height: u32) {
        if self.initialized {
            debug!("Render session already initialized, ignoring init");
            return;
        }

        let width = i32::try_from(screen_width).unwrap_or(i32::MAX);
        let height = i32::try_from(screen_height).unwrap_or(i32::MAX);

        self.luma.clear();
        self.geometry = DisplayGeometry::resolve(width, height);

        let mut canvas = Canvas::new(&self.geometry);
        canvas.fill(BACKGROUND);
        self.canvas = Some(canvas);
        self.initialized = true;

        info!(
            "Render session ready: screen {}x{}, scale {}x, canvas {}x{} at ({}, {})",
            screen_width,
            screen_height,
            self.geometry.scale,
            self.geometry.canvas_width,
            self.geometry.canvas_height,
            self.geometry.offset_x,
            self.geometry.offset_y
        );
    }

    /// Release the canvas and return to the uninitialized state
    pub fn cleanup(&mut self) {
        if self.initialized {
            self.canvas = None;
            self.initialized = false;
            info!("Render session closed");
        }
    }

    /// Fold one emulated frame into the luminance map
    ///
    /// # Arguments
    /// * `vram` - Latest controller frame
    /// * `decay` - Luminance lost by every pixel
    /// * `increment` - Luminance gained by lit pixels
    pub fn update_lumamap(&mut self, vram: &Vram, decay: u8, increment: u8) {
        self.luma.update(vram, decay, increment);
    }

    /// Repaint the canvas from the luminance map
    ///
    /// Silently does nothing before `init` or after `cleanup`.
    pub fn render(&mut self) {
        if !self.initialized {
            return;
        }

        if let Some(canvas) = &mut self.canvas {
            rasterize(&self.luma, &self.geometry, canvas);
        }
    }

    /// Whether `init` has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The canvas, if the session is initialized
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Resolved geometry (1:1 default before init)
    pub fn geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    /// Current luminance map
    pub fn luma(&self) -> &LumaBuffer {
        &self.luma
    }
}

impl Default for RenderSession {
    fn default() -> Self {
        Self::new()
    }
}
