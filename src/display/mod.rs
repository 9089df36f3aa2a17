// Display module - OLED persistence simulation and scaled presentation
//
// This module provides:
// - The paged 128×64 controller frame (VRAM)
// - Per-pixel luminance tracking with decay and increment
// - Integer scale and centering for arbitrary output sizes
// - Rasterization onto a fixed-capacity canvas
// - Window creation and presentation using winit + pixels

pub mod geometry;
pub mod luma;
pub mod raster;
pub mod session;
pub mod surface;
pub mod vram;
pub mod window;

pub use geometry::{DisplayGeometry, ARENA_FACTOR, MAX_CANVAS_PIXELS};
pub use luma::LumaBuffer;
pub use raster::{luma_to_color, rasterize, BACKGROUND};
pub use session::RenderSession;
pub use surface::{Canvas, Color, RgbaFrame, Surface};
pub use vram::{Vram, OLED_HEIGHT, OLED_PIXELS, OLED_WIDTH, PAGE_COUNT};
pub use window::{run_window, OledWindow, WindowConfig};
