// Window module - Hosts the OLED pipeline in a desktop window
//
// This module provides window creation, frame pacing and presentation using
// the winit and pixels crates. The pixel buffer matches the window's inner
// size; the scaled canvas is blitted onto it at the resolved offsets.

use super::surface::{Color, RgbaFrame, Surface};
use crate::emulator::{Emulator, Machine, VideoConfig};
use crate::input::{physical_key_to_host, GamepadHandler};
use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Inner width in physical pixels
    pub width: u32,
    /// Inner height in physical pixels
    pub height: u32,
    /// Target redraw rate in Hz
    pub target_fps: u32,
    /// Whether to enable VSync
    pub vsync: bool,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 384×168, 60 FPS, VSync enabled
    pub fn new() -> Self {
        Self {
            width: 384,
            height: 168,
            target_fps: 60,
            vsync: true,
        }
    }

    /// Set the inner size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Set the target frame rate
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Inner size requested from the window system
    ///
    /// Physical pixels; the render session sees exactly this size.
    pub fn inner_size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width, self.height)
    }

    /// Get the frame duration for the target FPS
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.target_fps.max(1) as u64)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&VideoConfig> for WindowConfig {
    fn from(video: &VideoConfig) -> Self {
        Self::new()
            .with_size(video.window_width, video.window_height)
            .with_fps(video.fps)
            .with_vsync(video.vsync)
    }
}

/// Desktop window driving an emulator
pub struct OledWindow<M: Machine> {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    frame_size: (u32, u32),
    config: WindowConfig,
    emulator: Emulator<M>,
    gamepad: GamepadHandler,
    last_frame_time: Instant,
}

impl<M: Machine> OledWindow<M> {
    /// Create a new window (the OS window is created when the event loop starts)
    pub fn new(config: WindowConfig, emulator: Emulator<M>, gamepad: GamepadHandler) -> Self {
        Self {
            window: None,
            pixels: None,
            frame_size: (0, 0),
            config,
            emulator,
            gamepad,
            last_frame_time: Instant::now(),
        }
    }

    /// Get a reference to the emulator
    pub fn emulator(&self) -> &Emulator<M> {
        &self.emulator
    }

    /// Check if enough time has passed for the next frame
    fn should_render_frame(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_frame_time) >= self.config.frame_duration() {
            self.last_frame_time = now;
            true
        } else {
            false
        }
    }

    /// Run due emulated frames and present the canvas
    fn execute_and_render(&mut self, now: Instant) -> Result<(), pixels::Error> {
        self.emulator.advance(now);

        if let (Some(pixels), Some(canvas)) = (&mut self.pixels, self.emulator.session().canvas()) {
            let (width, height) = self.frame_size;
            let mut frame = RgbaFrame::new(pixels.frame_mut(), width, height);
            frame.fill(Color::BLACK);
            canvas.blit_to(&mut frame);
            pixels.render()?;
        }

        Ok(())
    }

    fn take_screenshot(&self) {
        match self.emulator.screenshot() {
            Ok(path) => info!("Screenshot saved to {}", path.display()),
            Err(e) => error!("Screenshot failed: {}", e),
        }
    }
}

impl<M: Machine> ApplicationHandler for OledWindow<M> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("OLED Glow")
            .with_inner_size(self.config.inner_size())
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attributes)
            .expect("Failed to create window");

        // Wrap window in Arc for shared ownership
        let window = Arc::new(window);
        let window_size = window.inner_size();

        // Create surface texture using Arc<Window> for safe 'static lifetime
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        let pixels = Pixels::new(window_size.width, window_size.height, surface_texture)
            .expect("Failed to create pixel buffer");

        info!(
            "Window created: {}x{} physical pixels",
            window_size.width, window_size.height
        );

        // The surface size is queried once; the session ignores later inits
        self.emulator
            .init_display(window_size.width, window_size.height);
        self.frame_size = (window_size.width, window_size.height);
        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting...");
                self.emulator.cleanup_display();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                // Key-up events are ignored; release comes from the timer
                if physical_key == PhysicalKey::Code(KeyCode::F12) {
                    self.take_screenshot();
                } else if let Some(code) = physical_key_to_host(physical_key) {
                    self.emulator.handle_key(code, Instant::now());
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if self.should_render_frame(now) {
                    if let Err(err) = self.execute_and_render(now) {
                        error!("Render error: {}", err);
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        self.emulator.update_gamepad(&mut self.gamepad, now);
        self.emulator.poll_release(now);

        let next_frame = self.last_frame_time + self.config.frame_duration();
        if now >= next_frame || !self.config.vsync {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        if self.config.vsync {
            let wake = self
                .emulator
                .next_release_deadline()
                .map_or(next_frame, |deadline| deadline.min(next_frame));
            event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
        }
    }
}

/// Create and run the window
///
/// # Arguments
/// * `config` - Window configuration
/// * `emulator` - Started emulator
///
/// # Returns
/// Result indicating success or error
pub fn run_window<M: Machine>(
    config: WindowConfig,
    emulator: Emulator<M>,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;

    // Set control flow based on VSync setting
    if config.vsync {
        event_loop.set_control_flow(ControlFlow::Wait);
    } else {
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    let gamepad_mapping = emulator.config().input.gamepad.to_gamepad_mapping()?;
    let gamepad = GamepadHandler::new(gamepad_mapping);

    info!(
        "Starting window {}x{} at {} FPS (VSync: {})",
        config.width, config.height, config.target_fps, config.vsync
    );

    let mut window = OledWindow::new(config, emulator, gamepad);
    event_loop.run_app(&mut window)?;

    Ok(())
}
