// Emulator module - Machine interface and frontend coordinator
//
// This module defines the interface the emulated handheld implements and the
// coordinator that wires a machine to the render session and the input
// translator. The coordinator exposes the host-facing entry points: display
// initialization, per-frame update-and-render, and key events.

mod clock;
mod config;
pub mod demo;
mod screenshot;

pub use clock::TickClock;
pub use config::{
    AppConfig, ConfigError, PersistenceConfig, ScreenshotConfig, VideoConfig, CONFIG_FILE,
};
pub use demo::DemoMachine;
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::display::{RenderSession, Vram, OLED_HEIGHT, OLED_WIDTH};
use crate::input::{Button, ButtonSink, GamepadHandler, InputTranslator, KeyMap};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Default GDB stub port passed to the machine
pub const DEFAULT_GDB_PORT: u16 = 1234;

/// Default pixel size for machines that open their own preview
pub const DEFAULT_PIXEL_SIZE: u32 = 2;

/// Options handed to the machine at setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOptions {
    /// Firmware image; `None` selects the machine's embedded default
    pub hex_path: Option<PathBuf>,
    /// Pixel size for the machine's own preview
    pub pixel_size: u32,
    /// Preview width (OLED width × pixel size)
    pub win_width: u32,
    /// Preview height (OLED height × pixel size)
    pub win_height: u32,
    /// GDB stub port
    pub gdb_port: u16,
    /// Machine-side key map; key handling stays in the frontend
    pub key_map: Option<KeyMap>,
}

impl SetupOptions {
    /// Create options for a firmware path
    ///
    /// An empty path is treated like no path.
    pub fn new(hex_path: Option<PathBuf>) -> Self {
        let hex_path = hex_path.filter(|path| !path.as_os_str().is_empty());
        Self {
            hex_path,
            pixel_size: DEFAULT_PIXEL_SIZE,
            win_width: OLED_WIDTH as u32 * DEFAULT_PIXEL_SIZE,
            win_height: OLED_HEIGHT as u32 * DEFAULT_PIXEL_SIZE,
            gdb_port: DEFAULT_GDB_PORT,
            key_map: None,
        }
    }
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Errors that abort the start sequence
#[derive(Debug, Error)]
pub enum SetupError {
    /// The machine cannot run the requested firmware
    #[error("unsupported firmware image: {}", .0.display())]
    UnsupportedFirmware(PathBuf),

    /// The firmware image could not be read
    #[error("failed to read firmware {}: {source}", path.display())]
    Firmware {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The machine rejected its setup options
    #[error("machine setup failed: {0}")]
    Machine(String),

    /// The frontend configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The emulated handheld
///
/// Button events arrive through the `ButtonSink` supertrait.
pub trait Machine: ButtonSink {
    /// Prepare the machine to run
    fn setup(&mut self, options: &SetupOptions) -> Result<(), SetupError>;

    /// Advance one emulated display refresh
    fn run_frame(&mut self);

    /// Latest controller frame
    fn vram(&self) -> &Vram;
}

/// Frontend coordinator
///
/// Owns the machine, the render session and the input translator. All state
/// lives on the host's event loop thread.
pub struct Emulator<M: Machine> {
    machine: M,
    session: RenderSession,
    translator: InputTranslator,
    clock: TickClock,
    config: AppConfig,
}

impl<M: Machine> Emulator<M> {
    /// Run the start sequence
    ///
    /// Builds the input translator, then sets up the machine. If either step
    /// fails the error is returned and nothing is kept. A bad key map fails
    /// before the machine is touched.
    ///
    /// # Arguments
    /// * `machine` - The machine to drive
    /// * `hex_path` - Firmware image, or `None` for the embedded default
    /// * `config` - Frontend configuration
    pub fn start(mut machine: M, hex_path: Option<PathBuf>, config: AppConfig) -> Result<Self, SetupError> {
        let options = SetupOptions::new(hex_path);
        let translator = config.input.translator()?;
        machine.setup(&options)?;

        match &options.hex_path {
            Some(path) => info!("Machine started with firmware {}", path.display()),
            None => info!("Machine started with embedded firmware"),
        }

        let clock = TickClock::new(
            config.persistence.tick_duration(),
            config.persistence.max_ticks_per_frame,
        );

        Ok(Self {
            machine,
            session: RenderSession::new(),
            translator,
            clock,
            config,
        })
    }

    /// Initialize the render session for the host surface size
    ///
    /// Repeated calls are ignored.
    pub fn init_display(&mut self, width: u32, height: u32) {
        self.session.init(width, height);
    }

    /// Tear down the render session
    pub fn cleanup_display(&mut self) {
        self.session.cleanup();
    }

    /// Run one emulated frame and fold it into the luminance map
    pub fn tick(&mut self) {
        self.machine.run_frame();
        let persistence = &self.config.persistence;
        self.session
            .update_lumamap(self.machine.vram(), persistence.decay, persistence.increment);
    }

    /// Repaint the canvas from the luminance map
    pub fn render(&mut self) {
        self.session.render();
    }

    /// One emulated frame followed by a repaint
    pub fn frame(&mut self) {
        self.tick();
        self.render();
    }

    /// Run the emulated frames due at `now`, then repaint
    ///
    /// # Returns
    /// Number of emulated frames run
    pub fn advance(&mut self, now: Instant) -> u32 {
        let ticks = self.clock.advance(now);
        for _ in 0..ticks {
            self.tick();
        }
        self.render();
        ticks
    }

    /// Handle a host key notification
    ///
    /// # Returns
    /// `true` if a press was delivered to the machine
    pub fn handle_key(&mut self, key: u32, now: Instant) -> bool {
        self.translator.handle_key(key, now, &mut self.machine)
    }

    /// Handle a press notification for a button
    pub fn press_button(&mut self, button: Button, now: Instant) -> bool {
        self.translator.press(button, now, &mut self.machine)
    }

    /// Release held buttons if the release timer is due
    ///
    /// # Returns
    /// Number of releases delivered to the machine
    pub fn poll_release(&mut self, now: Instant) -> usize {
        self.translator.poll_release(now, &mut self.machine)
    }

    /// Feed gamepad state through the input translator
    pub fn update_gamepad(&mut self, gamepad: &mut GamepadHandler, now: Instant) {
        gamepad.update(&mut self.translator, now, &mut self.machine);
    }

    /// Deadline of the pending auto-release, if any
    pub fn next_release_deadline(&self) -> Option<Instant> {
        self.translator.next_deadline()
    }

    /// Save the canvas as a PNG in the configured directory
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        let canvas = self.session.canvas().ok_or(ScreenshotError::NotInitialized)?;
        save_screenshot(canvas, &self.config.screenshot.directory)
    }

    /// Save the canvas as a PNG in a given directory
    pub fn screenshot_to(&self, directory: &Path) -> Result<PathBuf, ScreenshotError> {
        let canvas = self.session.canvas().ok_or(ScreenshotError::NotInitialized)?;
        save_screenshot(canvas, directory)
    }

    /// Get a reference to the render session
    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    /// Get a reference to the input translator
    pub fn translator(&self) -> &InputTranslator {
        &self.translator
    }

    /// Get a reference to the machine
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Get a mutable reference to the machine
    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keymap::{KEY_ENTER, KEY_UP};
    use crate::input::ButtonEvent;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    /// Machine with a fixed frame that records everything it receives
    struct ScriptedMachine {
        vram: Vram,
        frames: u32,
        events: Vec<ButtonEvent>,
        fail_setup: bool,
        setup_calls: Rc<Cell<u32>>,
    }

    impl ScriptedMachine {
        fn new() -> Self {
            let mut vram = Vram::new();
            vram.set_column(0, 0, 0b0000_0001);
            Self {
                vram,
                frames: 0,
                events: Vec::new(),
                fail_setup: false,
                setup_calls: Rc::new(Cell::new(0)),
            }
        }
    }

    impl ButtonSink for ScriptedMachine {
        fn button_event(&mut self, button: Button, pressed: bool) {
            self.events.push(ButtonEvent { button, pressed });
        }
    }

    impl Machine for ScriptedMachine {
        fn setup(&mut self, _options: &SetupOptions) -> Result<(), SetupError> {
            self.setup_calls.set(self.setup_calls.get() + 1);
            if self.fail_setup {
                Err(SetupError::Machine("no core".to_string()))
            } else {
                Ok(())
            }
        }

        fn run_frame(&mut self) {
            self.frames += 1;
        }

        fn vram(&self) -> &Vram {
            &self.vram
        }
    }

    fn config(decay: u8, increment: u8) -> AppConfig {
        let mut config = AppConfig::default();
        config.persistence.decay = decay;
        config.persistence.increment = increment;
        config
    }

    #[test]
    fn test_setup_options_defaults() {
        let options = SetupOptions::default();
        assert_eq!(options.hex_path, None);
        assert_eq!(options.pixel_size, 2);
        assert_eq!(options.win_width, 256);
        assert_eq!(options.win_height, 128);
        assert_eq!(options.gdb_port, 1234);
        assert_eq!(options.key_map, None);
    }

    #[test]
    fn test_empty_hex_path_means_embedded() {
        let options = SetupOptions::new(Some(PathBuf::new()));
        assert_eq!(options.hex_path, None);

        let options = SetupOptions::new(Some(PathBuf::from("game.hex")));
        assert_eq!(options.hex_path, Some(PathBuf::from("game.hex")));
    }

    #[test]
    fn test_start_failure_returns_error() {
        let mut machine = ScriptedMachine::new();
        machine.fail_setup = true;

        let result = Emulator::start(machine, None, AppConfig::default());
        assert!(matches!(result, Err(SetupError::Machine(_))));
    }

    #[test]
    fn test_start_rejects_bad_key_map() {
        let mut config = AppConfig::default();
        let mut keys = crate::input::KeyMapConfig::handheld_default();
        keys.a = vec!["Bogus".to_string()];
        config.input.key_map = Some(keys);

        let result = Emulator::start(ScriptedMachine::new(), None, config);
        assert!(matches!(
            result,
            Err(SetupError::Config(ConfigError::UnknownKey(_)))
        ));
    }

    #[test]
    fn test_bad_key_map_fails_before_setup() {
        let mut config = AppConfig::default();
        let mut keys = crate::input::KeyMapConfig::handheld_default();
        keys.up = vec!["NotAKey".to_string()];
        config.input.key_map = Some(keys);

        let machine = ScriptedMachine::new();
        let setup_calls = Rc::clone(&machine.setup_calls);

        assert!(Emulator::start(machine, None, config).is_err());
        assert_eq!(setup_calls.get(), 0);

        let machine = ScriptedMachine::new();
        let setup_calls = Rc::clone(&machine.setup_calls);
        Emulator::start(machine, None, AppConfig::default()).unwrap();
        assert_eq!(setup_calls.get(), 1);
    }

    #[test]
    fn test_tick_updates_luma() {
        let mut emulator = Emulator::start(ScriptedMachine::new(), None, config(10, 50)).unwrap();

        emulator.tick();
        assert_eq!(emulator.session().luma().get(0, 0), 40);
        emulator.tick();
        assert_eq!(emulator.session().luma().get(0, 0), 80);
        assert_eq!(emulator.session().luma().get(1, 0), 0);
        assert_eq!(emulator.machine().frames, 2);
    }

    #[test]
    fn test_render_before_init_is_noop() {
        let mut emulator = Emulator::start(ScriptedMachine::new(), None, config(10, 50)).unwrap();
        emulator.frame();
        assert!(emulator.session().canvas().is_none());
        assert!(matches!(
            emulator.screenshot(),
            Err(ScreenshotError::NotInitialized)
        ));
    }

    #[test]
    fn test_frame_paints_canvas() {
        let mut emulator = Emulator::start(ScriptedMachine::new(), None, config(0, 255)).unwrap();
        emulator.init_display(256, 128);
        emulator.frame();

        let canvas = emulator.session().canvas().unwrap();
        assert_eq!(canvas.get_px(0, 0), crate::display::Color::WHITE);
        assert_eq!(canvas.get_px(1, 1), crate::display::Color::WHITE);
        assert_eq!(canvas.get_px(2, 0), crate::display::Color::BLACK);
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let mut emulator = Emulator::start(ScriptedMachine::new(), None, AppConfig::default()).unwrap();
        let start = Instant::now();

        assert_eq!(emulator.advance(start), 1);
        assert_eq!(emulator.advance(start + Duration::from_millis(34)), 2);
        assert_eq!(emulator.machine().frames, 3);
    }

    #[test]
    fn test_keys_reach_machine() {
        let mut emulator = Emulator::start(ScriptedMachine::new(), None, AppConfig::default()).unwrap();
        let start = Instant::now();

        assert!(emulator.handle_key(KEY_UP, start));
        assert!(!emulator.handle_key(KEY_UP, start));
        assert!(emulator.handle_key(KEY_ENTER, start));
        assert_eq!(emulator.next_release_deadline(), Some(start + Duration::from_millis(100)));
        assert_eq!(emulator.poll_release(start + Duration::from_millis(100)), 2);

        let events = &emulator.machine().events;
        assert_eq!(events.len(), 4);
        assert!(events[0].pressed && events[0].button == Button::Up);
        assert!(events[1].pressed && events[1].button == Button::A);
        assert!(!events[2].pressed && events[2].button == Button::Up);
        assert!(!events[3].pressed && events[3].button == Button::A);
    }
}
