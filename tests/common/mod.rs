// Common test utilities for pipeline integration tests
//
// Provides a scripted machine that replays a fixed sequence of controller
// frames and records the button events it receives.

#![allow(dead_code)]

use oled_glow::display::Vram;
use oled_glow::emulator::{Machine, SetupError, SetupOptions};
use oled_glow::input::{Button, ButtonEvent, ButtonSink};

/// Machine driven by a prepared list of frames
pub struct ScriptedMachine {
    frames: Vec<Vram>,
    position: usize,
    current: Vram,
    /// Button events received, in order
    pub events: Vec<ButtonEvent>,
    /// Options passed to the last setup call
    pub setup_options: Option<SetupOptions>,
    /// Make setup fail
    pub fail_setup: bool,
}

impl ScriptedMachine {
    /// Machine that shows the same frame forever
    pub fn constant(frame: Vram) -> Self {
        Self::sequence(vec![frame])
    }

    /// Machine that plays `frames` once and then holds the last one
    pub fn sequence(frames: Vec<Vram>) -> Self {
        Self {
            frames,
            position: 0,
            current: Vram::new(),
            events: Vec::new(),
            setup_options: None,
            fail_setup: false,
        }
    }

    /// Number of frames run so far
    pub fn frames_run(&self) -> usize {
        self.position
    }
}

impl ButtonSink for ScriptedMachine {
    fn button_event(&mut self, button: Button, pressed: bool) {
        self.events.push(ButtonEvent { button, pressed });
    }
}

impl Machine for ScriptedMachine {
    fn setup(&mut self, options: &SetupOptions) -> Result<(), SetupError> {
        self.setup_options = Some(options.clone());
        if self.fail_setup {
            return Err(SetupError::Machine("scripted failure".to_string()));
        }
        Ok(())
    }

    fn run_frame(&mut self) {
        if let Some(frame) = self.frames.get(self.position).or(self.frames.last()) {
            self.current = frame.clone();
        }
        self.position += 1;
    }

    fn vram(&self) -> &Vram {
        &self.current
    }
}

/// Frame with only the pixel at (x, y) lit
pub fn single_pixel(x: usize, y: usize) -> Vram {
    let mut vram = Vram::new();
    vram.set_pixel(x, y, true);
    vram
}

/// Press event helper
pub fn press(button: Button) -> ButtonEvent {
    ButtonEvent {
        button,
        pressed: true,
    }
}

/// Release event helper
pub fn release(button: Button) -> ButtonEvent {
    ButtonEvent {
        button,
        pressed: false,
    }
}
