// Demo machine - Built-in stand-in for the embedded default firmware
//
// Draws a frame border, a ball steered with the D-pad and a patch that blinks
// every frame. The blinking patch shows the persistence model at work: on the
// panel it stays a dim gray instead of flashing between black and white.

use super::{Machine, SetupError, SetupOptions};
use crate::display::{Vram, OLED_HEIGHT, OLED_WIDTH};
use crate::input::{Button, ButtonSink, BUTTON_COUNT};
use log::{debug, info};

const BALL_SIZE: usize = 4;
const BLINK_X: usize = OLED_WIDTH - 12;
const BLINK_Y: usize = 4;
const BLINK_SIZE: usize = 8;

/// Self-contained demo machine
#[derive(Debug, Clone)]
pub struct DemoMachine {
    vram: Vram,
    held: [bool; BUTTON_COUNT],
    ball_x: usize,
    ball_y: usize,
    frame_count: u64,
    press_count: u64,
}

impl DemoMachine {
    /// Create a demo machine with the ball centered
    pub fn new() -> Self {
        Self {
            vram: Vram::new(),
            held: [false; BUTTON_COUNT],
            ball_x: (OLED_WIDTH - BALL_SIZE) / 2,
            ball_y: (OLED_HEIGHT - BALL_SIZE) / 2,
            frame_count: 0,
            press_count: 0,
        }
    }

    /// Ball position (top-left pixel)
    pub fn ball_position(&self) -> (usize, usize) {
        (self.ball_x, self.ball_y)
    }

    /// Frames run since setup
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Press events received
    pub fn press_count(&self) -> u64 {
        self.press_count
    }

    /// Whether the machine considers a button held
    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    fn step_ball(&mut self) {
        let (min, max_x, max_y) = (1, OLED_WIDTH - 1 - BALL_SIZE, OLED_HEIGHT - 1 - BALL_SIZE);

        if self.is_held(Button::Left) && self.ball_x > min {
            self.ball_x -= 1;
        }
        if self.is_held(Button::Right) && self.ball_x < max_x {
            self.ball_x += 1;
        }
        if self.is_held(Button::Up) && self.ball_y > min {
            self.ball_y -= 1;
        }
        if self.is_held(Button::Down) && self.ball_y < max_y {
            self.ball_y += 1;
        }
        if self.is_held(Button::B) {
            self.ball_x = (OLED_WIDTH - BALL_SIZE) / 2;
            self.ball_y = (OLED_HEIGHT - BALL_SIZE) / 2;
        }
    }

    fn draw(&mut self) {
        self.vram.fill(0);

        for x in 0..OLED_WIDTH {
            self.vram.set_pixel(x, 0, true);
            self.vram.set_pixel(x, OLED_HEIGHT - 1, true);
        }
        for y in 0..OLED_HEIGHT {
            self.vram.set_pixel(0, y, true);
            self.vram.set_pixel(OLED_WIDTH - 1, y, true);
        }

        // A inverts the ball into an outline
        let hollow = self.is_held(Button::A);
        for dy in 0..BALL_SIZE {
            for dx in 0..BALL_SIZE {
                let edge = dx == 0 || dy == 0 || dx == BALL_SIZE - 1 || dy == BALL_SIZE - 1;
                if !hollow || edge {
                    self.vram.set_pixel(self.ball_x + dx, self.ball_y + dy, true);
                }
            }
        }

        if self.frame_count % 2 == 0 {
            for dy in 0..BLINK_SIZE {
                for dx in 0..BLINK_SIZE {
                    self.vram.set_pixel(BLINK_X + dx, BLINK_Y + dy, true);
                }
            }
        }
    }
}

impl Default for DemoMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonSink for DemoMachine {
    fn button_event(&mut self, button: Button, pressed: bool) {
        debug!("Demo machine: {:?} {}", button, if pressed { "down" } else { "up" });
        self.held[button.index()] = pressed;
        if pressed {
            self.press_count += 1;
        }
    }
}

impl Machine for DemoMachine {
    fn setup(&mut self, options: &SetupOptions) -> Result<(), SetupError> {
        if let Some(path) = &options.hex_path {
            std::fs::metadata(path).map_err(|source| SetupError::Firmware {
                path: path.clone(),
                source,
            })?;
            return Err(SetupError::UnsupportedFirmware(path.clone()));
        }

        *self = Self::new();
        self.draw();
        info!("Demo machine ready");
        Ok(())
    }

    fn run_frame(&mut self) {
        self.step_ball();
        self.draw();
        self.frame_count += 1;
    }

    fn vram(&self) -> &Vram {
        &self.vram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ready() -> DemoMachine {
        let mut machine = DemoMachine::new();
        machine.setup(&SetupOptions::default()).unwrap();
        machine
    }

    #[test]
    fn test_setup_rejects_firmware_path() {
        let path = std::env::temp_dir().join(format!("oled_glow_demo_{}.hex", std::process::id()));
        std::fs::write(&path, ":00000001FF\n").unwrap();

        let mut machine = DemoMachine::new();
        let options = SetupOptions::new(Some(path.clone()));
        let result = machine.setup(&options);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(SetupError::UnsupportedFirmware(_))));
    }

    #[test]
    fn test_setup_reports_missing_firmware() {
        let mut machine = DemoMachine::new();
        let options = SetupOptions::new(Some(PathBuf::from("/nonexistent/oled_glow/game.hex")));
        match machine.setup(&options) {
            Err(SetupError::Firmware { path, source }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/oled_glow/game.hex"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected firmware read error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_border_is_drawn() {
        let machine = ready();
        let vram = machine.vram();
        assert!(vram.pixel(0, 0));
        assert!(vram.pixel(OLED_WIDTH - 1, OLED_HEIGHT - 1));
        assert!(vram.pixel(64, 0));
        assert!(!vram.pixel(10, 10));
    }

    #[test]
    fn test_dpad_moves_ball() {
        let mut machine = ready();
        let (x, y) = machine.ball_position();

        machine.button_event(Button::Right, true);
        machine.run_frame();
        machine.run_frame();
        machine.button_event(Button::Right, false);
        machine.run_frame();

        assert_eq!(machine.ball_position(), (x + 2, y));
        assert!(machine.vram().pixel(x + 2, y));
        assert_eq!(machine.press_count(), 1);
    }

    #[test]
    fn test_ball_stays_inside_border() {
        let mut machine = ready();
        machine.button_event(Button::Up, true);
        machine.button_event(Button::Left, true);
        for _ in 0..200 {
            machine.run_frame();
        }
        assert_eq!(machine.ball_position(), (1, 1));
    }

    #[test]
    fn test_blink_patch_alternates() {
        let mut machine = ready();
        machine.run_frame();
        let first = machine.vram().pixel(BLINK_X, BLINK_Y);
        machine.run_frame();
        let second = machine.vram().pixel(BLINK_X, BLINK_Y);
        assert_ne!(first, second);
    }
}
