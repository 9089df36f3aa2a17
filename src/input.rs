// Input module - Button model and host input translation
//
// Host key codes (and gamepad buttons) are mapped onto the six handheld
// buttons and turned into debounced press events with timed auto-release.

pub mod config;
pub mod gamepad;
pub mod keyboard;
pub mod keymap;
pub mod timer;
pub mod translator;

pub use config::{GamepadMappingConfig, InputConfig, KeyMapConfig};
pub use gamepad::{GamepadHandler, GamepadMapping, GamepadState};
pub use keyboard::{keycode_to_host, physical_key_to_host};
pub use keymap::KeyMap;
pub use timer::ReleaseTimer;
pub use translator::InputTranslator;

/// Number of handheld buttons
pub const BUTTON_COUNT: usize = 6;

/// Handheld button, in the emulated machine's enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Up on D-pad
    Up = 0,
    /// Down on D-pad
    Down = 1,
    /// Left on D-pad
    Left = 2,
    /// Right on D-pad
    Right = 3,
    /// A button
    A = 4,
    /// B button
    B = 5,
}

impl Button {
    /// All buttons in index order
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
    ];

    /// Index into per-button state arrays
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Button for an index, if in range
    pub fn from_index(index: usize) -> Option<Button> {
        Self::ALL.get(index).copied()
    }
}

/// A leveled button transition delivered to the emulated machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Which button changed
    pub button: Button,
    /// `true` for press, `false` for release
    pub pressed: bool,
}

/// Consumer of button transitions
pub trait ButtonSink {
    /// Deliver a press (`true`) or release (`false`) for a button
    fn button_event(&mut self, button: Button, pressed: bool);
}

impl ButtonSink for Vec<ButtonEvent> {
    fn button_event(&mut self, button: Button, pressed: bool) {
        self.push(ButtonEvent { button, pressed });
    }
}
