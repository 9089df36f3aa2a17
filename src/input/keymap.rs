// Key map - Host key code to handheld button lookup
//
// Host key codes follow the LVGL numbering: control keys use small codes
// (arrows 17-20, Enter 10, Esc 27) and printable keys use their ASCII value.

use super::{Button, BUTTON_COUNT};

/// Host key code for Up
pub const KEY_UP: u32 = 17;
/// Host key code for Down
pub const KEY_DOWN: u32 = 18;
/// Host key code for Right
pub const KEY_RIGHT: u32 = 19;
/// Host key code for Left
pub const KEY_LEFT: u32 = 20;
/// Host key code for Enter
pub const KEY_ENTER: u32 = 10;
/// Host key code for Escape
pub const KEY_ESC: u32 = 27;
/// Host key code for 'z'
pub const KEY_Z: u32 = b'z' as u32;
/// Host key code for 'x'
pub const KEY_X: u32 = b'x' as u32;

/// Lookup table from host key codes to buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    /// Accepted key codes per button, indexed by `Button::index`
    codes: [Vec<u32>; BUTTON_COUNT],
}

impl KeyMap {
    /// Default handheld layout
    ///
    /// # Default Mappings
    /// - Arrow keys: D-pad
    /// - Enter or Z: A button
    /// - Esc or X: B button
    pub fn handheld_default() -> Self {
        Self {
            codes: [
                vec![KEY_UP],
                vec![KEY_DOWN],
                vec![KEY_LEFT],
                vec![KEY_RIGHT],
                vec![KEY_ENTER, KEY_Z],
                vec![KEY_ESC, KEY_X],
            ],
        }
    }

    /// Build a custom map
    ///
    /// # Arguments
    /// * `codes` - Key codes per button, in `Button::ALL` order
    pub fn from_codes(codes: [Vec<u32>; BUTTON_COUNT]) -> Self {
        Self { codes }
    }

    /// Get the button for a host key code
    ///
    /// # Returns
    /// Some(Button) if the code is mapped, None otherwise
    pub fn button_for(&self, key: u32) -> Option<Button> {
        self.codes
            .iter()
            .position(|codes| codes.contains(&key))
            .and_then(Button::from_index)
    }

    /// Key codes bound to a button
    pub fn codes_for(&self, button: Button) -> &[u32] {
        &self.codes[button.index()]
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::handheld_default()
    }
}
