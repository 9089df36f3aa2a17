// Keyboard translation module
//
// Converts winit physical keys into host key codes (LVGL numbering), so the
// window feeds the translator the same codes an embedded host would.

use super::keymap::{KEY_DOWN, KEY_ENTER, KEY_ESC, KEY_LEFT, KEY_RIGHT, KEY_UP};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Host key code for Backspace
pub const KEY_BACKSPACE: u32 = 8;
/// Host key code for Tab (LVGL "next")
pub const KEY_NEXT: u32 = 9;
/// Host key code for Delete
pub const KEY_DEL: u32 = 127;
/// Host key code for Home
pub const KEY_HOME: u32 = 2;
/// Host key code for End
pub const KEY_END: u32 = 3;

/// Letter keys and their lowercase ASCII codes
const LETTER_KEYS: [(KeyCode, u8); 26] = [
    (KeyCode::KeyA, b'a'),
    (KeyCode::KeyB, b'b'),
    (KeyCode::KeyC, b'c'),
    (KeyCode::KeyD, b'd'),
    (KeyCode::KeyE, b'e'),
    (KeyCode::KeyF, b'f'),
    (KeyCode::KeyG, b'g'),
    (KeyCode::KeyH, b'h'),
    (KeyCode::KeyI, b'i'),
    (KeyCode::KeyJ, b'j'),
    (KeyCode::KeyK, b'k'),
    (KeyCode::KeyL, b'l'),
    (KeyCode::KeyM, b'm'),
    (KeyCode::KeyN, b'n'),
    (KeyCode::KeyO, b'o'),
    (KeyCode::KeyP, b'p'),
    (KeyCode::KeyQ, b'q'),
    (KeyCode::KeyR, b'r'),
    (KeyCode::KeyS, b's'),
    (KeyCode::KeyT, b't'),
    (KeyCode::KeyU, b'u'),
    (KeyCode::KeyV, b'v'),
    (KeyCode::KeyW, b'w'),
    (KeyCode::KeyX, b'x'),
    (KeyCode::KeyY, b'y'),
    (KeyCode::KeyZ, b'z'),
];

/// Digit keys and their ASCII codes
const DIGIT_KEYS: [(KeyCode, u8); 10] = [
    (KeyCode::Digit0, b'0'),
    (KeyCode::Digit1, b'1'),
    (KeyCode::Digit2, b'2'),
    (KeyCode::Digit3, b'3'),
    (KeyCode::Digit4, b'4'),
    (KeyCode::Digit5, b'5'),
    (KeyCode::Digit6, b'6'),
    (KeyCode::Digit7, b'7'),
    (KeyCode::Digit8, b'8'),
    (KeyCode::Digit9, b'9'),
];

/// Convert a winit key code to a host key code
///
/// # Returns
/// Some(code) for keys the host numbering covers, None otherwise
pub fn keycode_to_host(key: KeyCode) -> Option<u32> {
    let code = match key {
        KeyCode::ArrowUp => KEY_UP,
        KeyCode::ArrowDown => KEY_DOWN,
        KeyCode::ArrowLeft => KEY_LEFT,
        KeyCode::ArrowRight => KEY_RIGHT,
        KeyCode::Enter | KeyCode::NumpadEnter => KEY_ENTER,
        KeyCode::Escape => KEY_ESC,
        KeyCode::Backspace => KEY_BACKSPACE,
        KeyCode::Tab => KEY_NEXT,
        KeyCode::Delete => KEY_DEL,
        KeyCode::Home => KEY_HOME,
        KeyCode::End => KEY_END,
        KeyCode::Space => u32::from(b' '),
        _ => {
            return LETTER_KEYS
                .iter()
                .chain(DIGIT_KEYS.iter())
                .find(|(candidate, _)| *candidate == key)
                .map(|&(_, ascii)| u32::from(ascii));
        }
    };
    Some(code)
}

/// Convert a winit physical key to a host key code
pub fn physical_key_to_host(physical_key: PhysicalKey) -> Option<u32> {
    match physical_key {
        PhysicalKey::Code(key_code) => keycode_to_host(key_code),
        PhysicalKey::Unidentified(_) => None,
    }
}

/// Parse a winit key name (e.g. "KeyZ", "ArrowUp")
pub fn string_to_keycode(s: &str) -> Option<KeyCode> {
    let key = match s {
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Enter" => KeyCode::Enter,
        "NumpadEnter" => KeyCode::NumpadEnter,
        "Escape" => KeyCode::Escape,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "Delete" => KeyCode::Delete,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "Space" => KeyCode::Space,
        _ => {
            return LETTER_KEYS
                .iter()
                .chain(DIGIT_KEYS.iter())
                .map(|&(candidate, _)| candidate)
                .find(|candidate| keycode_to_string(*candidate) == s);
        }
    };
    Some(key)
}

/// Convert a KeyCode to its name
pub fn keycode_to_string(key: KeyCode) -> String {
    format!("{:?}", key)
}
