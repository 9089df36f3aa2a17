// Input configuration module
//
// Serializable key and gamepad bindings plus the auto-release delay. Bindings
// are stored by name ("KeyZ", "DPadUp") and converted to runtime maps on load.

use super::gamepad::GamepadMapping;
use super::keyboard::{keycode_to_host, string_to_keycode};
use super::keymap::KeyMap;
use super::translator::{InputTranslator, DEFAULT_RELEASE_DELAY};
use crate::emulator::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Serializable keyboard binding, one or more key names per button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapConfig {
    /// Keys for Up on D-pad
    pub up: Vec<String>,
    /// Keys for Down on D-pad
    pub down: Vec<String>,
    /// Keys for Left on D-pad
    pub left: Vec<String>,
    /// Keys for Right on D-pad
    pub right: Vec<String>,
    /// Keys for the A button
    pub a: Vec<String>,
    /// Keys for the B button
    pub b: Vec<String>,
}

impl KeyMapConfig {
    /// Key names matching the default handheld layout
    pub fn handheld_default() -> Self {
        let names = |keys: &[&str]| keys.iter().map(|k| k.to_string()).collect();
        Self {
            up: names(&["ArrowUp"]),
            down: names(&["ArrowDown"]),
            left: names(&["ArrowLeft"]),
            right: names(&["ArrowRight"]),
            a: names(&["Enter", "KeyZ"]),
            b: names(&["Escape", "KeyX"]),
        }
    }

    /// Convert to a runtime KeyMap
    ///
    /// # Returns
    /// Result containing the KeyMap, or an error naming the first unknown key
    pub fn to_key_map(&self) -> Result<KeyMap, ConfigError> {
        Ok(KeyMap::from_codes([
            names_to_codes(&self.up)?,
            names_to_codes(&self.down)?,
            names_to_codes(&self.left)?,
            names_to_codes(&self.right)?,
            names_to_codes(&self.a)?,
            names_to_codes(&self.b)?,
        ]))
    }
}

/// Serializable gamepad binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadMappingConfig {
    /// Button for Up on D-pad
    pub up: String,
    /// Button for Down on D-pad
    pub down: String,
    /// Button for Left on D-pad
    pub left: String,
    /// Button for Right on D-pad
    pub right: String,
    /// Button for A
    pub a: String,
    /// Button for B
    pub b: String,
}

impl GamepadMappingConfig {
    /// Create default gamepad binding
    pub fn default_mapping() -> Self {
        Self {
            up: "DPadUp".to_string(),
            down: "DPadDown".to_string(),
            left: "DPadLeft".to_string(),
            right: "DPadRight".to_string(),
            a: "South".to_string(),
            b: "East".to_string(),
        }
    }

    /// Convert to a runtime GamepadMapping
    pub fn to_gamepad_mapping(&self) -> Result<GamepadMapping, ConfigError> {
        Ok(GamepadMapping {
            up: string_to_gilrs_button(&self.up)?,
            down: string_to_gilrs_button(&self.down)?,
            left: string_to_gilrs_button(&self.left)?,
            right: string_to_gilrs_button(&self.right)?,
            a: string_to_gilrs_button(&self.a)?,
            b: string_to_gilrs_button(&self.b)?,
        })
    }
}

/// Complete input configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Delay between the last press and the forced release, in milliseconds
    pub release_delay_ms: u64,
    /// Custom keyboard binding; the default layout is used when absent
    pub key_map: Option<KeyMapConfig>,
    /// Gamepad binding
    pub gamepad: GamepadMappingConfig,
}

impl InputConfig {
    /// Create a new input configuration with default bindings
    pub fn new() -> Self {
        Self {
            release_delay_ms: DEFAULT_RELEASE_DELAY.as_millis() as u64,
            key_map: None,
            gamepad: GamepadMappingConfig::default_mapping(),
        }
    }

    /// Auto-release delay
    pub fn release_delay(&self) -> Duration {
        Duration::from_millis(self.release_delay_ms)
    }

    /// Runtime key map (custom binding if present, default otherwise)
    pub fn key_map(&self) -> Result<KeyMap, ConfigError> {
        match &self.key_map {
            Some(custom) => custom.to_key_map(),
            None => Ok(KeyMap::handheld_default()),
        }
    }

    /// Build an input translator from this configuration
    pub fn translator(&self) -> Result<InputTranslator, ConfigError> {
        Ok(InputTranslator::with_key_map(self.key_map()?, self.release_delay()))
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert key names to host key codes
fn names_to_codes(names: &[String]) -> Result<Vec<u32>, ConfigError> {
    names
        .iter()
        .map(|name| {
            string_to_keycode(name)
                .and_then(keycode_to_host)
                .ok_or_else(|| ConfigError::UnknownKey(name.clone()))
        })
        .collect()
}

/// Convert string to gilrs::Button
fn string_to_gilrs_button(s: &str) -> Result<gilrs::Button, ConfigError> {
    use gilrs::Button;

    match s {
        "South" => Ok(Button::South),
        "East" => Ok(Button::East),
        "North" => Ok(Button::North),
        "West" => Ok(Button::West),
        "LeftTrigger" => Ok(Button::LeftTrigger),
        "LeftTrigger2" => Ok(Button::LeftTrigger2),
        "RightTrigger" => Ok(Button::RightTrigger),
        "RightTrigger2" => Ok(Button::RightTrigger2),
        "Select" => Ok(Button::Select),
        "Start" => Ok(Button::Start),
        "DPadUp" => Ok(Button::DPadUp),
        "DPadDown" => Ok(Button::DPadDown),
        "DPadLeft" => Ok(Button::DPadLeft),
        "DPadRight" => Ok(Button::DPadRight),
        _ => Err(ConfigError::UnknownGamepadButton(s.to_string())),
    }
}
