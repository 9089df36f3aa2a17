// OLED Glow Library
// SSD1306 display persistence, scaled rendering and handheld input translation

// Public modules
pub mod display;
pub mod emulator;
pub mod input;

// Re-export main types for convenience
pub use display::{DisplayGeometry, LumaBuffer, RenderSession, Vram, WindowConfig};
pub use emulator::{AppConfig, DemoMachine, Emulator, Machine, SetupError, SetupOptions};
pub use input::{Button, ButtonSink, InputTranslator, KeyMap};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // Test that all components can be instantiated
        let _vram = Vram::new();
        let _luma = LumaBuffer::new();
        let _session = RenderSession::new();
        let _translator = InputTranslator::new();
        let _key_map = KeyMap::handheld_default();
        let _geometry = DisplayGeometry::resolve(384, 168);
        let _config = AppConfig::default();
    }

    #[test]
    fn test_demo_machine_starts() {
        let emulator = Emulator::start(DemoMachine::new(), None, AppConfig::default());
        assert!(emulator.is_ok());
    }
}
