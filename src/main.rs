// OLED Glow - Main Entry Point
//
// Runs the built-in demo machine in a window with OLED persistence.

use clap::Parser;
use oled_glow::display::{run_window, WindowConfig};
use oled_glow::emulator::{AppConfig, DemoMachine, Emulator, CONFIG_FILE};
use std::path::PathBuf;

/// SSD1306 OLED frontend with afterglow simulation
#[derive(Parser, Debug)]
#[command(name = "oled-glow", version, about)]
struct Args {
    /// Firmware image (.hex); the embedded demo runs when omitted
    firmware: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Window width override
    #[arg(long)]
    width: Option<u32>,

    /// Window height override
    #[arg(long)]
    height: Option<u32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    println!("OLED Glow (oled-glow) v{}", env!("CARGO_PKG_VERSION"));
    println!("==============================");
    println!();

    let mut config = AppConfig::load_or_default(&args.config);
    if let Some(width) = args.width {
        config.video.window_width = width;
    }
    if let Some(height) = args.height {
        config.video.window_height = height;
    }

    let window_config = WindowConfig::from(&config.video);
    println!("Configuration: {}", args.config.display());
    println!(
        "  Window size: {}x{}",
        window_config.width, window_config.height
    );
    println!(
        "  Persistence: decay {}, increment {}",
        config.persistence.decay, config.persistence.increment
    );
    println!("  Auto-release: {} ms", config.input.release_delay_ms);
    println!();
    println!("Arrows: D-pad, Enter/Z: A, Esc/X: B, F12: screenshot");
    println!();

    let emulator = Emulator::start(DemoMachine::new(), args.firmware, config)?;
    run_window(window_config, emulator)?;

    println!("Window closed.");
    Ok(())
}
