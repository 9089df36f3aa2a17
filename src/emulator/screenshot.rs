// Screenshot functionality
//
// Captures the current canvas and saves it as a PNG file.

use crate::display::Canvas;
use crate::display::Surface;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during screenshot operations
#[derive(Debug, Error)]
pub enum ScreenshotError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Nothing has been rendered yet
    #[error("display is not initialized")]
    NotInitialized,
}

/// Save a screenshot of the canvas
///
/// # Arguments
///
/// * `canvas` - Canvas holding the scaled OLED image
/// * `directory` - Directory the PNG is written to (created if missing)
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
pub fn save_screenshot(canvas: &Canvas, directory: &Path) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(directory)?;

    // Generate filename with timestamp
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
    let file_path = directory.join(format!("screenshot_{}.png", timestamp));

    let rgb_data = canvas_to_rgb(canvas);
    save_png(&file_path, &rgb_data, canvas.width(), canvas.height())?;

    Ok(file_path)
}

/// Convert canvas pixels to packed RGB888
fn canvas_to_rgb(canvas: &Canvas) -> Vec<u8> {
    canvas
        .pixels()
        .iter()
        .flat_map(|color| [color.r, color.g, color.b])
        .collect()
}

/// Save RGB data as a PNG file
///
/// # Arguments
///
/// * `path` - Path to save the PNG file
/// * `data` - RGB data (width × height × 3 bytes)
/// * `width` - Image width
/// * `height` - Image height
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{Color, DisplayGeometry};

    #[test]
    fn test_canvas_to_rgb() {
        let geometry = DisplayGeometry::resolve(128, 64);
        let mut canvas = Canvas::new(&geometry);
        canvas.set_px(1, 0, Color::gray(0x40));

        let rgb = canvas_to_rgb(&canvas);
        assert_eq!(rgb.len(), 128 * 64 * 3);
        assert_eq!(&rgb[0..3], &[0, 0, 0]);
        assert_eq!(&rgb[3..6], &[0x40, 0x40, 0x40]);
    }

    #[test]
    fn test_save_screenshot_writes_png() {
        let directory = std::env::temp_dir().join(format!("oled_glow_shots_{}", std::process::id()));
        let geometry = DisplayGeometry::resolve(256, 128);
        let canvas = Canvas::new(&geometry);

        let path = save_screenshot(&canvas, &directory).unwrap();
        assert!(path.starts_with(&directory));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        let _ = fs::remove_dir_all(&directory);
    }
}
