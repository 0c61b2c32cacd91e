//! Chart image export
//!
//! The shell asks the viewport for a screenshot, crops it to the chart's
//! rectangle and writes it as a PNG. Everything here is independent of the
//! running UI so it can be tested with synthetic images.

use crate::error::{DataChartsError, Result, ResultExt};
use egui::{ColorImage, Rect};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// File name offered by the save dialog
pub const DEFAULT_EXPORT_FILE_NAME: &str = "chart-image.png";

/// Cut `rect` (in points) out of a full-viewport screenshot
pub fn crop_to_rect(screenshot: &ColorImage, rect: Rect, pixels_per_point: f32) -> ColorImage {
    screenshot.region(&rect, Some(pixels_per_point))
}

/// Convert an egui image into an `image` buffer
pub fn to_rgba_image(color_image: &ColorImage) -> Result<RgbaImage> {
    let [width, height] = color_image.size;
    let bytes: Vec<u8> = color_image
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();

    RgbaImage::from_raw(width as u32, height as u32, bytes).ok_or_else(|| {
        DataChartsError::Export(format!(
            "pixel buffer does not match {}x{} image",
            width, height
        ))
    })
}

/// Write `color_image` to `path` as PNG
pub fn save_png(color_image: &ColorImage, path: &Path) -> Result<()> {
    if color_image.width() == 0 || color_image.height() == 0 {
        return Err(DataChartsError::Export("chart area is empty".to_string()));
    }

    let image = to_rgba_image(color_image)?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(DataChartsError::from)
        .with_context(|| format!("Failed to save chart image to {:?}", path))?;

    tracing::info!(
        "Exported {}x{} chart image to {:?}",
        image.width(),
        image.height(),
        path
    );
    Ok(())
}

/// Ask the user where to save the image
pub fn pick_export_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(DEFAULT_EXPORT_FILE_NAME)
        .add_filter("PNG image", &["png"])
        .save_file()
}
