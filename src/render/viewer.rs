use crate::error::Result;
use crate::utils::sanitize_filename;
use ab_glyph::{Font, PxScale};
use image::{Rgb, RgbImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::PathBuf;

const TITLE_SIZE: f32 = 24.0;
const PADDING: u32 = 20;

/// Title shown above the cloud
pub fn figure_title(keyword: &str) -> String {
    format!("{} 词云图", keyword)
}

/// Frames the cloud under a centered title on a white figure, without axes
pub fn compose_figure<F: Font>(cloud: &RgbImage, keyword: &str, font: &F) -> RgbImage {
    let title = figure_title(keyword);
    let scale = PxScale::from(TITLE_SIZE);
    let (title_w, _) = text_size(scale, font, &title);
    let banner = TITLE_SIZE as u32 + 2 * PADDING;

    let width = cloud.width().max(title_w) + 2 * PADDING;
    let height = cloud.height() + banner + PADDING;
    let mut figure = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    let title_x = (width.saturating_sub(title_w) / 2) as i32;
    draw_text_mut(
        &mut figure,
        Rgb([0, 0, 0]),
        title_x,
        PADDING as i32,
        scale,
        font,
        &title,
    );

    let cloud_x = (width - cloud.width()) / 2;
    imageops::overlay(&mut figure, cloud, cloud_x as i64, banner as i64);
    figure
}

/// Writes the titled figure to the temp directory and opens it in the system image viewer
///
/// Failing to launch a viewer is logged and otherwise ignored.
pub fn show<F: Font>(cloud: &RgbImage, keyword: &str, font: &F) -> Result<PathBuf> {
    let figure = compose_figure(cloud, keyword, font);
    let path = std::env::temp_dir().join(format!(
        "{}.png",
        sanitize_filename(&figure_title(keyword))
    ));
    figure.save(&path)?;

    match open::that(&path) {
        Ok(()) => ::log::info!("Opened {} in image viewer", path.display()),
        Err(e) => ::log::warn!("Could not open image viewer for {}: {}", path.display(), e),
    }
    Ok(path)
}
