use crate::error::{Error, Result};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Drawable region of the canvas derived from a shape image
///
/// Pure white and fully transparent pixels are outside the shape.
#[derive(Debug, Clone)]
pub struct Mask {
    width: u32,
    height: u32,
    drawable: Vec<bool>,
}

impl Mask {
    /// Decodes `path` and scales it to the canvas size
    pub fn load(path: &Path, width: u32, height: u32) -> Result<Self> {
        let mask_error = |reason: String| Error::Mask {
            path: path.display().to_string(),
            reason,
        };

        let image = image::open(path).map_err(|e| mask_error(e.to_string()))?;
        let mask = Self::from_image(&image, width, height);
        if mask.drawable_count() == 0 {
            return Err(mask_error("no drawable pixels".to_string()));
        }

        ::log::debug!(
            "Loaded mask {} ({} of {} pixels drawable)",
            path.display(),
            mask.drawable_count(),
            width as usize * height as usize
        );
        Ok(mask)
    }

    /// Builds a mask from an already decoded image, scaled with nearest-neighbour sampling
    pub fn from_image(image: &DynamicImage, width: u32, height: u32) -> Self {
        let rgba: RgbaImage = image.to_rgba8();
        let (src_w, src_h) = rgba.dimensions();

        let mut drawable = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let inside = if src_w == 0 || src_h == 0 {
                    false
                } else {
                    let sx = (x as u64 * src_w as u64 / width as u64) as u32;
                    let sy = (y as u64 * src_h as u64 / height as u64) as u32;
                    let [r, g, b, a] = rgba.get_pixel(sx, sy).0;
                    a != 0 && !(r == 255 && g == 255 && b == 255)
                };
                drawable.push(inside);
            }
        }

        Self {
            width,
            height,
            drawable,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a word may cover the pixel; out-of-bounds is never drawable
    pub fn is_drawable(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.drawable[self.index(x, y)]
    }

    pub fn drawable_count(&self) -> usize {
        self.drawable.iter().filter(|d| **d).count()
    }

    /// Pixels within `width` of the boundary between drawable and blocked regions
    pub fn contour(&self, width: u32) -> Vec<(u32, u32)> {
        if width == 0 {
            return Vec::new();
        }
        let r = width as i64;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx != 0 || dy != 0) && dx * dx + dy * dy <= r * r {
                    offsets.push((dx, dy));
                }
            }
        }

        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let inside = self.drawable[self.index(x, y)];
                let on_edge = offsets.iter().any(|(dx, dy)| {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
                        return false;
                    }
                    self.drawable[self.index(nx as u32, ny as u32)] != inside
                });
                if on_edge {
                    points.push((x, y));
                }
            }
        }
        points
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
