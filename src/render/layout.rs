//! Word placement on an occupancy grid
//!
//! Words are placed heaviest first. Each word is rasterised into a coverage
//! patch, a free spot large enough for the patch plus margin is drawn at random
//! from a summed-area table of the occupied pixels, and the patch's inked pixels
//! are then marked occupied. A word that does not fit is tried in the other
//! orientation once and then shrunk step by step; once the font would drop
//! below the minimum size, layout stops.

use crate::config::CloudConfig;
use crate::render::color;
use crate::render::mask::Mask;
use ab_glyph::{Font, PxScale, ScaleFont};
use image::{GrayImage, Luma, Rgb, imageops};
use imageproc::drawing::{draw_text_mut, text_size};
use rand::Rng;

/// Occupied pixels of the canvas with a summed-area table for rectangle queries
#[derive(Debug, Clone)]
pub struct Occupancy {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    integral: Vec<u32>,
}

impl Occupancy {
    /// An empty canvas
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        let mut occupancy = Self {
            width: w,
            height: h,
            cells: vec![0; w * h],
            integral: vec![0; (w + 1) * (h + 1)],
        };
        occupancy.rebuild_from(0);
        occupancy
    }

    /// A canvas where everything outside the mask is already taken
    pub fn from_mask(mask: &Mask) -> Self {
        let mut occupancy = Self::new(mask.width(), mask.height());
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if !mask.is_drawable(x, y) {
                    let i = occupancy.index(x as usize, y as usize);
                    occupancy.cells[i] = 1;
                }
            }
        }
        occupancy.rebuild_from(0);
        occupancy
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        let (x, y) = (x as usize, y as usize);
        x >= self.width || y >= self.height || self.cells[self.index(x, y)] != 0
    }

    /// Number of occupied pixels in the `w`×`h` rectangle at (`x`, `y`)
    pub fn rect_sum(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        let (x, y, w, h) = (x as usize, y as usize, w as usize, h as usize);
        let stride = self.width + 1;
        let at = |cx: usize, cy: usize| self.integral[cy * stride + cx];
        at(x + w, y + h) + at(x, y) - at(x + w, y) - at(x, y + h)
    }

    /// Random top-left corner of a free `w`×`h` rectangle, if any exists
    pub fn find_position<R: Rng>(&self, w: u32, h: u32, rng: &mut R) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w > self.width() || h > self.height() {
            return None;
        }
        let max_x = self.width() - w;
        let max_y = self.height() - h;

        let mut hits: u64 = 0;
        for x in 0..=max_x {
            for y in 0..=max_y {
                if self.rect_sum(x, y, w, h) == 0 {
                    hits += 1;
                }
            }
        }
        if hits == 0 {
            return None;
        }

        let mut target = rng.gen_range(0..hits);
        for x in 0..=max_x {
            for y in 0..=max_y {
                if self.rect_sum(x, y, w, h) == 0 {
                    if target == 0 {
                        return Some((x, y));
                    }
                    target -= 1;
                }
            }
        }
        None
    }

    /// Marks the inked pixels of `patch` placed at (`x`, `y`) as occupied
    pub fn occupy(&mut self, x: u32, y: u32, patch: &GrayImage) {
        for (px, py, pixel) in patch.enumerate_pixels() {
            if pixel.0[0] == 0 {
                continue;
            }
            let (cx, cy) = ((x + px) as usize, (y + py) as usize);
            if cx < self.width && cy < self.height {
                let i = self.index(cx, cy);
                self.cells[i] = 1;
            }
        }
        self.rebuild_from(y as usize);
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Recomputes the summed-area table for rows `row..`
    fn rebuild_from(&mut self, row: usize) {
        let stride = self.width + 1;
        for y in row.min(self.height)..self.height {
            let mut running = 0u32;
            for x in 0..self.width {
                running += self.cells[y * self.width + x] as u32;
                self.integral[(y + 1) * stride + x + 1] = self.integral[y * stride + x + 1] + running;
            }
        }
    }
}

/// Tunables for [`layout`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub margin: u32,
    pub min_font_size: u32,
    pub max_font_size: Option<u32>,
    pub font_step: u32,
    pub prefer_horizontal: f64,
    pub relative_scaling: f64,
}

impl LayoutParams {
    pub fn from_config(config: &CloudConfig) -> Self {
        Self {
            margin: config.margin,
            min_font_size: config.min_font_size.max(1),
            max_font_size: config.max_font_size,
            font_step: config.font_step.max(1),
            prefer_horizontal: config.prefer_horizontal,
            relative_scaling: config.relative_scaling.clamp(0.0, 1.0),
        }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::from_config(&CloudConfig::default())
    }
}

/// A word fixed on the canvas
#[derive(Debug, Clone)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: u32,
    pub vertical: bool,
    /// Top-left corner of `coverage` on the canvas
    pub x: u32,
    pub y: u32,
    pub color: Rgb<u8>,
    /// Glyph coverage, 0 = empty, 255 = fully inked
    pub coverage: GrayImage,
}

/// Places `words` (sorted by descending weight) on `occupancy`
///
/// Returns the words that fit, in placement order. Words after the first one
/// that cannot fit even at the minimum font size are omitted.
pub fn layout<F: Font, R: Rng>(
    words: &[(&str, f64)],
    font: &F,
    params: &LayoutParams,
    occupancy: &mut Occupancy,
    rng: &mut R,
) -> Vec<PlacedWord> {
    let mut placed = Vec::new();
    let Some(&(_, max_weight)) = words.first() else {
        return placed;
    };

    let mut font_size = params.max_font_size.unwrap_or(occupancy.height()).max(1);
    let mut last_freq = 1.0;
    let rs = params.relative_scaling;

    for (i, &(word, weight)) in words.iter().enumerate() {
        let freq = if max_weight > 0.0 { weight / max_weight } else { 1.0 };
        if freq <= 0.0 {
            continue;
        }

        if rs != 0.0 && i != 0 {
            let scaled = (rs * (freq / last_freq) + (1.0 - rs)) * font_size as f64;
            font_size = scaled.round().max(0.0) as u32;
        }

        let mut vertical = rng.gen_range(0.0..1.0) >= params.prefer_horizontal;
        let mut tried_other_orientation = false;
        let mut spot = None;

        while font_size >= params.min_font_size {
            let Some(patch) = rasterize(font, word, font_size, vertical) else {
                break;
            };
            let (w, h) = (patch.width() + params.margin, patch.height() + params.margin);

            if let Some((x, y)) = occupancy.find_position(w, h, rng) {
                spot = Some((x + params.margin / 2, y + params.margin / 2, patch));
                break;
            }

            if !tried_other_orientation && params.prefer_horizontal < 1.0 {
                vertical = !vertical;
                tried_other_orientation = true;
                continue;
            }

            let mut next = font_size.saturating_sub(params.font_step);
            // Jump straight down when the patch is larger than the canvas itself
            if w > occupancy.width() || h > occupancy.height() {
                let ratio = (occupancy.width() as f64 / w as f64)
                    .min(occupancy.height() as f64 / h as f64);
                next = next.min((font_size as f64 * ratio).floor() as u32);
            }
            font_size = next;
            vertical = false;
        }

        if font_size < params.min_font_size {
            ::log::debug!(
                "Stopping layout at '{}': no room above font size {}",
                word,
                params.min_font_size
            );
            break;
        }

        let Some((x, y, coverage)) = spot else {
            ::log::debug!("Skipping '{}': nothing to draw", word);
            continue;
        };

        occupancy.occupy(x, y, &coverage);
        ::log::debug!(
            "Placed '{}' at ({}, {}) size {}{}",
            word,
            x,
            y,
            font_size,
            if vertical { " vertical" } else { "" }
        );
        placed.push(PlacedWord {
            text: word.to_string(),
            font_size,
            vertical,
            x,
            y,
            color: color::random_color(rng),
            coverage,
        });
        last_freq = freq;
    }

    placed
}

/// Renders `text` into a tightly cropped coverage patch
///
/// Vertical words are rotated to read bottom to top. Returns `None` when no
/// glyph leaves any ink.
pub fn rasterize<F: Font>(font: &F, text: &str, font_size: u32, vertical: bool) -> Option<GrayImage> {
    let scale = PxScale::from(font_size as f32);
    let scaled = font.as_scaled(scale);
    let (text_w, _) = text_size(scale, font, text);
    let line_h = (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32;
    let pad = font_size / 4 + 1;

    let mut canvas = GrayImage::new(text_w + 2 * pad, line_h + 2 * pad);
    draw_text_mut(
        &mut canvas,
        Luma([255u8]),
        pad as i32,
        pad as i32,
        scale,
        font,
        text,
    );

    let patch = crop_to_ink(&canvas)?;
    Some(if vertical {
        imageops::rotate270(&patch)
    } else {
        patch
    })
}

/// Smallest sub-image containing every non-zero pixel
fn crop_to_ink(image: &GrayImage) -> Option<GrayImage> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let (x0, y0, x1, y1) = bounds?;
    Some(imageops::crop_imm(image, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rect_sum() {
        let mut occ = Occupancy::new(6, 4);
        let mut patch = GrayImage::new(2, 2);
        patch.put_pixel(0, 0, Luma([255]));
        patch.put_pixel(1, 1, Luma([10]));
        occ.occupy(2, 1, &patch);

        assert!(occ.is_occupied(2, 1));
        assert!(occ.is_occupied(3, 2));
        assert!(!occ.is_occupied(3, 1));
        assert_eq!(occ.rect_sum(0, 0, 6, 4), 2);
        assert_eq!(occ.rect_sum(2, 1, 1, 1), 1);
        assert_eq!(occ.rect_sum(0, 0, 2, 4), 0);
        assert_eq!(occ.rect_sum(3, 1, 3, 3), 1);
    }

    #[test]
    fn test_find_position_only_returns_free_rectangles() {
        let mut occ = Occupancy::new(10, 10);
        occ.occupy(0, 0, &GrayImage::from_pixel(10, 6, Luma([255])));

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let (x, y) = occ.find_position(3, 3, &mut rng).unwrap();
            assert!(y >= 6);
            assert!(x <= 7 && y <= 7);
            assert_eq!(occ.rect_sum(x, y, 3, 3), 0);
        }
        assert!(occ.find_position(3, 5, &mut rng).is_none());
        assert!(occ.find_position(11, 1, &mut rng).is_none());
    }

    #[test]
    fn test_mask_blocks_outside_region() {
        let mut img = image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 255, 255, 255]));
        img.put_pixel(5, 5, image::Rgba([0, 0, 0, 255]));
        let mask = Mask::from_image(&image::DynamicImage::ImageRgba8(img), 8, 8);
        let occ = Occupancy::from_mask(&mask);

        assert!(!occ.is_occupied(5, 5));
        assert!(occ.is_occupied(0, 0));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(occ.find_position(1, 1, &mut rng), Some((5, 5)));
        assert!(occ.find_position(2, 1, &mut rng).is_none());
    }

    #[test]
    fn test_crop_to_ink() {
        let mut img = GrayImage::new(8, 8);
        assert!(crop_to_ink(&img).is_none());
        img.put_pixel(2, 3, Luma([40]));
        img.put_pixel(5, 4, Luma([255]));
        let cropped = crop_to_ink(&img).unwrap();
        assert_eq!(cropped.dimensions(), (4, 2));
        assert_eq!(cropped.get_pixel(0, 0).0[0], 40);
        assert_eq!(cropped.get_pixel(3, 1).0[0], 255);
    }
}
