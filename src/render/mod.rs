pub mod color;
pub mod font;
pub mod layout;
pub mod mask;
pub mod viewer;


use crate::config::{CloudConfig, MaskSource};
use crate::error::Result;
use crate::keywords::FrequencyTable;
use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use layout::{LayoutParams, Occupancy, PlacedWord};
use mask::Mask;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Word cloud renderer holding the loaded font and optional shape mask
pub struct Renderer {
    config: CloudConfig,
    font: FontVec,
    mask: Option<Mask>,
}

impl Renderer {
    /// Loads the configured mask and font
    pub fn new(config: &CloudConfig) -> Result<Self> {
        let mask = load_mask(config)?;
        let font = font::load_font(&config.font_path)?;
        Ok(Self::with_parts(config.clone(), font, mask))
    }

    /// Assembles a renderer from an already loaded font and mask
    pub fn with_parts(config: CloudConfig, font: FontVec, mask: Option<Mask>) -> Self {
        Self { config, font, mask }
    }

    pub fn font(&self) -> &FontVec {
        &self.font
    }

    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    /// Places up to `top_k` terms, heaviest first
    pub fn layout(&self, table: &FrequencyTable) -> Vec<PlacedWord> {
        let words: Vec<(&str, f64)> = table
            .sorted()
            .into_iter()
            .take(self.config.top_k)
            .collect();

        let mut occupancy = match &self.mask {
            Some(mask) => Occupancy::from_mask(mask),
            None => Occupancy::new(self.config.width, self.config.height),
        };
        let mut rng = match self.config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let params = LayoutParams::from_config(&self.config);
        let placed = layout::layout(&words, &self.font, &params, &mut occupancy, &mut rng);
        ::log::info!("Laid out {} of {} keywords", placed.len(), words.len());
        placed
    }

    /// Renders the word cloud for `table`
    pub fn render(&self, table: &FrequencyTable) -> RgbImage {
        let placed = self.layout(table);
        self.compose(&placed)
    }

    /// Paints placed words on the background and draws the mask contour on top
    pub fn compose(&self, placed: &[PlacedWord]) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(
            self.config.width,
            self.config.height,
            Rgb(self.config.background),
        );

        for word in placed {
            blend_word(&mut canvas, word);
        }

        if let Some(mask) = &self.mask {
            let color = Rgb(self.config.contour_color);
            for (x, y) in mask.contour(self.config.contour_width) {
                if x < canvas.width() && y < canvas.height() {
                    canvas.put_pixel(x, y, color);
                }
            }
        }

        canvas
    }
}

/// Loads the mask scaled to the canvas
///
/// A missing default mask file is tolerated; an explicit mask must load.
pub fn load_mask(config: &CloudConfig) -> Result<Option<Mask>> {
    match &config.mask {
        MaskSource::Disabled => Ok(None),
        MaskSource::Explicit(path) => Ok(Some(Mask::load(path, config.width, config.height)?)),
        MaskSource::Default => {
            let path = std::path::Path::new(crate::config::DEFAULT_MASK);
            if !path.exists() {
                ::log::warn!(
                    "Mask {} not found, rendering without a shape",
                    path.display()
                );
                return Ok(None);
            }
            Ok(Some(Mask::load(path, config.width, config.height)?))
        }
    }
}

/// Alpha-blends a word's color onto the canvas using its coverage
fn blend_word(canvas: &mut RgbImage, word: &PlacedWord) {
    for (px, py, coverage) in word.coverage.enumerate_pixels() {
        let alpha = coverage.0[0] as f32 / 255.0;
        if alpha == 0.0 {
            continue;
        }
        let (x, y) = (word.x + px, word.y + py);
        if x >= canvas.width() || y >= canvas.height() {
            continue;
        }
        let under = canvas.get_pixel(x, y).0;
        let out: [u8; 3] = std::array::from_fn(|c| {
            (under[c] as f32 * (1.0 - alpha) + word.color.0[c] as f32 * alpha).round() as u8
        });
        canvas.put_pixel(x, y, Rgb(out));
    }
}

/// Loads font and mask from `config` and renders `table`
pub fn render_cloud(table: &FrequencyTable, config: &CloudConfig) -> Result<RgbImage> {
    Ok(Renderer::new(config)?.render(table))
}
