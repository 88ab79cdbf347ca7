use crate::error::{Error, Result};
use ab_glyph::FontVec;
use std::path::Path;

/// Loads a TrueType/OpenType font; collections (`.ttc`) use their first face
pub fn load_font(path: &Path) -> Result<FontVec> {
    let font_error = |reason: String| Error::Font {
        path: path.display().to_string(),
        reason,
    };

    let data = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
    let font = FontVec::try_from_vec_and_index(data, 0).map_err(|e| font_error(e.to_string()))?;

    ::log::debug!("Loaded font {}", path.display());
    Ok(font)
}
