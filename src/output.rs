use crate::error::Result;
use crate::utils::sanitize_filename;
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the artifacts written for one keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    /// `<dir>/<keyword>_result.txt`
    pub text_path: PathBuf,
    /// `<dir>/词云图_<keyword>.png`
    pub image_path: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: impl AsRef<Path>, keyword: &str) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let name = sanitize_filename(keyword);
        Self {
            text_path: dir.join(format!("{}_result.txt", name)),
            image_path: dir.join(format!("词云图_{}.png", name)),
            dir,
        }
    }

    /// Writes the aggregated text as UTF-8, creating the directory if needed
    pub fn write_text(&self, text: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(&self.text_path, text.as_bytes())?;
        ::log::info!("Search results saved to {}", self.text_path.display());
        Ok(())
    }

    /// Writes the rendered cloud as PNG, creating the directory if needed
    pub fn write_image(&self, image: &RgbImage) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        image.save(&self.image_path)?;
        ::log::info!("Word cloud saved to {}", self.image_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_named_by_keyword() {
        let paths = OutputPaths::new("txt_data", "rust 教程");
        assert_eq!(paths.text_path, PathBuf::from("txt_data/rust 教程_result.txt"));
        assert_eq!(paths.image_path, PathBuf::from("txt_data/词云图_rust 教程.png"));
    }

    #[test]
    fn test_text_round_trip_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path().join("nested/out"), "rock & roll");
        let text = "标题 摘要\nTitle — summary ✓\n";

        paths.write_text(text).unwrap();
        let bytes = fs::read(&paths.text_path).unwrap();
        assert_eq!(bytes, text.as_bytes());
        assert_eq!(fs::read_to_string(&paths.text_path).unwrap(), text);
    }

    #[test]
    fn test_empty_text_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path(), "nothing");
        paths.write_text("").unwrap();
        assert_eq!(fs::metadata(&paths.text_path).unwrap().len(), 0);
    }

    #[test]
    fn test_image_written_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path(), "词云");
        let image = RgbImage::from_pixel(8, 6, image::Rgb([255, 255, 255]));
        paths.write_image(&image).unwrap();

        let decoded = image::open(&paths.image_path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }
}
