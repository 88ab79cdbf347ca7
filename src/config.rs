use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for fetching search result pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint that accepts `wd` and `pn` query parameters
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Number of result pages to request
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Lower bound of the random pause between pages, in seconds
    #[serde(default = "default_delay_min_secs")]
    pub delay_min_secs: f64,

    /// Upper bound (exclusive) of the random pause between pages, in seconds
    #[serde(default = "default_delay_max_secs")]
    pub delay_max_secs: f64,

    /// CSS selector matching result titles
    #[serde(default = "default_title_selector")]
    pub title_selector: String,

    /// CSS selector matching result summaries
    #[serde(default = "default_summary_selector")]
    pub summary_selector: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Configuration for keyword weighting and word cloud rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Maximum number of weighted terms extracted and drawn
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Font used for glyphs; must cover the script of the search results
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,

    /// Optional shape mask; white or transparent pixels are kept empty
    ///
    /// Read from `mask_path`: absent means the default mask, `null` disables it.
    #[serde(
        rename = "mask_path",
        default,
        skip_serializing_if = "MaskSource::is_default",
        serialize_with = "serialize_mask",
        deserialize_with = "deserialize_mask"
    )]
    pub mask: MaskSource,

    #[serde(default = "default_background")]
    pub background: [u8; 3],

    /// Contour thickness in pixels around the mask shape, 0 disables it
    #[serde(default = "default_contour_width")]
    pub contour_width: u32,

    #[serde(default = "default_contour_color")]
    pub contour_color: [u8; 3],

    /// Empty pixels kept around every placed word
    #[serde(default = "default_margin")]
    pub margin: u32,

    #[serde(default = "default_min_font_size")]
    pub min_font_size: u32,

    /// Starting font size for the heaviest word (defaults to the canvas height)
    #[serde(default)]
    pub max_font_size: Option<u32>,

    #[serde(default = "default_font_step")]
    pub font_step: u32,

    /// Probability that a word is laid out horizontally
    #[serde(default = "default_prefer_horizontal")]
    pub prefer_horizontal: f64,

    /// How much font size follows relative weight (0 = rank only, 1 = weight only)
    #[serde(default = "default_relative_scaling")]
    pub relative_scaling: f64,

    /// Seed for placement and colors; random when unset
    #[serde(default)]
    pub random_state: Option<u64>,
}

/// Configuration for written artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the text dump and the rendered image
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Whether to open the rendered cloud in an image viewer
    #[serde(default = "default_show")]
    pub show: bool,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub cloud: CloudConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

fn default_endpoint() -> String {
    "https://www.baidu.com/s".to_string()
}

fn default_max_pages() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_delay_min_secs() -> f64 {
    1.0
}

fn default_delay_max_secs() -> f64 {
    2.0
}

fn default_title_selector() -> String {
    "h3 a".to_string()
}

fn default_summary_selector() -> String {
    "span[class*='summary-text']".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/141.0.0.0 Safari/537.36 Edg/141.0.0.0"
        .to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_top_k() -> usize {
    100
}

/// Common locations of fonts able to render CJK text
const FONT_CANDIDATES: &[&str] = &[
    "C:/Windows/Fonts/simhei.ttf",
    "C:/Windows/Fonts/msyh.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
];

/// First existing candidate font, or `simhei.ttf` in the working directory
fn default_font_path() -> PathBuf {
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
        .unwrap_or_else(|| PathBuf::from("simhei.ttf"))
}

/// Default mask file in the working directory
pub const DEFAULT_MASK: &str = "cloud.png";

/// Where the shape mask comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MaskSource {
    /// `cloud.png` in the working directory, skipped when absent
    #[default]
    Default,
    /// A user supplied file that must load
    Explicit(PathBuf),
    /// No mask at all
    Disabled,
}

impl MaskSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            MaskSource::Default => Some(Path::new(DEFAULT_MASK)),
            MaskSource::Explicit(path) => Some(path),
            MaskSource::Disabled => None,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, MaskSource::Default)
    }
}

impl From<Option<PathBuf>> for MaskSource {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => MaskSource::Explicit(path),
            None => MaskSource::Disabled,
        }
    }
}

fn serialize_mask<S: Serializer>(
    mask: &MaskSource,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    mask.path().serialize(serializer)
}

fn deserialize_mask<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<MaskSource, D::Error> {
    Option::<PathBuf>::deserialize(deserializer).map(MaskSource::from)
}

fn default_background() -> [u8; 3] {
    [255, 255, 255]
}

fn default_contour_width() -> u32 {
    2
}

/// steelblue
fn default_contour_color() -> [u8; 3] {
    [70, 130, 180]
}

fn default_margin() -> u32 {
    2
}

fn default_min_font_size() -> u32 {
    4
}

fn default_font_step() -> u32 {
    1
}

fn default_prefer_horizontal() -> f64 {
    0.9
}

fn default_relative_scaling() -> f64 {
    0.5
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("txt_data")
}

fn default_show() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_pages: default_max_pages(),
            timeout_secs: default_timeout_secs(),
            delay_min_secs: default_delay_min_secs(),
            delay_max_secs: default_delay_max_secs(),
            title_selector: default_title_selector(),
            summary_selector: default_summary_selector(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            top_k: default_top_k(),
            font_path: default_font_path(),
            mask: MaskSource::Default,
            background: default_background(),
            contour_width: default_contour_width(),
            contour_color: default_contour_color(),
            margin: default_margin(),
            min_font_size: default_min_font_size(),
            max_font_size: None,
            font_step: default_font_step(),
            prefer_horizontal: default_prefer_horizontal(),
            relative_scaling: default_relative_scaling(),
            random_state: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            show: default_show(),
        }
    }
}
