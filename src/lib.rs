// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod keywords;
pub mod output;
pub mod parsers;
pub mod render;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use keywords::{FrequencyTable, KeywordExtractor};
pub use results::{CrawlReport, PageOutcome, PageResult};

use config::AppConfig;
use crawlers::{Pacing, PageSource, SearchClient};
use output::OutputPaths;
use parsers::SelectorSet;
use std::path::{Path, PathBuf};

/// What a pipeline run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub keyword: String,
    pub report: CrawlReport,
    pub keywords: FrequencyTable,
    pub paths: OutputPaths,
    /// Words that made it onto the image
    pub words_drawn: usize,
}

/// Builder for a search → keywords → word cloud run
pub struct SearchCloud {
    keyword: String,
    config: AppConfig,
}

impl SearchCloud {
    /// Create a new builder for `keyword` with default configuration
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().trim().to_string(),
            config: AppConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = AppConfig::from_file(path)?;
        Ok(self)
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(mut self, json: &str) -> Result<Self> {
        self.config = AppConfig::from_json(json)?;
        Ok(self)
    }

    /// Override the number of result pages to crawl
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.config.search.max_pages = max_pages;
        self
    }

    /// Override how many weighted terms are extracted and drawn
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.config.cloud.top_k = top_k;
        self
    }

    /// Use an explicit shape mask, or none at all
    pub fn with_mask(mut self, mask: Option<PathBuf>) -> Self {
        self.config.cloud.mask = mask.into();
        self
    }

    pub fn with_font(mut self, font: impl Into<PathBuf>) -> Self {
        self.config.cloud.font_path = font.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output.out_dir = dir.into();
        self
    }

    /// Whether to open the rendered image in a viewer
    pub fn with_show(mut self, show: bool) -> Self {
        self.config.output.show = show;
        self
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Crawl the configured search endpoint and build the word cloud
    pub async fn run(self) -> Result<RunSummary> {
        let client = SearchClient::new(&self.config.search)?;
        self.run_with_source(&client).await
    }

    /// Run the pipeline against any page source
    ///
    /// The crawl itself never fails; font, mask and filesystem problems do.
    pub async fn run_with_source<S: PageSource>(self, source: &S) -> Result<RunSummary> {
        if self.keyword.is_empty() {
            return Err(Error::EmptyKeyword);
        }
        let selectors = SelectorSet::from_config(&self.config.search)?;
        let paths = OutputPaths::new(&self.config.output.out_dir, &self.keyword);

        ::log::info!("Searching for '{}'", self.keyword);
        let report = crawlers::aggregate::crawl_with_selectors(
            source,
            &self.keyword,
            self.config.search.max_pages,
            Pacing::from_config(&self.config.search),
            &selectors,
        )
        .await;

        paths.write_text(&report.text)?;

        let keywords = KeywordExtractor::new().extract(&report.text, self.config.cloud.top_k);
        if keywords.is_empty() {
            ::log::warn!("No keywords extracted; the word cloud will be blank");
        }

        let renderer = render::Renderer::new(&self.config.cloud)?;
        let placed = renderer.layout(&keywords);
        let image = renderer.compose(&placed);
        paths.write_image(&image)?;

        if self.config.output.show {
            render::viewer::show(&image, &self.keyword, renderer.font())?;
        }

        Ok(RunSummary {
            keyword: self.keyword,
            report,
            keywords,
            paths,
            words_drawn: placed.len(),
        })
    }
}
