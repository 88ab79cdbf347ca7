pub mod html;

#[cfg(test)]
mod tests;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use scraper::Selector;

/// Compiled selectors locating result titles and summaries on a page
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub title: Selector,
    pub summary: Selector,
}

impl SelectorSet {
    /// Compiles the given title and summary selectors
    pub fn new(title: &str, summary: &str) -> Result<Self> {
        Ok(Self {
            title: compile(title)?,
            summary: compile(summary)?,
        })
    }

    /// Compiles the selectors named in a search configuration
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::new(&config.title_selector, &config.summary_selector)
    }
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            title: Selector::parse("h3 a").expect("static title selector"),
            summary: Selector::parse("span[class*='summary-text']")
                .expect("static summary selector"),
        }
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        ::log::debug!("Selector '{}' rejected: {}", selector, e);
        Error::Selector(selector.to_string())
    })
}
