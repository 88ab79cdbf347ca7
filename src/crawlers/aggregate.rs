use crate::config::SearchConfig;
use crate::crawlers::PageSource;
use crate::parsers::{SelectorSet, html};
use crate::results::{CrawlReport, PageOutcome};
use rand::Rng;
use std::time::Duration;

/// Random pause inserted between consecutive page requests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// Lower bound in seconds
    pub min_secs: f64,
    /// Upper bound (exclusive) in seconds
    pub max_secs: f64,
}

impl Pacing {
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// No pause at all
    pub fn none() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.delay_min_secs, config.delay_max_secs)
    }

    /// Draws a pause uniformly from `[min_secs, max_secs)`
    ///
    /// A degenerate or inverted range collapses to `min_secs`; negative bounds count as zero.
    pub fn sample(&self) -> Duration {
        let min = self.min_secs.max(0.0);
        let max = self.max_secs.max(0.0);
        let secs = if max > min {
            rand::thread_rng().gen_range(min..max)
        } else {
            min
        };
        Duration::from_secs_f64(secs)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}

/// Crawls pages `1..=max_pages` with the default selectors
pub async fn crawl<S: PageSource>(
    source: &S,
    keyword: &str,
    max_pages: u32,
    pacing: Pacing,
) -> CrawlReport {
    crawl_with_selectors(source, keyword, max_pages, pacing, &SelectorSet::default()).await
}

/// Crawls pages `1..=max_pages`, appending one line per title/summary pair
///
/// Every page is attempted; a failed fetch or a page without titles is logged,
/// recorded in the report and skipped. The returned text is empty when no page
/// yielded results.
pub async fn crawl_with_selectors<S: PageSource>(
    source: &S,
    keyword: &str,
    max_pages: u32,
    pacing: Pacing,
    selectors: &SelectorSet,
) -> CrawlReport {
    let mut report = CrawlReport::default();

    for page in 1..=max_pages {
        let outcome = crawl_page(source, keyword, page, selectors, &mut report.text).await;
        report.record(page, outcome);

        if page < max_pages {
            let pause = pacing.sample();
            if !pause.is_zero() {
                ::log::debug!("Sleeping {:.2}s before page {}", pause.as_secs_f64(), page + 1);
                tokio::time::sleep(pause).await;
            }
        }
    }

    ::log::info!(
        "Crawl finished: {} of {} pages collected, {} failed, {} empty",
        report.collected(),
        report.attempted(),
        report.fetch_failures(),
        report.empty_pages()
    );

    report
}

/// Fetches and parses one page, appending its lines to `text`
async fn crawl_page<S: PageSource>(
    source: &S,
    keyword: &str,
    page: u32,
    selectors: &SelectorSet,
    text: &mut String,
) -> PageOutcome {
    let markup = match source.fetch_page(keyword, page).await {
        Ok(markup) => markup,
        Err(e) => {
            ::log::warn!("Page {} could not be fetched: {}", page, e);
            return PageOutcome::FetchFailed;
        }
    };
    if markup.is_empty() {
        ::log::warn!("Page {} came back empty", page);
        return PageOutcome::FetchFailed;
    }

    let result = html::parse_results_with(&markup, selectors);
    if result.titles.is_empty() {
        ::log::warn!("Page {} returned no results", page);
        return PageOutcome::NoResults;
    }

    let mut lines = 0;
    for line in result.lines() {
        text.push_str(&line);
        lines += 1;
    }

    ::log::info!(
        "Page {} crawled, {} results collected",
        page,
        result.titles.len()
    );

    PageOutcome::Collected {
        titles: result.titles.len(),
        lines,
    }
}
