use serde::{Deserialize, Serialize};

/// Titles and summaries extracted from one search result page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Result titles in document order
    pub titles: Vec<String>,

    /// Result summaries in document order (may not line up with titles)
    pub summaries: Vec<String>,
}

impl PageResult {
    /// Create a new page result
    pub fn new(titles: Vec<String>, summaries: Vec<String>) -> Self {
        Self { titles, summaries }
    }

    /// Pairs titles with summaries by position, stopping at the shorter list
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.titles
            .iter()
            .zip(self.summaries.iter())
            .map(|(title, summary)| format!("{} {}\n", title, summary))
    }
}

/// What happened to a single page during a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageOutcome {
    /// Page parsed; `lines` title/summary pairs were appended
    Collected { titles: usize, lines: usize },
    /// Request failed or returned an empty body
    FetchFailed,
    /// Page fetched but no titles matched
    NoResults,
}

/// Accumulated text plus a per-page tally
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlReport {
    /// One `"{title} {summary}\n"` line per paired result, across all pages
    pub text: String,

    /// Outcome for every attempted page, in page order
    pub pages: Vec<(u32, PageOutcome)>,
}

impl CrawlReport {
    /// Record the outcome of one page
    pub fn record(&mut self, page: u32, outcome: PageOutcome) {
        self.pages.push((page, outcome));
    }

    pub fn attempted(&self) -> usize {
        self.pages.len()
    }

    /// Pages that contributed at least a title
    pub fn collected(&self) -> usize {
        self.pages
            .iter()
            .filter(|(_, o)| matches!(o, PageOutcome::Collected { .. }))
            .count()
    }

    pub fn fetch_failures(&self) -> usize {
        self.pages
            .iter()
            .filter(|(_, o)| *o == PageOutcome::FetchFailed)
            .count()
    }

    pub fn empty_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|(_, o)| *o == PageOutcome::NoResults)
            .count()
    }

    /// Total number of lines appended to `text`
    pub fn lines(&self) -> usize {
        self.pages
            .iter()
            .map(|(_, o)| match o {
                PageOutcome::Collected { lines, .. } => *lines,
                _ => 0,
            })
            .sum()
    }
}
