use crate::error::Result;
use std::future::Future;

/// Source of raw result-page markup, one page at a time
pub trait PageSource {
    /// Fetch the markup of a 1-based result page for `keyword`
    fn fetch_page(&self, keyword: &str, page: u32) -> impl Future<Output = Result<String>>;
}
