use crate::parsers::SelectorSet;
use crate::results::PageResult;
use scraper::{ElementRef, Html, Selector};

/// Parses a result page with the default title and summary selectors
pub fn parse_results(html: &str) -> PageResult {
    parse_results_with(html, &SelectorSet::default())
}

/// Parses a result page with custom selectors
pub fn parse_results_with(html: &str, selectors: &SelectorSet) -> PageResult {
    let doc = Html::parse_document(html);

    let titles = select_texts(&doc, &selectors.title);
    let summaries = select_texts(&doc, &selectors.summary);

    ::log::debug!(
        "HTML parser found {} titles and {} summaries",
        titles.len(),
        summaries.len()
    );
    if titles.len() != summaries.len() {
        ::log::debug!("Title and summary counts differ; pairing stops at the shorter list");
    }

    PageResult::new(titles, summaries)
}

/// Trimmed, whitespace-collapsed text of every matching element, skipping empty ones
fn select_texts(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Concatenates the text nodes of an element and normalizes whitespace
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
