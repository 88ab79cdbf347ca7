use crate::crawlers::{Pacing, PageSource, crawl};
use crate::error::{Error, Result};
use crate::results::PageOutcome;
use std::cell::RefCell;

/// Canned response for one page
enum Script {
    Html(&'static str),
    Empty,
    Fail,
}

/// Page source replaying scripted responses and recording requested pages
struct ScriptedSource {
    script: Vec<Script>,
    requested: RefCell<Vec<u32>>,
}

impl ScriptedSource {
    fn new(script: Vec<Script>) -> Self {
        Self {
            script,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl PageSource for ScriptedSource {
    async fn fetch_page(&self, _keyword: &str, page: u32) -> Result<String> {
        self.requested.borrow_mut().push(page);
        match self.script.get(page as usize - 1) {
            Some(Script::Html(html)) => Ok(html.to_string()),
            Some(Script::Empty) => Ok(String::new()),
            Some(Script::Fail) | None => Err(Error::Status(503)),
        }
    }
}

const THREE_TITLES_TWO_SUMMARIES: &str = "<h3><a>A</a></h3><h3><a>B</a></h3><h3><a>C</a></h3>\
     <span class=\"summary-text\">x</span><span class=\"summary-text\">y</span>";

const NO_TITLES: &str = "<html><body><p>验证码</p></body></html>";

#[cfg(test)]
mod aggregate_tests {
    use super::*;

    #[tokio::test]
    async fn test_every_page_attempted_despite_failures() {
        let source = ScriptedSource::new(vec![
            Script::Fail,
            Script::Html(NO_TITLES),
            Script::Empty,
            Script::Html(THREE_TITLES_TWO_SUMMARIES),
            Script::Fail,
        ]);

        let report = crawl(&source, "rust", 5, Pacing::none()).await;

        assert_eq!(*source.requested.borrow(), vec![1, 2, 3, 4, 5]);
        assert_eq!(report.attempted(), 5);
        assert_eq!(report.pages[0], (1, PageOutcome::FetchFailed));
        assert_eq!(report.pages[1], (2, PageOutcome::NoResults));
        assert_eq!(report.pages[2], (3, PageOutcome::FetchFailed));
        assert_eq!(
            report.pages[3],
            (4, PageOutcome::Collected { titles: 3, lines: 2 })
        );
        assert_eq!(report.fetch_failures(), 3);
        assert_eq!(report.text, "A x\nB y\n");
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_text() {
        let source = ScriptedSource::new(Vec::new());
        let report = crawl(&source, "rust", 3, Pacing::none()).await;

        assert_eq!(source.requested.borrow().len(), 3);
        assert_eq!(report.text, "");
        assert_eq!(report.collected(), 0);
        assert_eq!(report.fetch_failures(), 3);
    }

    #[tokio::test]
    async fn test_text_accumulates_across_pages() {
        let source = ScriptedSource::new(vec![
            Script::Html("<h3><a>one</a></h3><span class=\"summary-text\">1</span>"),
            Script::Html("<h3><a>two</a></h3><span class=\"summary-text\">2</span>"),
        ]);
        let report = crawl(&source, "rust", 2, Pacing::none()).await;
        assert_eq!(report.text, "one 1\ntwo 2\n");
        assert_eq!(report.lines(), 2);
    }

    #[tokio::test]
    async fn test_zero_pages_makes_no_requests() {
        let source = ScriptedSource::new(vec![Script::Html(THREE_TITLES_TWO_SUMMARIES)]);
        let report = crawl(&source, "rust", 0, Pacing::none()).await;
        assert!(source.requested.borrow().is_empty());
        assert_eq!(report.attempted(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_only_between_pages() {
        let source = ScriptedSource::new(vec![
            Script::Html(THREE_TITLES_TWO_SUMMARIES),
            Script::Html(THREE_TITLES_TWO_SUMMARIES),
        ]);
        let start = tokio::time::Instant::now();
        crawl(&source, "rust", 2, Pacing::new(1.0, 1.0)).await;
        assert_eq!(start.elapsed(), std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_pacing_sample_bounds() {
        let pacing = Pacing::default();
        for _ in 0..100 {
            let d = pacing.sample().as_secs_f64();
            assert!((1.0..2.0).contains(&d), "pause {} out of range", d);
        }
        assert!(Pacing::none().sample().is_zero());
        assert!(Pacing::new(3.0, 1.0).sample() == std::time::Duration::from_secs(3));
        assert!(Pacing::new(-1.0, 0.0).sample().is_zero());
    }
}
