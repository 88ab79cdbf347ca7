use crate::config::SearchConfig;
use crate::crawlers::PageSource;
use crate::error::{Error, Result};
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

/// Results requested per page; page offsets advance by this much
pub const RESULTS_PER_PAGE: u32 = 10;

/// Builds the search URL for a 1-based page number
///
/// The keyword is percent-encoded (`&` becomes `%26`, spaces `%20`) into `wd`
/// and `pn` carries the zero-based result offset `(page - 1) * 10`.
pub fn search_url(endpoint: &str, keyword: &str, page: u32) -> Result<Url> {
    let base = Url::parse(endpoint)?;
    let offset = page.saturating_sub(1) * RESULTS_PER_PAGE;
    let separator = if base.query().is_some() { '&' } else { '?' };
    let url = format!(
        "{}{}wd={}&pn={}",
        base.as_str(),
        separator,
        urlencoding::encode(keyword),
        offset
    );
    Ok(Url::parse(&url)?)
}

/// Browser-like header set sent with every search request
fn default_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(user_agent) {
        headers.insert(header::USER_AGENT, value);
    } else {
        ::log::warn!("Ignoring invalid User-Agent header: {}", user_agent);
    }
    headers.insert(
        header::REFERER,
        HeaderValue::from_static("https://www.baidu.com/"),
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// HTTP client for the search endpoint
pub struct SearchClient {
    client: Client,
    endpoint: String,
}

impl SearchClient {
    /// Create a client with the configured headers and timeout
    pub fn new(config: &SearchConfig) -> Result<Self> {
        // Fail early on a malformed endpoint instead of once per page
        Url::parse(&config.endpoint)?;

        let client = Client::builder()
            .default_headers(default_headers(&config.user_agent))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Fetch one result page, failing on network errors, timeouts and non-success statuses
    ///
    /// The body is decoded as UTF-8 regardless of the declared charset.
    pub async fn try_fetch(&self, keyword: &str, page: u32) -> Result<String> {
        let url = search_url(&self.endpoint, keyword, page)?;
        ::log::debug!("Requesting page {}: {}", page, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fetch one result page, returning an empty string on any failure
    pub async fn fetch_html(&self, keyword: &str, page: u32) -> String {
        match self.try_fetch(keyword, page).await {
            Ok(html) => html,
            Err(e) => {
                ::log::error!("Request for page {} failed: {}", page, e);
                String::new()
            }
        }
    }
}

impl PageSource for SearchClient {
    async fn fetch_page(&self, keyword: &str, page: u32) -> Result<String> {
        self.try_fetch(keyword, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://www.baidu.com/s";

    #[test]
    fn test_page_offsets() {
        let offsets: Vec<String> = (1..=5)
            .map(|page| {
                let url = search_url(ENDPOINT, "rust", page).unwrap();
                url.query_pairs()
                    .find(|(k, _)| k == "pn")
                    .map(|(_, v)| v.into_owned())
                    .unwrap()
            })
            .collect();
        assert_eq!(offsets, vec!["0", "10", "20", "30", "40"]);
    }

    #[test]
    fn test_keyword_is_percent_encoded() {
        let url = search_url(ENDPOINT, "rock & roll", 1).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.baidu.com/s?wd=rock%20%26%20roll&pn=0"
        );

        let wd: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "wd")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(wd, vec!["rock & roll"]);
    }

    #[test]
    fn test_cjk_keyword_round_trips() {
        let url = search_url(ENDPOINT, "词云", 2).unwrap();
        assert!(url.as_str().starts_with("https://www.baidu.com/s?wd=%E8%AF%8D%E4%BA%91&pn=10"));
    }

    #[test]
    fn test_page_zero_clamps_to_first_offset() {
        let url = search_url(ENDPOINT, "x", 0).unwrap();
        assert!(url.as_str().ends_with("pn=0"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = search_url("not a url", "x", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let config = SearchConfig {
            endpoint: "::".to_string(),
            ..SearchConfig::default()
        };
        assert!(SearchClient::new(&config).is_err());
    }

    #[test]
    fn test_headers() {
        let headers = default_headers("TestAgent/1.0");
        assert_eq!(headers[header::USER_AGENT], "TestAgent/1.0");
        assert_eq!(headers[header::REFERER], "https://www.baidu.com/");
        assert_eq!(headers[header::ACCEPT_LANGUAGE], "zh-CN,zh;q=0.9,en;q=0.8");
        assert_eq!(headers[header::CONNECTION], "keep-alive");
        assert!(headers.contains_key(header::ACCEPT));
    }
}
