use std::collections::HashMap;

use article_wordfreq::{
    shell::AppState, Analyzer, AppConfig, FetchError, Fetcher, RawDocument,
};
use async_trait::async_trait;

pub const ARTICLE_URL: &str = "http://articles.test/rust";
pub const EMPTY_URL: &str = "http://articles.test/empty";
pub const SCRIPT_ONLY_URL: &str = "http://articles.test/script";

pub const ARTICLE: &str = "<html><head><title>Rust news</title>\n\
<style>.x{color:red}</style>\n</head>\n<body>\n\
<script>var tracker = 1;</script>\n\
<p>Rust crates and Rust traits.</p>\n\
<p>Rust crates, cargo!</p>\n\
<p>今天我们讨论编程语言，编程语言很有趣。</p>\n\
</body></html>";

/// Serves canned pages; anything else is a 404.
pub struct StubFetcher {
    pages: HashMap<&'static str, &'static str>,
}

impl StubFetcher {
    pub fn new() -> Self {
        let pages = HashMap::from([
            (ARTICLE_URL, ARTICLE),
            (EMPTY_URL, ""),
            (SCRIPT_ONLY_URL, "<html><body><script>alert('hi')</script></body></html>"),
        ]);
        StubFetcher { pages }
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        match self.pages.get(url) {
            Some(body) => Ok(RawDocument::new(url, body.as_bytes().to_vec())),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn analyzer() -> Analyzer {
    Analyzer::new().with_fetcher(StubFetcher::new()).build()
}

#[allow(dead_code)]
pub fn state() -> AppState {
    AppState::new(analyzer(), AppConfig::default())
}
