use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

use crate::FetchError;

/// A response body as it came off the wire.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub url: String,
    pub body: Vec<u8>,
    /// Charset named by the `Content-Type` header, if any.
    pub charset: Option<String>,
}

impl RawDocument {
    pub fn new(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        RawDocument {
            url: url.into(),
            body: body.into(),
            charset: None,
        }
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Retrieves the page behind a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError>;
}

/// Plain GET with the client's defaults: no timeout override, no retries,
/// no extra headers.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type);
        let body = response.bytes().await.map_err(request_error)?;
        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "fetched page");

        Ok(RawDocument {
            url: url.to_string(),
            body: body.to_vec(),
            charset,
        })
    }
}

/// Pulls `charset=...` out of a `Content-Type` value.
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}
