//! HTTP fetcher for the roster page
//!
//! A single GET per refresh with a bounded timeout. There are no retries; a
//! failed fetch is answered by the roster service with its fallback set.

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Response,
};

use crate::config::SourceConfig;
use crate::utils::error::FetchError;

/// Something that can hand back the raw markup of a document
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the document at `url` as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed document source
pub struct RosterFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,
}

impl RosterFetcher {
    /// Create a fetcher from source settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(Self::default_headers())
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers
    }

    /// Decode a response body
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Decode` if the content cannot be decoded
    async fn decode_response(response: Response) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await?;

        decode_bytes(&bytes, &content_type)
    }
}

#[async_trait]
impl DocumentSource for RosterFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed =
            url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        tracing::debug!(url = %parsed, "Fetching roster page");

        let response = match self.client.get(parsed).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(FetchError::Timeout),
            Err(e) => return Err(FetchError::Http(e)),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        Self::decode_response(response).await
    }
}

/// Decode bytes using the charset named in a Content-Type value
///
/// Unknown or missing charsets fall back to UTF-8. A leading byte-order mark
/// overrides the declared charset.
///
/// # Errors
///
/// Returns `FetchError::Decode` if the bytes are malformed for the chosen
/// encoding.
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
    let encoding = charset_label(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (cow, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(FetchError::Decode(format!("{} decoding errors", used.name())));
    }

    Ok(cow.into_owned())
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}
