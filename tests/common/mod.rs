//! Common test utilities

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rollcall::config::Config;
use rollcall::crawler::DocumentSource;
use rollcall::roster::RosterService;
use rollcall::utils::error::FetchError;

/// Source URL used by in-memory tests
pub const TEST_URL: &str = "http://roster.test/senators";

/// Load an HTML fixture from `tests/fixtures/html`
pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/html/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {path}: {e}"))
}

/// Default config pointed at [`TEST_URL`]
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.source.url = TEST_URL.to_string();
    config
}

/// Build a marked roster table with `n` well-formed rows
pub fn roster_page(n: usize) -> String {
    let rows: String = (0..n)
        .map(|i| {
            format!(
                "<tr><td>Member Number {i}</td><td>Ohio</td><td>Democratic</td>\
                 <td>January 3, {}</td></tr>",
                1990 + (i % 30)
            )
        })
        .collect();

    format!(
        "<html><body><table class=\"wikitable\">\
         <tr><th>Senator</th><th>State</th><th>Party</th><th>Assumed office</th></tr>\
         {rows}</table>\
         <a title=\"Senator Extra Person\">Extra Person</a></body></html>"
    )
}

/// In-memory document source that counts fetches
///
/// Serves the configured HTML, or fails with a 503 when none is set.
pub struct CountingSource {
    html: Mutex<Option<String>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingSource {
    pub fn serving(html: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            html: Mutex::new(Some(html.into())),
            calls: AtomicUsize::new(0),
            delay: None,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            html: Mutex::new(None),
            calls: AtomicUsize::new(0),
            delay: None,
        })
    }

    /// Serve `html` after sleeping for `delay` on every fetch
    pub fn slow(html: impl Into<String>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            html: Mutex::new(Some(html.into())),
            calls: AtomicUsize::new(0),
            delay: Some(delay),
        })
    }

    pub fn set_html(&self, html: Option<String>) {
        *self.html.lock().unwrap() = html;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for CountingSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        assert_eq!(url, TEST_URL);
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let html = self.html.lock().unwrap().clone();
        html.ok_or(FetchError::ServerError(503))
    }
}

/// Service over a counting source with the default test config
pub fn service_with(source: Arc<CountingSource>) -> Arc<RosterService> {
    Arc::new(RosterService::new(&test_config(), source).unwrap())
}
