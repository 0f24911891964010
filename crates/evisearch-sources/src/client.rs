//! Shared HTTP client with connection pooling and per-request deadlines

use std::sync::LazyLock;
use std::time::Duration;

use crate::error::SourceError;

/// Deadline for bibliographic searches.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Deadline for the translation endpoint.
pub const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(8)
        .user_agent(concat!("evisearch/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// GET with query parameters; 2xx body as text, typed error otherwise.
pub async fn get_text(
    url: &str,
    query: &[(&str, &str)],
    timeout: Duration,
) -> Result<String, SourceError> {
    let resp = http_client()
        .get(url)
        .query(query)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(&e))?
        .error_for_status()
        .map_err(|e| SourceError::from_reqwest(&e))?;
    resp.text().await.map_err(|e| SourceError::from_reqwest(&e))
}
