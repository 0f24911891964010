//! Typed error for source adapter calls

/// Failure of a single adapter call (HTTP or body decode).
///
/// These never abort an orchestration; the collector records the first one
/// observed per source label and the response carries partial results.
#[derive(Debug)]
pub enum SourceError {
    /// Non-2xx response or transport failure, with status when known.
    Http {
        status: Option<u16>,
        message: String,
    },
    /// The per-request deadline elapsed.
    Timeout,
    /// The body arrived but did not decode as the expected shape.
    Parse(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Parse(msg) => write!(f, "unexpected response: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl SourceError {
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }
        // Strip URL from the error to avoid echoing query text in responses
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e
                .status()
                .map_or_else(|| "request failed".to_string(), |s| s.to_string()),
        }
    }

    pub fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }
}
