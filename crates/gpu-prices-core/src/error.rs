#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[cfg(feature = "network")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad config: {0}")]
    Config(String),

    #[error("no Firecrawl API key found: set $FIRECRAWL_API_KEY or [firecrawl].api_key")]
    NoApiKey,

    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GpuError>;

/// Why a payload could not be turned into listings. Never leaves the
/// normalizer; every variant ends in fallback data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("no payload")]
    NoPayload,

    #[error("raw page envelope ({0}), nothing was extracted")]
    Envelope(&'static str),

    #[error("unrecognized payload: {0}")]
    Unrecognized(&'static str),

    #[error("found {found} candidate records, need at least {required}")]
    TooFewRecords { found: usize, required: usize },
}
