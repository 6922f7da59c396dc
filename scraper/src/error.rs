use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL {url:?}: {reason}")]
    Url { url: String, reason: String },

    #[error("malformed posting URN {0:?}: expected at least four ':' segments")]
    MalformedUrn(String),

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
