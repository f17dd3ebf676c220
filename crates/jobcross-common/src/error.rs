/// Error types shared across the jobcross crates.
///
/// These cover failures in the backend HTTP contract. Application-specific
/// errors are defined in each binary crate and wrap `CommonError` via `#[from]`.
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backend returned error: status={status} message={message}")]
    Api { status: StatusCode, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
