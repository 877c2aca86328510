use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a report run. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Transport failure or non-2xx status.
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not valid JSON.
    #[error("{endpoint} returned a body that is not valid JSON: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured API base URL does not parse.
    #[error("invalid api base url {url}: {detail}")]
    InvalidUrl { url: String, detail: String },

    /// Valid JSON, but an expected field is missing or has the wrong type.
    #[error("malformed {context}: {detail}")]
    MalformedInput { context: String, detail: String },

    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn malformed(context: impl Into<String>, detail: impl ToString) -> Self {
        Self::MalformedInput {
            context: context.into(),
            detail: detail.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
