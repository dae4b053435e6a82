//! Error types shared by the history fetcher, the Hive RPC client and the exporters.

use thiserror::Error;

/// Errors surfaced while talking to upstream services or writing output.
#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("All {0} RPC node(s) failed")]
    AllNodesFailed(usize),

    #[error("Account does not exist: {0}")]
    AccountNotFound(String),

    #[error("No account given: pass --account or set HIVE_ACCOUNT")]
    MissingAccount,

    #[error("Invalid private key in {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ActivityResult<T> = Result<T, ActivityError>;
