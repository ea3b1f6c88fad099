use thiserror::Error;

/// Errors surfaced to the user by the popup. `Display` is the inline message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Navigate to an Ashby job posting to use this extension.")]
    NotAshbyUrl,

    /// Non-2xx from `/api/job`; `message` is the server's `{error}` text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Prediction failed")]
    PredictionFailed { status: u16 },

    #[error("Prediction interrupted: {0}")]
    StreamInterrupted(reqwest::Error),

    #[error("No job loaded")]
    NoJob,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures of the local key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
