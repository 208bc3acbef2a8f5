use thiserror::Error;

/// Errors from the backend REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session carried no bearer token; the request was never sent.
    #[error("not authenticated; request not sent")]
    Unauthenticated,

    /// The backend could not be reached.
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered 2xx but the body did not parse.
    #[error("backend response did not parse: {0}")]
    Decode(#[from] serde_json::Error),
}
