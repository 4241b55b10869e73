//! Error types shared by the client, repository and workflow layers.

/// Failures from report API calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReportError {
    /// Server answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}, message: {body}")]
    Http { status: u16, body: String },
    /// Request never produced a response (network, CORS, aborted fetch).
    #[error("Request failed: {0}")]
    Transport(String),
    /// Envelope reported `Status: false`.
    #[error("API returned unsuccessful status")]
    Api(String),
    /// Body was not the JSON shape we expected.
    #[error("Malformed response: {0}")]
    Parse(String),
    /// Envelope carried no `results` payload.
    #[error("API returned no results")]
    NoResults,
    /// No valid identity session; raised before any request is sent.
    #[error("AUTHENTICATION_REQUIRED")]
    AuthRequired,
    /// The fetch was cancelled by a newer search or an explicit abort.
    #[error("Request cancelled")]
    Cancelled,
}

impl ReportError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, ReportError::AuthRequired)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ReportError::Cancelled)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::Parse(e.to_string())
    }
}

/// Failures from the key-value preference backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("invalid value: {0}")]
    InvalidInput(String),
}

pub type ReportResult<T> = Result<T, ReportError>;
pub type StoreResult<T> = Result<T, StoreError>;
