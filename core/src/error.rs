use thiserror::Error;

/// Failure of one page fetch or service call.
///
/// The service reports problems as human-readable text bodies, not structured
/// codes, so every variant displays as the string a view should show.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Connection, DNS or transport failure before any HTTP status was seen
    #[error("{0}")]
    Network(String),
    /// Non-2xx response; the body is the service's message
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx response whose body could not be decoded
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status code, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
