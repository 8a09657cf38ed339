use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one collection request, split along the boundary the
/// operator sees: a rejection carries a server payload to show, a
/// transport failure does not.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced a usable response (connect failure,
    /// broken body, malformed success payload).
    #[error("no response from server: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status. `body` holds the
    /// response payload exactly as received.
    #[error("server rejected request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}
