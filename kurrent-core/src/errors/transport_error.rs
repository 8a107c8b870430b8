/// Network transport errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("backend rejected request: HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed response body: {reason}")]
    MalformedBody { reason: String },
}
