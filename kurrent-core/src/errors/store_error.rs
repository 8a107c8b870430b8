/// Key-value store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("write to key {key} failed: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("store backend error: {message}")]
    Backend { message: String },
}
