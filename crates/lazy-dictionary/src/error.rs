use lazy_core::error::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Read error: can't detect encoding")]
    EncodingUndetectable,

    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(&'static str),

    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
