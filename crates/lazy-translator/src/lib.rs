/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate a selection the dictionary had no entry for
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Text that was sent
    pub source: String,
    pub text: String,
    pub provider: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
