pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid registry: {message}")]
    InvalidRegistry { message: String },

    #[error("Invalid engine config: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid layout snapshot: {message}")]
    InvalidSnapshot { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
