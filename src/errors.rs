use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// No storage provider variant is populated, or more than one is.
    #[error("Unknown storage provider: {0}")]
    UnknownStorageProvider(String),

    #[error("Malformed dump metadata at {}: {reason}", .path.display())]
    MetadataFormat { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
