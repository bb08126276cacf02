use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchpalError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path error: {path}: {message}")]
    Path { path: PathBuf, message: String },

    #[error("{0}")]
    Other(String),
}

impl PatchpalError {
    pub fn path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchpalError>;
