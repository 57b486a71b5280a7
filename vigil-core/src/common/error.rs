use thiserror::Error;

#[derive(Error, Debug)]
pub enum VigilError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Collaborator error: {message}")]
    Collaborator { message: String },
}

pub type Result<T> = std::result::Result<T, VigilError>;
