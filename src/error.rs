use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },

    #[error("toolbox request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tool `{tool}` returned HTTP {status}: {message}")]
    ToolFailed {
        tool: String,
        status: u16,
        message: String,
    },

    #[error("tool `{tool}` returned a malformed envelope: {message}")]
    Envelope { tool: String, message: String },
}

pub type Result<T> = std::result::Result<T, GatewayError>;
