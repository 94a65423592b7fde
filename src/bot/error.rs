use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }
}
