use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised before or around a Discord exchange.
///
/// A non-success HTTP status is not an error: it is reported as
/// [`Outcome::Failure`](crate::Outcome::Failure).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    Validation(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response body (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable label reported to callers alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) | Self::Validation(_) => "validation",
            Self::Transport(_) => "transport",
            Self::Decode { .. } => "decode",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}
