use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Successful payload of a Discord exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    /// The remote acknowledged the call without a body (HTTP 204).
    NoContent,
}

impl Reply {
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(v) => v,
            Self::NoContent => json!({
                "status": "success",
                "detail": "Action completed successfully."
            }),
        }
    }
}

/// The only shape any operation hands back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Reply),
    Failure { status: u16, message: String },
}

impl Outcome {
    pub fn failure(status: u16, raw: &str) -> Self {
        Self::Failure {
            status,
            message: format!("Discord API Error {}: {}", status, raw),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Classifies a bot-authenticated response.
pub fn classify(status: u16, body: &str) -> Result<Outcome> {
    match status {
        200 | 201 => serde_json::from_str(body)
            .map(|v| Outcome::Success(Reply::Json(v)))
            .map_err(|source| Error::Decode { status, source }),
        204 => Ok(Outcome::Success(Reply::NoContent)),
        _ => Ok(Outcome::failure(status, body)),
    }
}

/// Classifies a webhook-token response.
///
/// Webhook execution answers 204, 200 with a message when the caller asked
/// to wait, or 200 with plain text (`ok` from the Slack endpoint). Any 200/201
/// body that is not JSON counts as no content here.
pub fn classify_lenient(status: u16, body: &str) -> Result<Outcome> {
    match status {
        200 | 201 => match serde_json::from_str(body) {
            Ok(v) => Ok(Outcome::Success(Reply::Json(v))),
            Err(e) => {
                debug!(status, error = %e, "webhook reply is not json");
                Ok(Outcome::Success(Reply::NoContent))
            }
        },
        _ => classify(status, body),
    }
}
