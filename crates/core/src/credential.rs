use std::fmt;

use crate::error::{Error, Result};

/// Process-wide bot credential. Only ever sent as an `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(Error::config("bot token is empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Header value in the form Discord expects for bot users.
    pub fn authorization(&self) -> String {
        format!("Bot {}", self.0)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(***)")
    }
}

/// Per-webhook secret. Discord authenticates webhook routes by this path
/// segment alone, so it never travels in a header.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookToken(String);

impl WebhookToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WebhookToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookToken(***)")
    }
}

/// A webhook addressed through its own token instead of the bot identity.
#[derive(Debug, Clone)]
pub struct Webhook {
    pub id: String,
    pub token: WebhookToken,
}

impl Webhook {
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: WebhookToken::new(token),
        }
    }
}
