use std::time::Duration;

use crate::credential::BotToken;
use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

pub const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
pub const API_BASE_VAR: &str = "DISCORD_API_BASE";
pub const TIMEOUT_VAR: &str = "DISCORD_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub token: BotToken,
    /// Upper bound on a single exchange; `None` keeps the client default.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Config {
    pub fn new(token: BotToken) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token,
            timeout: None,
            user_agent: default_user_agent(),
        }
    }

    /// Reads configuration from the process environment. A missing token is
    /// an error so the server refuses to start without one.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(TOKEN_VAR)
            .ok_or_else(|| Error::config(format!("{} environment variable not set", TOKEN_VAR)))?;
        let mut config = Self::new(BotToken::new(token)?);

        if let Some(base) = lookup(API_BASE_VAR).filter(|b| !b.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("{} must be a whole number of seconds", TIMEOUT_VAR)))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn default_user_agent() -> String {
    format!(
        "DiscordBot ({}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains(TOKEN_VAR));
    }

    #[test]
    fn blank_token_is_fatal() {
        assert!(Config::from_lookup(lookup(&[(TOKEN_VAR, "  ")])).is_err());
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[(TOKEN_VAR, "t")])).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("DiscordBot ("));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            (TOKEN_VAR, "t"),
            (API_BASE_VAR, "http://localhost:8080/api/"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:8080/api");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[(TOKEN_VAR, "t"), (TIMEOUT_VAR, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));
    }
}
