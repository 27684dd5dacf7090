use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::credential::BotToken;
use crate::error::{Error, Result};
use crate::request::HttpRequest;
use crate::transport::{RawResponse, Transport};

/// Config pointing at a fake origin with a recognisable token.
pub fn test_config() -> Config {
    let mut config = Config::new(BotToken::new("bot-secret").unwrap());
    config.api_base = "https://discord.test/api/v10".to_string();
    config
}

/// Transport double that records every request and answers with a canned reply.
pub struct RecordingTransport {
    reply: std::result::Result<RawResponse, String>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(RawResponse::new(status, body)),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(reason.to_string()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn single(&self) -> HttpRequest {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one request");
        sent.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse> {
        self.sent.lock().unwrap().push(request);
        self.reply.clone().map_err(Error::transport)
    }
}
