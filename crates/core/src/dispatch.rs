//! The single chokepoint every operation goes through.
//!
//! Bot-authenticated calls use [`Dispatcher::send`] (or [`Dispatcher::send_form`]
//! for uploads); webhook-token calls use [`Dispatcher::send_webhook`]. The two
//! entry points build their requests independently, so a request carries
//! either the bot header or a webhook token in its path, never both.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::credential::{BotToken, Webhook};
use crate::error::Result;
use crate::outcome::{classify, classify_lenient, Outcome};
use crate::query::Query;
use crate::request::{Form, HttpRequest, Method, RequestBody};
use crate::route::Route;
use crate::transport::{HttpTransport, Transport};

#[derive(Clone)]
pub struct Dispatcher {
    api_base: String,
    token: BotToken,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            transport,
        }
    }

    /// Builds a bot-authenticated request for `path` (query string included).
    pub fn bot_request(&self, method: Method, path: &str, body: Option<RequestBody>) -> HttpRequest {
        HttpRequest::new(
            method,
            format!("{}{}", self.api_base, path),
            Some(self.token.authorization()),
            body,
        )
    }

    /// Builds a webhook-token request: `/webhooks/{id}/{token}{tail}?{query}`,
    /// with no `Authorization` header.
    pub fn webhook_request(
        &self,
        method: Method,
        webhook: &Webhook,
        tail: &Route,
        query: &Query,
        body: Option<Value>,
    ) -> HttpRequest {
        let mut path = Route::new("webhooks")
            .param(&webhook.id)
            .param(webhook.token.expose())
            .into_string();
        path.push_str(tail.as_str());

        HttpRequest::new(
            method,
            format!("{}{}", self.api_base, query.append_to(&path)),
            None,
            body.map(RequestBody::Json),
        )
    }

    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Outcome> {
        debug!(%method, path, "discord request");
        let request = self.bot_request(method, path, body.map(RequestBody::Json));
        self.exchange(request, path, classify).await
    }

    pub async fn send_form(&self, method: Method, path: &str, form: Form) -> Result<Outcome> {
        debug!(%method, path, fields = form.fields.len(), "discord multipart request");
        let request = self.bot_request(method, path, Some(RequestBody::Form(form)));
        self.exchange(request, path, classify).await
    }

    pub async fn send_webhook(
        &self,
        method: Method,
        webhook: &Webhook,
        tail: Route,
        query: &Query,
        body: Option<Value>,
    ) -> Result<Outcome> {
        let label = format!("/webhooks/{}/***{}", webhook.id, tail.as_str());
        debug!(%method, route = %label, "discord webhook request");
        let request = self.webhook_request(method, webhook, &tail, query, body);
        self.exchange(request, &label, classify_lenient).await
    }

    async fn exchange(
        &self,
        request: HttpRequest,
        label: &str,
        classifier: fn(u16, &str) -> Result<Outcome>,
    ) -> Result<Outcome> {
        let response = match self.transport.execute(request).await {
            Ok(r) => r,
            Err(e) => {
                warn!(route = label, error = %e, "discord exchange failed");
                return Err(e);
            }
        };

        let outcome = classifier(response.status, &response.body)?;
        if let Outcome::Failure { status, .. } = &outcome {
            if *status == 429 {
                warn!(route = label, status, "discord rate limit hit");
            } else {
                warn!(route = label, status, "discord rejected request");
            }
        }
        Ok(outcome)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Reply;
    use crate::testutils::{test_config, RecordingTransport};
    use serde_json::json;

    fn dispatcher(transport: &Arc<RecordingTransport>) -> Dispatcher {
        Dispatcher::with_transport(&test_config(), transport.clone())
    }

    #[tokio::test]
    async fn bot_request_carries_header_and_body() {
        let transport = RecordingTransport::replying(200, r#"{"id":"1"}"#);
        let outcome = dispatcher(&transport)
            .send(Method::Post, "/guilds/9/emojis", Some(json!({ "name": "wave" })))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Success(Reply::Json(json!({ "id": "1" }))));
        let sent = transport.single();
        assert_eq!(sent.method(), Method::Post);
        assert_eq!(sent.url(), "https://discord.test/api/v10/guilds/9/emojis");
        assert_eq!(sent.authorization(), Some("Bot bot-secret"));
        assert_eq!(sent.json(), Some(&json!({ "name": "wave" })));
    }

    #[tokio::test]
    async fn bot_request_never_embeds_webhook_path() {
        let transport = RecordingTransport::replying(204, "");
        dispatcher(&transport)
            .send(Method::Delete, "/webhooks/55", None)
            .await
            .unwrap();

        let sent = transport.single();
        assert_eq!(sent.url(), "https://discord.test/api/v10/webhooks/55");
        assert!(sent.body().is_none());
    }

    #[tokio::test]
    async fn webhook_request_has_no_bot_header() {
        let transport = RecordingTransport::replying(204, "");
        let hook = Webhook::new("55", "hook-secret");
        let query = Query::new().push("wait", Some(false));

        let outcome = dispatcher(&transport)
            .send_webhook(
                Method::Post,
                &hook,
                Route::tail().segment("slack"),
                &query,
                Some(json!({ "text": "hi" })),
            )
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Success(Reply::NoContent));
        let sent = transport.single();
        assert_eq!(sent.authorization(), None);
        assert_eq!(
            sent.url(),
            "https://discord.test/api/v10/webhooks/55/hook-secret/slack?wait=false"
        );
        assert!(!sent.url().contains("bot-secret"));
    }

    #[tokio::test]
    async fn webhook_empty_ok_is_no_content() {
        let transport = RecordingTransport::replying(200, "");
        let hook = Webhook::new("55", "t");
        let outcome = dispatcher(&transport)
            .send_webhook(Method::Post, &hook, Route::tail(), &Query::new(), None)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Success(Reply::NoContent));
    }

    #[tokio::test]
    async fn remote_rejection_is_failure_not_error() {
        let transport = RecordingTransport::replying(404, "Unknown Guild");
        let outcome = dispatcher(&transport)
            .send(Method::Get, "/guilds/1", None)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Failure {
                status: 404,
                message: "Discord API Error 404: Unknown Guild".to_string()
            }
        );
    }

    #[tokio::test]
    async fn transport_failure_stays_distinct() {
        let transport = RecordingTransport::unreachable("connection refused");
        let err = dispatcher(&transport)
            .send(Method::Get, "/guilds/1", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn form_upload_keeps_bot_header() {
        let transport = RecordingTransport::replying(201, r#"{"id":"7"}"#);
        let form = Form::new().text("name", "wave");
        dispatcher(&transport)
            .send_form(Method::Post, "/guilds/1/stickers", form.clone())
            .await
            .unwrap();

        let sent = transport.single();
        assert_eq!(sent.authorization(), Some("Bot bot-secret"));
        assert_eq!(sent.body(), Some(&RequestBody::Form(form)));
    }

    #[tokio::test]
    async fn independent_calls_run_concurrently() {
        let transport = RecordingTransport::replying(200, r#"{"ok":true}"#);
        let d = dispatcher(&transport);

        let (a, b) = tokio::join!(
            d.send(Method::Get, "/guilds/1", None),
            d.send(Method::Get, "/guilds/2", None)
        );

        assert_eq!(a.unwrap(), b.unwrap());
        let mut urls: Vec<_> = transport.sent().iter().map(|r| r.url().to_string()).collect();
        urls.sort();
        assert_eq!(
            urls,
            [
                "https://discord.test/api/v10/guilds/1",
                "https://discord.test/api/v10/guilds/2"
            ]
        );
    }

    #[test]
    fn debug_does_not_leak_token() {
        let transport = RecordingTransport::replying(200, "{}");
        let out = format!("{:?}", dispatcher(&transport));
        assert!(!out.contains("bot-secret"));
    }
}
