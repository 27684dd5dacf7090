use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{multipart, Client};

use crate::config::Config;
use crate::error::Result;
use crate::request::{HttpRequest, RequestBody};

/// Status and undecoded text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs exactly one HTTP exchange. Failing to reach the remote is an
/// [`Error::Transport`](crate::Error::Transport); any status the remote
/// answers with is a successful exchange at this level.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse>;
}

/// `reqwest`-backed transport sharing one connection pool for the process.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse> {
        let (method, url, authorization, body) = request.into_parts();

        let mut builder = self.client.request(method.into(), url);
        if let Some(auth) = authorization {
            builder = builder.header(AUTHORIZATION, auth);
        }
        builder = match body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Form(form)) => builder.multipart(into_multipart(form)?),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}

fn into_multipart(form: crate::request::Form) -> Result<multipart::Form> {
    let mut out = multipart::Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    if let Some((name, file)) = form.file {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(file.content_type)?;
        out = out.part(name, part);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::BotToken;
    use crate::request::{FilePart, Form};
    use std::time::Duration;

    #[test]
    fn builds_with_timeout() {
        let mut config = Config::new(BotToken::new("t").unwrap());
        config.timeout = Some(Duration::from_secs(5));
        assert!(HttpTransport::new(&config).is_ok());
    }

    #[test]
    fn multipart_accepts_known_types() {
        let form = Form::new().text("name", "wave").file(
            "file",
            FilePart {
                filename: "wave.png".to_string(),
                content_type: "image/png",
                bytes: vec![1, 2, 3],
            },
        );
        assert!(into_multipart(form).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let mut config = Config::new(BotToken::new("t").unwrap());
        config.timeout = Some(Duration::from_secs(2));
        let transport = HttpTransport::new(&config).unwrap();
        let request = HttpRequest::new(
            crate::request::Method::Get,
            "http://127.0.0.1:9/unreachable".to_string(),
            None,
            None,
        );

        let err = transport.execute(request).await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
