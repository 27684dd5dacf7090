use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A file attached to a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Reads `path` and guesses the content type from its extension.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let content_type = content_type_for(path);

        Ok(Self {
            filename,
            content_type,
            bytes,
        })
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") | Some("apng") => "image/png",
        Some("gif") => "image/gif",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Multipart form body: plain text fields plus at most one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pub fields: Vec<(String, String)>,
    pub file: Option<(String, FilePart)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn opt_text(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    pub fn file(mut self, name: &str, part: FilePart) -> Self {
        self.file = Some((name.to_string(), part));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(Form),
}

impl RequestBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            Self::Form(_) => None,
        }
    }
}

/// A fully built request, ready for a [`Transport`](crate::Transport).
///
/// Only the dispatcher constructs these, which is what keeps the bot header
/// and webhook tokens on separate requests.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    method: Method,
    url: String,
    authorization: Option<String>,
    body: Option<RequestBody>,
}

impl HttpRequest {
    pub(crate) fn new(
        method: Method,
        url: String,
        authorization: Option<String>,
        body: Option<RequestBody>,
    ) -> Self {
        Self {
            method,
            url,
            authorization,
            body,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn json(&self) -> Option<&Value> {
        self.body.as_ref().and_then(RequestBody::as_json)
    }

    pub(crate) fn into_parts(self) -> (Method, String, Option<String>, Option<RequestBody>) {
        (self.method, self.url, self.authorization, self.body)
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("authorized", &self.authorization.is_some())
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn method_names_are_uppercase_verbs() {
        let names: Vec<_> = [Method::Get, Method::Post, Method::Patch, Method::Put, Method::Delete]
            .iter()
            .map(Method::as_str)
            .collect();
        assert_eq!(names, ["GET", "POST", "PATCH", "PUT", "DELETE"]);
    }

    #[test]
    fn form_skips_absent_text() {
        let form = Form::new()
            .text("name", "wave")
            .opt_text("description", None::<String>)
            .opt_text("tags", Some("hello"));
        assert_eq!(
            form.fields,
            vec![
                ("name".to_string(), "wave".to_string()),
                ("tags".to_string(), "hello".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn file_part_reads_bytes_and_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Wave.PNG");
        fs::write(&path, b"\x89PNG").unwrap();

        let part = FilePart::read(&path).await.unwrap();
        assert_eq!(part.filename, "Wave.PNG");
        assert_eq!(part.content_type, "image/png");
        assert_eq!(part.bytes, b"\x89PNG");
    }

    #[tokio::test]
    async fn file_part_missing_file_is_io_error() {
        let err = FilePart::read("/nonexistent/sticker.png").await.unwrap_err();
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn debug_hides_url_and_header() {
        let req = HttpRequest::new(
            Method::Get,
            "https://discord.com/api/v10/webhooks/1/secret".to_string(),
            Some("Bot secret".to_string()),
            None,
        );
        let out = format!("{:?}", req);
        assert!(!out.contains("secret"));
        assert!(out.contains("authorized: true"));
    }
}
