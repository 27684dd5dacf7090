pub mod body;
pub mod config;
pub mod credential;
pub mod dispatch;
pub mod error;
pub mod outcome;
pub mod query;
pub mod request;
pub mod route;
#[cfg(test)]
mod testutils;
pub mod transport;

pub use body::{Field, Fields, JsonBody, Requirement};
pub use config::Config;
pub use credential::{BotToken, Webhook, WebhookToken};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use outcome::{classify, classify_lenient, Outcome, Reply};
pub use query::Query;
pub use request::{FilePart, Form, HttpRequest, Method, RequestBody};
pub use route::Route;
pub use transport::{HttpTransport, RawResponse, Transport};
