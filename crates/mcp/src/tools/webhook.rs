//! Webhook tools.
//!
//! The first group manages webhooks with the bot credential. Everything
//! taking a `webhook_token` goes through [`Dispatcher::send_webhook`] instead,
//! so those requests authenticate by path alone and never carry the bot header.

use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{
    Dispatcher, Error, Field, Fields, JsonBody, Method, Outcome, Query, Requirement, Result,
    Route, Webhook,
};

use super::{parse, tool, unknown, ChannelArgs, GuildArgs, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_create_webhook",
    "discord_list_channel_webhooks",
    "discord_list_guild_webhooks",
    "discord_get_webhook",
    "discord_update_webhook",
    "discord_delete_webhook",
    "discord_get_webhook_with_token",
    "discord_update_webhook_with_token",
    "discord_delete_webhook_with_token",
    "discord_execute_webhook",
    "discord_execute_slack_compatible_webhook",
    "discord_execute_github_compatible_webhook",
    "discord_get_webhook_message",
    "discord_update_webhook_message",
    "discord_delete_webhook_message",
    "discord_get_original_webhook_message",
    "discord_update_original_webhook_message",
    "discord_delete_original_webhook_message",
];

const MESSAGE_CONTENT: Requirement =
    Requirement::AnyOf(&["content", "embeds", "components", "files", "poll"]);

/// Properties shared by every token-authenticated tool, plus `extra`.
fn token_schema(extra: Value, required: &[&str]) -> Value {
    let mut properties = json!({
        "webhook_id": { "type": "string" },
        "webhook_token": { "type": "string" }
    });
    if let (Some(props), Value::Object(more)) = (properties.as_object_mut(), extra) {
        props.extend(more);
    }

    let mut all_required = vec!["webhook_id", "webhook_token"];
    all_required.extend_from_slice(required);

    json!({
        "type": "object",
        "properties": properties,
        "required": all_required
    })
}

fn execute_schema(fields_description: &str) -> Value {
    token_schema(
        json!({
            "wait": { "type": "boolean", "description": "Wait for the server to confirm and return the message" },
            "thread_id": { "type": "string", "description": "Post into this thread of the webhook's channel" },
            "fields": { "type": "object", "description": fields_description }
        }),
        &["fields"],
    )
}

fn message_schema(with_id: bool, with_fields: bool) -> Value {
    let mut extra = json!({
        "thread_id": { "type": "string" }
    });
    let mut required = Vec::new();
    if with_id {
        extra["message_id"] = json!({ "type": "string" });
        required.push("message_id");
    }
    if with_fields {
        extra["fields"] = json!({ "type": "object", "description": "Message fields to change" });
        required.push("fields");
    }
    token_schema(extra, &required)
}

fn webhook_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "webhook_id": { "type": "string" }
        },
        "required": ["webhook_id"]
    })
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_create_webhook",
            "Create a webhook in a channel",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string" },
                    "name": { "type": "string" },
                    "avatar": { "type": "string", "description": "Data URI of the avatar image" }
                },
                "required": ["channel_id", "name"]
            }),
        ),
        tool(
            "discord_list_channel_webhooks",
            "List the webhooks of a channel",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string" }
                },
                "required": ["channel_id"]
            }),
        ),
        tool(
            "discord_list_guild_webhooks",
            "List the webhooks of a guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" }
                },
                "required": ["guild_id"]
            }),
        ),
        tool("discord_get_webhook", "Get a webhook", webhook_id_schema()),
        tool(
            "discord_update_webhook",
            "Modify a webhook's name, avatar or channel",
            json!({
                "type": "object",
                "properties": {
                    "webhook_id": { "type": "string" },
                    "fields": { "type": "object" }
                },
                "required": ["webhook_id", "fields"]
            }),
        ),
        tool("discord_delete_webhook", "Delete a webhook", webhook_id_schema()),
        tool(
            "discord_get_webhook_with_token",
            "Get a webhook using its token",
            token_schema(json!({}), &[]),
        ),
        tool(
            "discord_update_webhook_with_token",
            "Change a webhook's name or avatar using its token",
            token_schema(
                json!({
                    "name": { "type": "string" },
                    "avatar": { "type": ["string", "null"] }
                }),
                &[],
            ),
        ),
        tool(
            "discord_delete_webhook_with_token",
            "Delete a webhook using its token",
            token_schema(json!({}), &[]),
        ),
        tool(
            "discord_execute_webhook",
            "Post a message through a webhook",
            execute_schema("Message payload; needs content, embeds, components, files or poll"),
        ),
        tool(
            "discord_execute_slack_compatible_webhook",
            "Post a Slack-formatted payload through a webhook",
            execute_schema("Slack webhook payload"),
        ),
        tool(
            "discord_execute_github_compatible_webhook",
            "Post a GitHub event payload through a webhook",
            execute_schema("GitHub webhook event payload"),
        ),
        tool(
            "discord_get_webhook_message",
            "Get a message previously sent by a webhook",
            message_schema(true, false),
        ),
        tool(
            "discord_update_webhook_message",
            "Edit a message previously sent by a webhook",
            message_schema(true, true),
        ),
        tool(
            "discord_delete_webhook_message",
            "Delete a message previously sent by a webhook",
            message_schema(true, false),
        ),
        tool(
            "discord_get_original_webhook_message",
            "Get the original response to an interaction",
            message_schema(false, false),
        ),
        tool(
            "discord_update_original_webhook_message",
            "Edit the original response to an interaction",
            message_schema(false, true),
        ),
        tool(
            "discord_delete_original_webhook_message",
            "Delete the original response to an interaction",
            message_schema(false, false),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    channel_id: String,
    name: String,
    avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WebhookIdArgs {
    webhook_id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct TokenArgs {
    webhook_id: String,
    webhook_token: String,
}

impl TokenArgs {
    fn webhook(self) -> Webhook {
        Webhook::new(self.webhook_id, self.webhook_token)
    }
}

#[derive(Debug, Deserialize)]
struct UpdateWithTokenArgs {
    #[serde(flatten)]
    hook: TokenArgs,
    #[serde(default)]
    name: Field<String>,
    #[serde(default)]
    avatar: Field<String>,
}

#[derive(Debug, Deserialize)]
struct ExecuteArgs {
    #[serde(flatten)]
    hook: TokenArgs,
    wait: Option<bool>,
    thread_id: Option<String>,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct MessageArgs {
    #[serde(flatten)]
    hook: TokenArgs,
    message_id: Option<String>,
    thread_id: Option<String>,
    #[serde(default)]
    fields: Fields,
}

fn by_id(webhook_id: &str) -> Route {
    Route::new("webhooks").param(webhook_id)
}

fn execute_query(wait: Option<bool>, thread_id: Option<String>) -> Query {
    Query::new().push("wait", wait).push("thread_id", thread_id)
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_create_webhook" => {
            let args: CreateArgs = parse(arguments)?;
            let body = JsonBody::new().set("name", args.name).opt("avatar", args.avatar);
            let route = Route::new("channels").param(&args.channel_id).segment("webhooks");
            d.send(Method::Post, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_list_channel_webhooks" => {
            let args: ChannelArgs = parse(arguments)?;
            let route = Route::new("channels").param(&args.channel_id).segment("webhooks");
            d.send(Method::Get, route.as_str(), None).await
        }
        "discord_list_guild_webhooks" => {
            let args: GuildArgs = parse(arguments)?;
            let route = Route::new("guilds").param(&args.guild_id).segment("webhooks");
            d.send(Method::Get, route.as_str(), None).await
        }
        "discord_get_webhook" => {
            let args: WebhookIdArgs = parse(arguments)?;
            d.send(Method::Get, by_id(&args.webhook_id).as_str(), None)
                .await
        }
        "discord_update_webhook" => {
            let args: WebhookIdArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields).require(Requirement::NonEmpty)?;
            d.send(
                Method::Patch,
                by_id(&args.webhook_id).as_str(),
                Some(body.into_value()),
            )
            .await
        }
        "discord_delete_webhook" => {
            let args: WebhookIdArgs = parse(arguments)?;
            d.send(Method::Delete, by_id(&args.webhook_id).as_str(), None)
                .await
        }
        "discord_get_webhook_with_token" | "discord_delete_webhook_with_token" => {
            let args: TokenArgs = parse(arguments)?;
            let method = if name == "discord_get_webhook_with_token" {
                Method::Get
            } else {
                Method::Delete
            };
            d.send_webhook(method, &args.webhook(), Route::tail(), &Query::new(), None)
                .await
        }
        "discord_update_webhook_with_token" => {
            let args: UpdateWithTokenArgs = parse(arguments)?;
            let body = JsonBody::new()
                .field("name", args.name)
                .field("avatar", args.avatar)
                .require(Requirement::AnyOf(&["name", "avatar"]))?;
            d.send_webhook(
                Method::Patch,
                &args.hook.webhook(),
                Route::tail(),
                &Query::new(),
                Some(body.into_value()),
            )
            .await
        }
        "discord_execute_webhook"
        | "discord_execute_slack_compatible_webhook"
        | "discord_execute_github_compatible_webhook" => {
            let args: ExecuteArgs = parse(arguments)?;
            let (tail, requirement) = match name {
                "discord_execute_slack_compatible_webhook" => {
                    (Route::tail().segment("slack"), Requirement::NonEmpty)
                }
                "discord_execute_github_compatible_webhook" => {
                    (Route::tail().segment("github"), Requirement::Any)
                }
                _ => (Route::tail(), MESSAGE_CONTENT),
            };
            let body = JsonBody::from_fields(args.fields).require(requirement)?;
            let query = execute_query(args.wait, args.thread_id);
            d.send_webhook(
                Method::Post,
                &args.hook.webhook(),
                tail,
                &query,
                Some(body.into_value()),
            )
            .await
        }
        "discord_get_webhook_message"
        | "discord_update_webhook_message"
        | "discord_delete_webhook_message"
        | "discord_get_original_webhook_message"
        | "discord_update_original_webhook_message"
        | "discord_delete_original_webhook_message" => message(d, name, arguments).await,
        _ => Err(unknown("webhook", name)),
    }
}

/// Message tools address either `messages/{message_id}` or `messages/@original`.
async fn message(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    let args: MessageArgs = parse(arguments)?;
    let original = name.contains("_original_");

    let tail = if original {
        Route::tail().segment("messages").segment("@original")
    } else {
        let message_id = args
            .message_id
            .as_deref()
            .ok_or_else(|| Error::InvalidArguments("missing field `message_id`".to_string()))?;
        Route::tail().segment("messages").param(message_id)
    };
    let query = Query::new().push("thread_id", args.thread_id);
    let hook = args.hook.webhook();

    if name.starts_with("discord_update_") {
        let body = JsonBody::from_fields(args.fields).require(Requirement::NonEmpty)?;
        d.send_webhook(Method::Patch, &hook, tail, &query, Some(body.into_value()))
            .await
    } else if name.starts_with("discord_delete_") {
        d.send_webhook(Method::Delete, &hook, tail, &query, None).await
    } else {
        d.send_webhook(Method::Get, &hook, tail, &query, None).await
    }
}
