use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{Dispatcher, JsonBody, Method, Outcome, Requirement, Result, Route};

use super::{parse, tool, unknown, ChannelArgs, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_follow_channel",
    "discord_trigger_typing_indicator",
    "discord_crosspost_message",
    "discord_list_voice_regions",
    "discord_create_dm",
    "discord_add_group_dm_recipient",
    "discord_remove_group_dm_recipient",
];

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_follow_channel",
            "Follow an announcement channel into a target channel",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string", "description": "Announcement channel to follow" },
                    "webhook_channel_id": { "type": "string", "description": "Channel that receives crossposts" }
                },
                "required": ["channel_id", "webhook_channel_id"]
            }),
        ),
        tool(
            "discord_trigger_typing_indicator",
            "Show the typing indicator in a channel",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string" }
                },
                "required": ["channel_id"]
            }),
        ),
        tool(
            "discord_crosspost_message",
            "Publish a message from an announcement channel to its followers",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string" },
                    "message_id": { "type": "string" }
                },
                "required": ["channel_id", "message_id"]
            }),
        ),
        tool(
            "discord_list_voice_regions",
            "List voice regions usable when creating servers",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        tool(
            "discord_create_dm",
            "Open a DM with a user, or a group DM from OAuth2 access tokens",
            json!({
                "type": "object",
                "properties": {
                    "recipient_id": { "type": "string" },
                    "access_tokens": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "nicks": {
                        "type": "object",
                        "description": "Map of user id to nickname for a group DM"
                    }
                }
            }),
        ),
        tool(
            "discord_add_group_dm_recipient",
            "Add a user to a group DM",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string" },
                    "user_id": { "type": "string" },
                    "access_token": { "type": "string", "description": "OAuth2 token with gdm.join" },
                    "nick": { "type": "string" }
                },
                "required": ["channel_id", "user_id", "access_token"]
            }),
        ),
        tool(
            "discord_remove_group_dm_recipient",
            "Remove a user from a group DM",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string" },
                    "user_id": { "type": "string" }
                },
                "required": ["channel_id", "user_id"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct FollowArgs {
    channel_id: String,
    webhook_channel_id: String,
}

#[derive(Debug, Deserialize)]
struct CrosspostArgs {
    channel_id: String,
    message_id: String,
}

#[derive(Debug, Deserialize)]
struct CreateDmArgs {
    recipient_id: Option<String>,
    access_tokens: Option<Vec<String>>,
    nicks: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RecipientArgs {
    channel_id: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct AddRecipientArgs {
    channel_id: String,
    user_id: String,
    access_token: String,
    nick: Option<String>,
}

fn channel(channel_id: &str) -> Route {
    Route::new("channels").param(channel_id)
}

fn recipient(channel_id: &str, user_id: &str) -> Route {
    channel(channel_id).segment("recipients").param(user_id)
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_follow_channel" => {
            let args: FollowArgs = parse(arguments)?;
            let route = channel(&args.channel_id).segment("followers");
            let body = JsonBody::new().set("webhook_channel_id", args.webhook_channel_id);
            d.send(Method::Post, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_trigger_typing_indicator" => {
            let args: ChannelArgs = parse(arguments)?;
            let route = channel(&args.channel_id).segment("typing");
            d.send(Method::Post, route.as_str(), None).await
        }
        "discord_crosspost_message" => {
            let args: CrosspostArgs = parse(arguments)?;
            let route = channel(&args.channel_id)
                .segment("messages")
                .param(&args.message_id)
                .segment("crosspost");
            d.send(Method::Post, route.as_str(), None).await
        }
        "discord_list_voice_regions" => d.send(Method::Get, "/voice/regions", None).await,
        "discord_create_dm" => {
            let args: CreateDmArgs = parse(arguments)?;
            let body = JsonBody::new()
                .opt("recipient_id", args.recipient_id)
                .opt("access_tokens", args.access_tokens)
                .opt("nicks", args.nicks)
                .require(Requirement::AnyOf(&["recipient_id", "access_tokens"]))?;
            let route = Route::new("users").segment("@me").segment("channels");
            d.send(Method::Post, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_add_group_dm_recipient" => {
            let args: AddRecipientArgs = parse(arguments)?;
            let body = JsonBody::new()
                .set("access_token", args.access_token)
                .opt("nick", args.nick);
            let route = recipient(&args.channel_id, &args.user_id);
            d.send(Method::Put, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_remove_group_dm_recipient" => {
            let args: RecipientArgs = parse(arguments)?;
            let route = recipient(&args.channel_id, &args.user_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        _ => Err(unknown("channel", name)),
    }
}
