use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{Dispatcher, Fields, JsonBody, Method, Outcome, Query, Requirement, Result, Route};

use super::{parse, tool, unknown, ChannelArgs, GuildArgs, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_resolve_invite",
    "discord_revoke_invite",
    "discord_create_channel_invite",
    "discord_list_channel_invites",
    "discord_list_guild_invites",
];

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_resolve_invite",
            "Look up an invite by code",
            json!({
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "with_counts": { "type": "boolean" },
                    "guild_scheduled_event_id": { "type": "string" }
                },
                "required": ["code"]
            }),
        ),
        tool(
            "discord_revoke_invite",
            "Delete an invite",
            json!({
                "type": "object",
                "properties": {
                    "code": { "type": "string" }
                },
                "required": ["code"]
            }),
        ),
        tool(
            "discord_create_channel_invite",
            "Create an invite for a channel",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string" },
                    "fields": {
                        "type": "object",
                        "description": "max_age, max_uses, temporary, unique, target_type and related fields"
                    }
                },
                "required": ["channel_id"]
            }),
        ),
        tool(
            "discord_list_channel_invites",
            "List the invites of a channel",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": { "type": "string" }
                },
                "required": ["channel_id"]
            }),
        ),
        tool(
            "discord_list_guild_invites",
            "List the invites of a guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" }
                },
                "required": ["guild_id"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct ResolveArgs {
    code: String,
    with_counts: Option<bool>,
    guild_scheduled_event_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CodeArgs {
    code: String,
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    channel_id: String,
    #[serde(default)]
    fields: Fields,
}

fn channel_invites(channel_id: &str) -> Route {
    Route::new("channels").param(channel_id).segment("invites")
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_resolve_invite" => {
            let args: ResolveArgs = parse(arguments)?;
            let query = Query::new()
                .push("with_counts", args.with_counts)
                .push("guild_scheduled_event_id", args.guild_scheduled_event_id);
            let path = query.append_to(Route::new("invites").param(&args.code).as_str());
            d.send(Method::Get, &path, None).await
        }
        "discord_revoke_invite" => {
            let args: CodeArgs = parse(arguments)?;
            let route = Route::new("invites").param(&args.code);
            d.send(Method::Delete, route.as_str(), None).await
        }
        "discord_create_channel_invite" => {
            let args: CreateArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields).require(Requirement::Any)?;
            d.send(
                Method::Post,
                channel_invites(&args.channel_id).as_str(),
                Some(body.into_value()),
            )
            .await
        }
        "discord_list_channel_invites" => {
            let args: ChannelArgs = parse(arguments)?;
            d.send(Method::Get, channel_invites(&args.channel_id).as_str(), None)
                .await
        }
        "discord_list_guild_invites" => {
            let args: GuildArgs = parse(arguments)?;
            let route = Route::new("guilds").param(&args.guild_id).segment("invites");
            d.send(Method::Get, route.as_str(), None).await
        }
        _ => Err(unknown("invite", name)),
    }
}
