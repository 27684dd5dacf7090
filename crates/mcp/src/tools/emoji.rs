use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{Dispatcher, Field, JsonBody, Method, Outcome, Result, Route};

use super::{parse, tool, unknown, GuildArgs, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_create_guild_emoji",
    "discord_get_guild_emoji",
    "discord_update_guild_emoji",
    "discord_delete_guild_emoji",
    "discord_list_guild_emojis",
];

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_create_guild_emoji",
            "Create a custom emoji in a guild from a base64 image data URI",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "name": { "type": "string", "description": "Emoji name" },
                    "image": { "type": "string", "description": "Data URI of a 128x128 image" },
                    "roles": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Role ids allowed to use the emoji"
                    }
                },
                "required": ["guild_id", "name", "image"]
            }),
        ),
        tool(
            "discord_get_guild_emoji",
            "Get a single guild emoji",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "emoji_id": { "type": "string" }
                },
                "required": ["guild_id", "emoji_id"]
            }),
        ),
        tool(
            "discord_update_guild_emoji",
            "Rename a guild emoji or change the roles allowed to use it",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "emoji_id": { "type": "string" },
                    "name": { "type": "string" },
                    "roles": {
                        "type": ["array", "null"],
                        "items": { "type": "string" }
                    }
                },
                "required": ["guild_id", "emoji_id"]
            }),
        ),
        tool(
            "discord_delete_guild_emoji",
            "Delete a guild emoji",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "emoji_id": { "type": "string" }
                },
                "required": ["guild_id", "emoji_id"]
            }),
        ),
        tool(
            "discord_list_guild_emojis",
            "List the custom emojis of a guild",
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
struct CreateArgs {
    guild_id: String,
    name: String,
    image: String,
    roles: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct EmojiArgs {
    guild_id: String,
    emoji_id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    guild_id: String,
    emoji_id: String,
    #[serde(default)]
    name: Field<String>,
    #[serde(default)]
    roles: Field<Vec<String>>,
}

fn emojis(guild_id: &str) -> Route {
    Route::new("guilds").param(guild_id).segment("emojis")
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_create_guild_emoji" => {
            let args: CreateArgs = parse(arguments)?;
            let body = JsonBody::new()
                .set("name", args.name)
                .set("image", args.image)
                .opt("roles", args.roles);
            d.send(Method::Post, emojis(&args.guild_id).as_str(), Some(body.into_value()))
                .await
        }
        "discord_get_guild_emoji" => {
            let args: EmojiArgs = parse(arguments)?;
            let route = emojis(&args.guild_id).param(&args.emoji_id);
            d.send(Method::Get, route.as_str(), None).await
        }
        "discord_update_guild_emoji" => {
            let args: UpdateArgs = parse(arguments)?;
            let route = emojis(&args.guild_id).param(&args.emoji_id);
            let body = JsonBody::new()
                .field("name", args.name)
                .field("roles", args.roles);
            d.send(Method::Patch, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_delete_guild_emoji" => {
            let args: EmojiArgs = parse(arguments)?;
            let route = emojis(&args.guild_id).param(&args.emoji_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        "discord_list_guild_emojis" => {
            let args: GuildArgs = parse(arguments)?;
            d.send(Method::Get, emojis(&args.guild_id).as_str(), None).await
        }
        _ => Err(unknown("emoji", name)),
    }
}
