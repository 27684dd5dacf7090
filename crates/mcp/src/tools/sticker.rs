use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{Dispatcher, Field, FilePart, Form, JsonBody, Method, Outcome, Result, Route};

use super::{parse, tool, unknown, GuildArgs, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_create_guild_sticker",
    "discord_get_guild_sticker",
    "discord_update_guild_sticker",
    "discord_delete_guild_sticker",
    "discord_list_guild_stickers",
    "discord_list_sticker_packs",
    "discord_get_sticker",
];

fn guild_sticker_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "guild_id": { "type": "string" },
            "sticker_id": { "type": "string" }
        },
        "required": ["guild_id", "sticker_id"]
    })
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_create_guild_sticker",
            "Upload a PNG, APNG, GIF or Lottie JSON file as a guild sticker",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "name": { "type": "string" },
                    "tags": { "type": "string", "description": "Autocomplete emoji name" },
                    "file": { "type": "string", "description": "Local path of the sticker file" },
                    "description": { "type": "string" }
                },
                "required": ["guild_id", "name", "tags", "file"]
            }),
        ),
        tool(
            "discord_get_guild_sticker",
            "Get a single guild sticker",
            guild_sticker_schema(),
        ),
        tool(
            "discord_update_guild_sticker",
            "Change the name, description or tags of a guild sticker",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "sticker_id": { "type": "string" },
                    "name": { "type": "string" },
                    "description": { "type": ["string", "null"] },
                    "tags": { "type": "string" }
                },
                "required": ["guild_id", "sticker_id"]
            }),
        ),
        tool(
            "discord_delete_guild_sticker",
            "Delete a guild sticker",
            guild_sticker_schema(),
        ),
        tool(
            "discord_list_guild_stickers",
            "List the stickers of a guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" }
                },
                "required": ["guild_id"]
            }),
        ),
        tool(
            "discord_list_sticker_packs",
            "List the sticker packs available to Nitro subscribers",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        tool(
            "discord_get_sticker",
            "Get any sticker by id",
            json!({
                "type": "object",
                "properties": {
                    "sticker_id": { "type": "string" }
                },
                "required": ["sticker_id"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    guild_id: String,
    name: String,
    tags: String,
    file: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StickerArgs {
    guild_id: String,
    sticker_id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    guild_id: String,
    sticker_id: String,
    #[serde(default)]
    name: Field<String>,
    #[serde(default)]
    description: Field<String>,
    #[serde(default)]
    tags: Field<String>,
}

#[derive(Debug, Deserialize)]
struct GetStickerArgs {
    sticker_id: String,
}

fn stickers(guild_id: &str) -> Route {
    Route::new("guilds").param(guild_id).segment("stickers")
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_create_guild_sticker" => {
            let args: CreateArgs = parse(arguments)?;
            // An unreadable file fails here, before anything is sent.
            let file = FilePart::read(&args.file).await?;
            let form = Form::new()
                .text("name", args.name)
                .text("tags", args.tags)
                .opt_text("description", args.description)
                .file("file", file);
            d.send_form(Method::Post, stickers(&args.guild_id).as_str(), form)
                .await
        }
        "discord_get_guild_sticker" => {
            let args: StickerArgs = parse(arguments)?;
            let route = stickers(&args.guild_id).param(&args.sticker_id);
            d.send(Method::Get, route.as_str(), None).await
        }
        "discord_update_guild_sticker" => {
            let args: UpdateArgs = parse(arguments)?;
            let route = stickers(&args.guild_id).param(&args.sticker_id);
            let body = JsonBody::new()
                .field("name", args.name)
                .field("description", args.description)
                .field("tags", args.tags);
            d.send(Method::Patch, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_delete_guild_sticker" => {
            let args: StickerArgs = parse(arguments)?;
            let route = stickers(&args.guild_id).param(&args.sticker_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        "discord_list_guild_stickers" => {
            let args: GuildArgs = parse(arguments)?;
            d.send(Method::Get, stickers(&args.guild_id).as_str(), None)
                .await
        }
        "discord_list_sticker_packs" => d.send(Method::Get, "/sticker-packs", None).await,
        "discord_get_sticker" => {
            let args: GetStickerArgs = parse(arguments)?;
            let route = Route::new("stickers").param(&args.sticker_id);
            d.send(Method::Get, route.as_str(), None).await
        }
        _ => Err(unknown("sticker", name)),
    }
}
