use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{Dispatcher, Fields, JsonBody, Method, Outcome, Requirement, Result, Route};

use super::{parse, tool, unknown, GuildArgs, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_list_guild_roles",
    "discord_create_guild_role",
    "discord_update_guild_role",
    "discord_delete_guild_role",
];

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_list_guild_roles",
            "List the roles of a guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" }
                },
                "required": ["guild_id"]
            }),
        ),
        tool(
            "discord_create_guild_role",
            "Create a role; every field is optional",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "fields": {
                        "type": "object",
                        "description": "name, permissions, color, hoist, icon, unicode_emoji, mentionable"
                    }
                },
                "required": ["guild_id"]
            }),
        ),
        tool(
            "discord_update_guild_role",
            "Modify a role",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "role_id": { "type": "string" },
                    "fields": { "type": "object" }
                },
                "required": ["guild_id", "role_id", "fields"]
            }),
        ),
        tool(
            "discord_delete_guild_role",
            "Delete a role",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "role_id": { "type": "string" }
                },
                "required": ["guild_id", "role_id"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    guild_id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct RoleArgs {
    guild_id: String,
    role_id: String,
    #[serde(default)]
    fields: Fields,
}

fn roles(guild_id: &str) -> Route {
    Route::new("guilds").param(guild_id).segment("roles")
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_list_guild_roles" => {
            let args: GuildArgs = parse(arguments)?;
            d.send(Method::Get, roles(&args.guild_id).as_str(), None).await
        }
        "discord_create_guild_role" => {
            let args: CreateArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields).require(Requirement::Any)?;
            d.send(Method::Post, roles(&args.guild_id).as_str(), Some(body.into_value()))
                .await
        }
        "discord_update_guild_role" => {
            let args: RoleArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields).require(Requirement::NonEmpty)?;
            let route = roles(&args.guild_id).param(&args.role_id);
            d.send(Method::Patch, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_delete_guild_role" => {
            let args: RoleArgs = parse(arguments)?;
            let route = roles(&args.guild_id).param(&args.role_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        _ => Err(unknown("role", name)),
    }
}
