use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{Dispatcher, Field, JsonBody, Method, Outcome, Requirement, Result, Route};

use super::{parse, tool, unknown, GuildArgs, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_get_guild_template",
    "discord_create_guild_from_template",
    "discord_list_guild_templates",
    "discord_create_guild_template",
    "discord_sync_guild_template",
    "discord_update_guild_template",
    "discord_delete_guild_template",
];

fn guild_template_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "guild_id": { "type": "string" },
            "code": { "type": "string" }
        },
        "required": ["guild_id", "code"]
    })
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_get_guild_template",
            "Resolve a guild template by code",
            json!({
                "type": "object",
                "properties": {
                    "code": { "type": "string" }
                },
                "required": ["code"]
            }),
        ),
        tool(
            "discord_create_guild_from_template",
            "Create a new guild from a template",
            json!({
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "name": { "type": "string" },
                    "icon": { "type": "string", "description": "Data URI of the guild icon" }
                },
                "required": ["code", "name"]
            }),
        ),
        tool(
            "discord_list_guild_templates",
            "List the templates of a guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" }
                },
                "required": ["guild_id"]
            }),
        ),
        tool(
            "discord_create_guild_template",
            "Snapshot a guild into a new template",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "name": { "type": "string" },
                    "description": { "type": "string" }
                },
                "required": ["guild_id", "name"]
            }),
        ),
        tool(
            "discord_sync_guild_template",
            "Sync a template with the current state of its guild",
            guild_template_schema(),
        ),
        tool(
            "discord_update_guild_template",
            "Change a template's name or description",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "code": { "type": "string" },
                    "name": { "type": "string" },
                    "description": { "type": ["string", "null"] }
                },
                "required": ["guild_id", "code"]
            }),
        ),
        tool(
            "discord_delete_guild_template",
            "Delete a guild template",
            guild_template_schema(),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct CodeArgs {
    code: String,
}

#[derive(Debug, Deserialize)]
struct FromTemplateArgs {
    code: String,
    name: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    guild_id: String,
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TemplateArgs {
    guild_id: String,
    code: String,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    guild_id: String,
    code: String,
    #[serde(default)]
    name: Field<String>,
    #[serde(default)]
    description: Field<String>,
}

fn by_code(code: &str) -> Route {
    Route::new("guilds").segment("templates").param(code)
}

fn templates(guild_id: &str) -> Route {
    Route::new("guilds").param(guild_id).segment("templates")
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_get_guild_template" => {
            let args: CodeArgs = parse(arguments)?;
            d.send(Method::Get, by_code(&args.code).as_str(), None).await
        }
        "discord_create_guild_from_template" => {
            let args: FromTemplateArgs = parse(arguments)?;
            let body = JsonBody::new().set("name", args.name).opt("icon", args.icon);
            d.send(Method::Post, by_code(&args.code).as_str(), Some(body.into_value()))
                .await
        }
        "discord_list_guild_templates" => {
            let args: GuildArgs = parse(arguments)?;
            d.send(Method::Get, templates(&args.guild_id).as_str(), None)
                .await
        }
        "discord_create_guild_template" => {
            let args: CreateArgs = parse(arguments)?;
            let body = JsonBody::new()
                .set("name", args.name)
                .opt("description", args.description);
            d.send(
                Method::Post,
                templates(&args.guild_id).as_str(),
                Some(body.into_value()),
            )
            .await
        }
        "discord_sync_guild_template" => {
            let args: TemplateArgs = parse(arguments)?;
            let route = templates(&args.guild_id).param(&args.code);
            d.send(Method::Put, route.as_str(), None).await
        }
        "discord_update_guild_template" => {
            let args: UpdateArgs = parse(arguments)?;
            let body = JsonBody::new()
                .field("name", args.name)
                .field("description", args.description)
                .require(Requirement::AnyOf(&["name", "description"]))?;
            let route = templates(&args.guild_id).param(&args.code);
            d.send(Method::Patch, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_delete_guild_template" => {
            let args: TemplateArgs = parse(arguments)?;
            let route = templates(&args.guild_id).param(&args.code);
            d.send(Method::Delete, route.as_str(), None).await
        }
        _ => Err(unknown("template", name)),
    }
}
