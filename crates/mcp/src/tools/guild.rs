use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{
    Dispatcher, Field, Fields, JsonBody, Method, Outcome, Query, Requirement, Result, Route,
};

use super::{parse, tool, unknown, GuildArgs, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_create_guild",
    "discord_get_guild",
    "discord_update_guild",
    "discord_delete_guild",
    "discord_list_guild_channels",
    "discord_get_guild_preview",
    "discord_leave_guild",
    "discord_prune_guild",
    "discord_preview_prune_guild",
    "discord_list_guild_voice_regions",
    "discord_list_guild_integrations",
    "discord_delete_guild_integration",
    "discord_get_guild_widget",
    "discord_get_guild_widget_settings",
    "discord_update_guild_widget_settings",
    "discord_get_guild_welcome_screen",
    "discord_update_guild_welcome_screen",
    "discord_get_guild_vanity_url",
    "discord_get_guild_onboarding",
    "discord_put_guild_onboarding",
];

fn guild_only(name: &str, description: &str) -> ToolDefinition {
    tool(
        name,
        description,
        json!({
            "type": "object",
            "properties": {
                "guild_id": { "type": "string" }
            },
            "required": ["guild_id"]
        }),
    )
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_create_guild",
            "Create a guild owned by the bot (bots in fewer than 10 guilds only)",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "fields": {
                        "type": "object",
                        "description": "Extra guild fields such as icon, roles or channels"
                    }
                },
                "required": ["name"]
            }),
        ),
        tool(
            "discord_get_guild",
            "Get a guild, optionally with approximate member and presence counts",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "with_counts": { "type": "boolean" }
                },
                "required": ["guild_id"]
            }),
        ),
        tool(
            "discord_update_guild",
            "Modify guild settings",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "fields": { "type": "object", "description": "Guild fields to change" }
                },
                "required": ["guild_id", "fields"]
            }),
        ),
        guild_only("discord_delete_guild", "Delete a guild the bot owns"),
        guild_only("discord_list_guild_channels", "List the channels of a guild"),
        guild_only("discord_get_guild_preview", "Get the public preview of a guild"),
        guild_only("discord_leave_guild", "Make the bot leave a guild"),
        tool(
            "discord_prune_guild",
            "Kick members inactive for a number of days",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "days": { "type": "integer", "minimum": 1, "maximum": 30 },
                    "compute_prune_count": { "type": "boolean" },
                    "include_roles": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                },
                "required": ["guild_id"]
            }),
        ),
        tool(
            "discord_preview_prune_guild",
            "Count the members a prune would remove",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "days": { "type": "integer", "minimum": 1, "maximum": 30 },
                    "include_roles": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                },
                "required": ["guild_id"]
            }),
        ),
        guild_only("discord_list_guild_voice_regions", "List voice regions for a guild"),
        guild_only("discord_list_guild_integrations", "List the integrations of a guild"),
        tool(
            "discord_delete_guild_integration",
            "Remove an integration from a guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "integration_id": { "type": "string" }
                },
                "required": ["guild_id", "integration_id"]
            }),
        ),
        guild_only("discord_get_guild_widget", "Get the public widget of a guild"),
        guild_only("discord_get_guild_widget_settings", "Get the widget settings of a guild"),
        tool(
            "discord_update_guild_widget_settings",
            "Enable or disable the guild widget and set its invite channel",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "enabled": { "type": "boolean" },
                    "channel_id": { "type": ["string", "null"] }
                },
                "required": ["guild_id"]
            }),
        ),
        guild_only("discord_get_guild_welcome_screen", "Get the welcome screen of a guild"),
        tool(
            "discord_update_guild_welcome_screen",
            "Modify the welcome screen of a community guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "enabled": { "type": ["boolean", "null"] },
                    "welcome_channels": { "type": ["array", "null"], "items": { "type": "object" } },
                    "description": { "type": ["string", "null"] }
                },
                "required": ["guild_id"]
            }),
        ),
        guild_only("discord_get_guild_vanity_url", "Get the vanity invite of a guild"),
        guild_only("discord_get_guild_onboarding", "Get the onboarding flow of a guild"),
        tool(
            "discord_put_guild_onboarding",
            "Replace the onboarding flow of a guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "prompts": { "type": "array", "items": { "type": "object" } },
                    "default_channel_ids": { "type": "array", "items": { "type": "string" } },
                    "enabled": { "type": "boolean" },
                    "mode": { "type": "integer", "description": "0 = default, 1 = advanced" }
                },
                "required": ["guild_id", "prompts", "default_channel_ids", "enabled"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    name: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct GetArgs {
    guild_id: String,
    with_counts: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    guild_id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct PruneArgs {
    guild_id: String,
    days: Option<u32>,
    compute_prune_count: Option<bool>,
    include_roles: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct IntegrationArgs {
    guild_id: String,
    integration_id: String,
}

#[derive(Debug, Deserialize)]
struct WidgetArgs {
    guild_id: String,
    #[serde(default)]
    enabled: Field<bool>,
    #[serde(default)]
    channel_id: Field<String>,
}

#[derive(Debug, Deserialize)]
struct WelcomeArgs {
    guild_id: String,
    #[serde(default)]
    enabled: Field<bool>,
    #[serde(default)]
    welcome_channels: Field<Vec<Value>>,
    #[serde(default)]
    description: Field<String>,
}

#[derive(Debug, Deserialize)]
struct OnboardingArgs {
    guild_id: String,
    prompts: Vec<Value>,
    default_channel_ids: Vec<String>,
    enabled: bool,
    #[serde(default)]
    mode: u8,
}

fn guild(guild_id: &str) -> Route {
    Route::new("guilds").param(guild_id)
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_create_guild" => {
            let args: CreateArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields)
                .set("name", args.name)
                .require(Requirement::Any)?;
            d.send(Method::Post, "/guilds", Some(body.into_value())).await
        }
        "discord_get_guild" => {
            let args: GetArgs = parse(arguments)?;
            let query = Query::new().push("with_counts", args.with_counts);
            let path = query.append_to(guild(&args.guild_id).as_str());
            d.send(Method::Get, &path, None).await
        }
        "discord_update_guild" => {
            let args: UpdateArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields).require(Requirement::NonEmpty)?;
            d.send(Method::Patch, guild(&args.guild_id).as_str(), Some(body.into_value()))
                .await
        }
        "discord_delete_guild" => {
            let args: GuildArgs = parse(arguments)?;
            d.send(Method::Delete, guild(&args.guild_id).as_str(), None)
                .await
        }
        "discord_list_guild_channels" => get_under(d, arguments, "channels").await,
        "discord_get_guild_preview" => get_under(d, arguments, "preview").await,
        "discord_leave_guild" => {
            let args: GuildArgs = parse(arguments)?;
            let route = Route::new("users")
                .segment("@me")
                .segment("guilds")
                .param(&args.guild_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        "discord_prune_guild" => {
            let args: PruneArgs = parse(arguments)?;
            let body = JsonBody::new()
                .opt("days", args.days)
                .opt("compute_prune_count", args.compute_prune_count)
                .opt("include_roles", args.include_roles);
            let route = guild(&args.guild_id).segment("prune");
            d.send(Method::Post, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_preview_prune_guild" => {
            let args: PruneArgs = parse(arguments)?;
            let query = Query::new()
                .push("days", args.days)
                .repeated("include_roles", args.include_roles.as_deref());
            let path = query.append_to(guild(&args.guild_id).segment("prune").as_str());
            d.send(Method::Get, &path, None).await
        }
        "discord_list_guild_voice_regions" => get_under(d, arguments, "regions").await,
        "discord_list_guild_integrations" => get_under(d, arguments, "integrations").await,
        "discord_delete_guild_integration" => {
            let args: IntegrationArgs = parse(arguments)?;
            let route = guild(&args.guild_id)
                .segment("integrations")
                .param(&args.integration_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        "discord_get_guild_widget" => get_under(d, arguments, "widget.json").await,
        "discord_get_guild_widget_settings" => get_under(d, arguments, "widget").await,
        "discord_update_guild_widget_settings" => {
            let args: WidgetArgs = parse(arguments)?;
            let body = JsonBody::new()
                .field("enabled", args.enabled)
                .field("channel_id", args.channel_id)
                .require(Requirement::AnyOf(&["enabled", "channel_id"]))?;
            let route = guild(&args.guild_id).segment("widget");
            d.send(Method::Patch, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_get_guild_welcome_screen" => get_under(d, arguments, "welcome-screen").await,
        "discord_update_guild_welcome_screen" => {
            let args: WelcomeArgs = parse(arguments)?;
            let body = JsonBody::new()
                .field("enabled", args.enabled)
                .field("welcome_channels", args.welcome_channels)
                .field("description", args.description)
                .require(Requirement::AnyOf(&[
                    "enabled",
                    "welcome_channels",
                    "description",
                ]))?;
            let route = guild(&args.guild_id).segment("welcome-screen");
            d.send(Method::Patch, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_get_guild_vanity_url" => get_under(d, arguments, "vanity-url").await,
        "discord_get_guild_onboarding" => get_under(d, arguments, "onboarding").await,
        "discord_put_guild_onboarding" => {
            let args: OnboardingArgs = parse(arguments)?;
            let body = JsonBody::new()
                .set("prompts", args.prompts)
                .set("default_channel_ids", args.default_channel_ids)
                .set("enabled", args.enabled)
                .set("mode", args.mode);
            let route = guild(&args.guild_id).segment("onboarding");
            d.send(Method::Put, route.as_str(), Some(body.into_value()))
                .await
        }
        _ => Err(unknown("guild", name)),
    }
}

/// GET `/guilds/{guild_id}/{literal}`.
async fn get_under(d: &Dispatcher, arguments: Value, literal: &str) -> Result<Outcome> {
    let args: GuildArgs = parse(arguments)?;
    let route = guild(&args.guild_id).segment(literal);
    d.send(Method::Get, route.as_str(), None).await
}
