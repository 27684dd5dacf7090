use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{Dispatcher, Fields, JsonBody, Method, Outcome, Query, Requirement, Result, Route};

use super::{parse, tool, unknown, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_list_guild_scheduled_events",
    "discord_get_guild_scheduled_event",
    "discord_create_guild_scheduled_event",
    "discord_update_guild_scheduled_event",
    "discord_delete_guild_scheduled_event",
    "discord_list_guild_scheduled_event_users",
];

const CREATE_REQUIRES: Requirement = Requirement::AllOf(&[
    "name",
    "privacy_level",
    "scheduled_start_time",
    "entity_type",
]);

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_list_guild_scheduled_events",
            "List the scheduled events of a guild",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "with_user_count": { "type": "boolean" }
                },
                "required": ["guild_id"]
            }),
        ),
        tool(
            "discord_get_guild_scheduled_event",
            "Get a scheduled event",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "event_id": { "type": "string" },
                    "with_user_count": { "type": "boolean" }
                },
                "required": ["guild_id", "event_id"]
            }),
        ),
        tool(
            "discord_create_guild_scheduled_event",
            "Create a scheduled event",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "fields": {
                        "type": "object",
                        "description": "Must include name, privacy_level, scheduled_start_time and entity_type"
                    }
                },
                "required": ["guild_id", "fields"]
            }),
        ),
        tool(
            "discord_update_guild_scheduled_event",
            "Modify a scheduled event, including its status",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "event_id": { "type": "string" },
                    "fields": { "type": "object" }
                },
                "required": ["guild_id", "event_id", "fields"]
            }),
        ),
        tool(
            "discord_delete_guild_scheduled_event",
            "Delete a scheduled event",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "event_id": { "type": "string" }
                },
                "required": ["guild_id", "event_id"]
            }),
        ),
        tool(
            "discord_list_guild_scheduled_event_users",
            "List users subscribed to a scheduled event",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "event_id": { "type": "string" },
                    "limit": { "type": "integer", "minimum": 1, "maximum": 100 },
                    "before": { "type": "string" },
                    "after": { "type": "string" },
                    "with_member": { "type": "boolean" }
                },
                "required": ["guild_id", "event_id"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct ListArgs {
    guild_id: String,
    with_user_count: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct GetArgs {
    guild_id: String,
    event_id: String,
    with_user_count: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    guild_id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct EventArgs {
    guild_id: String,
    event_id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct UsersArgs {
    guild_id: String,
    event_id: String,
    limit: Option<u32>,
    before: Option<String>,
    after: Option<String>,
    with_member: Option<bool>,
}

fn events(guild_id: &str) -> Route {
    Route::new("guilds").param(guild_id).segment("scheduled-events")
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_list_guild_scheduled_events" => {
            let args: ListArgs = parse(arguments)?;
            let query = Query::new().push("with_user_count", args.with_user_count);
            let path = query.append_to(events(&args.guild_id).as_str());
            d.send(Method::Get, &path, None).await
        }
        "discord_get_guild_scheduled_event" => {
            let args: GetArgs = parse(arguments)?;
            let query = Query::new().push("with_user_count", args.with_user_count);
            let path = query.append_to(events(&args.guild_id).param(&args.event_id).as_str());
            d.send(Method::Get, &path, None).await
        }
        "discord_create_guild_scheduled_event" => {
            let args: CreateArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields).require(CREATE_REQUIRES)?;
            d.send(Method::Post, events(&args.guild_id).as_str(), Some(body.into_value()))
                .await
        }
        "discord_update_guild_scheduled_event" => {
            let args: EventArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields).require(Requirement::NonEmpty)?;
            let route = events(&args.guild_id).param(&args.event_id);
            d.send(Method::Patch, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_delete_guild_scheduled_event" => {
            let args: EventArgs = parse(arguments)?;
            let route = events(&args.guild_id).param(&args.event_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        "discord_list_guild_scheduled_event_users" => {
            let args: UsersArgs = parse(arguments)?;
            let query = Query::new()
                .push("limit", args.limit)
                .push("before", args.before)
                .push("after", args.after)
                .push("with_member", args.with_member);
            let route = events(&args.guild_id).param(&args.event_id).segment("users");
            d.send(Method::Get, &query.append_to(route.as_str()), None)
                .await
        }
        _ => Err(unknown("scheduled event", name)),
    }
}
