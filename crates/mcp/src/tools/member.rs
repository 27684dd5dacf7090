use serde::Deserialize;
use serde_json::{json, Value};

use discordbot_core::{Dispatcher, Fields, JsonBody, Method, Outcome, Query, Requirement, Result, Route};

use super::{parse, tool, unknown, ToolDefinition};

pub const TOOLS: &[&str] = &[
    "discord_list_guild_members",
    "discord_search_guild_members",
    "discord_get_guild_member",
    "discord_update_guild_member",
    "discord_remove_guild_member",
    "discord_ban_user",
    "discord_unban_user",
    "discord_get_guild_ban",
    "discord_list_guild_bans",
];

fn member_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "guild_id": { "type": "string" },
            "user_id": { "type": "string" }
        },
        "required": ["guild_id", "user_id"]
    })
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "discord_list_guild_members",
            "List guild members in user id order (requires the members intent)",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "limit": { "type": "integer", "minimum": 1, "maximum": 1000 },
                    "after": { "type": "string", "description": "Highest user id from the previous page" }
                },
                "required": ["guild_id"]
            }),
        ),
        tool(
            "discord_search_guild_members",
            "Find members whose username or nickname starts with a query",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "query": { "type": "string" },
                    "limit": { "type": "integer", "minimum": 1, "maximum": 1000, "default": 1 }
                },
                "required": ["guild_id", "query"]
            }),
        ),
        tool("discord_get_guild_member", "Get a guild member", member_schema()),
        tool(
            "discord_update_guild_member",
            "Modify a member's nickname, roles, voice state or timeout",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "user_id": { "type": "string" },
                    "fields": { "type": "object", "description": "Member fields to change" }
                },
                "required": ["guild_id", "user_id", "fields"]
            }),
        ),
        tool("discord_remove_guild_member", "Kick a member from a guild", member_schema()),
        tool(
            "discord_ban_user",
            "Ban a user, optionally deleting their recent messages",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "user_id": { "type": "string" },
                    "delete_message_seconds": { "type": "integer", "minimum": 0, "maximum": 604800 },
                    "delete_message_days": {
                        "type": "integer",
                        "minimum": 0,
                        "maximum": 7,
                        "description": "Deprecated; ignored when delete_message_seconds is given"
                    }
                },
                "required": ["guild_id", "user_id"]
            }),
        ),
        tool("discord_unban_user", "Lift a guild ban", member_schema()),
        tool("discord_get_guild_ban", "Get the ban record of a user", member_schema()),
        tool(
            "discord_list_guild_bans",
            "List guild bans",
            json!({
                "type": "object",
                "properties": {
                    "guild_id": { "type": "string" },
                    "limit": { "type": "integer", "minimum": 1, "maximum": 1000 },
                    "before": { "type": "string" },
                    "after": { "type": "string" }
                },
                "required": ["guild_id"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct ListArgs {
    guild_id: String,
    limit: Option<u32>,
    after: Option<String>,
}

fn default_search_limit() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    guild_id: String,
    query: String,
    #[serde(default = "default_search_limit")]
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct MemberArgs {
    guild_id: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    guild_id: String,
    user_id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct BanArgs {
    guild_id: String,
    user_id: String,
    delete_message_seconds: Option<u32>,
    delete_message_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ListBansArgs {
    guild_id: String,
    limit: Option<u32>,
    before: Option<String>,
    after: Option<String>,
}

fn members(guild_id: &str) -> Route {
    Route::new("guilds").param(guild_id).segment("members")
}

fn bans(guild_id: &str) -> Route {
    Route::new("guilds").param(guild_id).segment("bans")
}

/// Only one of the two retention fields is sent; seconds takes precedence.
fn ban_body(seconds: Option<u32>, days: Option<u32>) -> JsonBody {
    match (seconds, days) {
        (Some(s), _) => JsonBody::new().set("delete_message_seconds", s),
        (None, Some(d)) => JsonBody::new().set("delete_message_days", d),
        (None, None) => JsonBody::new(),
    }
}

pub async fn call(d: &Dispatcher, name: &str, arguments: Value) -> Result<Outcome> {
    match name {
        "discord_list_guild_members" => {
            let args: ListArgs = parse(arguments)?;
            let query = Query::new()
                .push("limit", args.limit)
                .push("after", args.after);
            let path = query.append_to(members(&args.guild_id).as_str());
            d.send(Method::Get, &path, None).await
        }
        "discord_search_guild_members" => {
            let args: SearchArgs = parse(arguments)?;
            let query = Query::new()
                .push("query", Some(args.query))
                .push("limit", Some(args.limit));
            let path = query.append_to(members(&args.guild_id).segment("search").as_str());
            d.send(Method::Get, &path, None).await
        }
        "discord_get_guild_member" => {
            let args: MemberArgs = parse(arguments)?;
            let route = members(&args.guild_id).param(&args.user_id);
            d.send(Method::Get, route.as_str(), None).await
        }
        "discord_update_guild_member" => {
            let args: UpdateArgs = parse(arguments)?;
            let body = JsonBody::from_fields(args.fields).require(Requirement::NonEmpty)?;
            let route = members(&args.guild_id).param(&args.user_id);
            d.send(Method::Patch, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_remove_guild_member" => {
            let args: MemberArgs = parse(arguments)?;
            let route = members(&args.guild_id).param(&args.user_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        "discord_ban_user" => {
            let args: BanArgs = parse(arguments)?;
            let body = ban_body(args.delete_message_seconds, args.delete_message_days);
            let route = bans(&args.guild_id).param(&args.user_id);
            d.send(Method::Put, route.as_str(), Some(body.into_value()))
                .await
        }
        "discord_unban_user" => {
            let args: MemberArgs = parse(arguments)?;
            let route = bans(&args.guild_id).param(&args.user_id);
            d.send(Method::Delete, route.as_str(), None).await
        }
        "discord_get_guild_ban" => {
            let args: MemberArgs = parse(arguments)?;
            let route = bans(&args.guild_id).param(&args.user_id);
            d.send(Method::Get, route.as_str(), None).await
        }
        "discord_list_guild_bans" => {
            let args: ListBansArgs = parse(arguments)?;
            let query = Query::new()
                .push("limit", args.limit)
                .push("before", args.before)
                .push("after", args.after);
            let path = query.append_to(bans(&args.guild_id).as_str());
            d.send(Method::Get, &path, None).await
        }
        _ => Err(unknown("member", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ban_seconds_win_over_days() {
        let body = ban_body(Some(3600), Some(2)).into_value();
        assert_eq!(body, json!({ "delete_message_seconds": 3600 }));
    }

    #[test]
    fn ban_days_used_alone() {
        assert_eq!(
            ban_body(None, Some(2)).into_value(),
            json!({ "delete_message_days": 2 })
        );
        assert_eq!(ban_body(None, None).into_value(), json!({}));
    }
}
