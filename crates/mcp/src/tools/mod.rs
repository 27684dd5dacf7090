mod channel;
mod emoji;
mod event;
mod guild;
mod invite;
mod member;
mod role;
mod sticker;
mod template;
mod webhook;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use discordbot_core::{Dispatcher, Error, Outcome, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub fn list_tools() -> Vec<ToolDefinition> {
    let mut tools = Vec::new();
    tools.extend(emoji::definitions());
    tools.extend(sticker::definitions());
    tools.extend(channel::definitions());
    tools.extend(guild::definitions());
    tools.extend(member::definitions());
    tools.extend(role::definitions());
    tools.extend(template::definitions());
    tools.extend(event::definitions());
    tools.extend(webhook::definitions());
    tools.extend(invite::definitions());
    tools
}

/// Runs a tool and renders its outcome. `Err` is reserved for names no
/// area owns; every Discord or validation failure comes back as a tool
/// result with `isError` set.
pub async fn call_tool(dispatcher: &Dispatcher, name: &str, arguments: Value) -> std::result::Result<Value, String> {
    let result = if emoji::TOOLS.contains(&name) {
        emoji::call(dispatcher, name, arguments).await
    } else if sticker::TOOLS.contains(&name) {
        sticker::call(dispatcher, name, arguments).await
    } else if channel::TOOLS.contains(&name) {
        channel::call(dispatcher, name, arguments).await
    } else if guild::TOOLS.contains(&name) {
        guild::call(dispatcher, name, arguments).await
    } else if member::TOOLS.contains(&name) {
        member::call(dispatcher, name, arguments).await
    } else if role::TOOLS.contains(&name) {
        role::call(dispatcher, name, arguments).await
    } else if template::TOOLS.contains(&name) {
        template::call(dispatcher, name, arguments).await
    } else if event::TOOLS.contains(&name) {
        event::call(dispatcher, name, arguments).await
    } else if webhook::TOOLS.contains(&name) {
        webhook::call(dispatcher, name, arguments).await
    } else if invite::TOOLS.contains(&name) {
        invite::call(dispatcher, name, arguments).await
    } else {
        return Err(format!("unknown tool: {}", name));
    };

    Ok(render(name, result))
}

fn render(name: &str, result: Result<Outcome>) -> Value {
    match result {
        Ok(Outcome::Success(reply)) => {
            let value = reply.into_value();
            let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            json!({
                "content": [{
                    "type": "text",
                    "text": text
                }]
            })
        }
        Ok(Outcome::Failure { status, message }) => {
            warn!(tool = name, status, "tool failed remotely");
            json!({
                "content": [{
                    "type": "text",
                    "text": message
                }],
                "isError": true,
                "metadata": {
                    "kind": "remote",
                    "status": status
                }
            })
        }
        Err(e) => {
            warn!(tool = name, kind = e.kind(), error = %e, "tool failed");
            json!({
                "content": [{
                    "type": "text",
                    "text": e.to_string()
                }],
                "isError": true,
                "metadata": {
                    "kind": e.kind()
                }
            })
        }
    }
}

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArguments(e.to_string()))
}

fn unknown(area: &str, name: &str) -> Error {
    Error::InvalidArguments(format!("unknown {} tool: {}", area, name))
}

#[derive(Debug, Deserialize)]
struct GuildArgs {
    guild_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelArgs {
    channel_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(defs: Vec<ToolDefinition>) -> Vec<String> {
        defs.into_iter().map(|d| d.name).collect()
    }

    #[test]
    fn every_area_defines_exactly_what_it_routes() {
        let areas: Vec<(&[&str], Vec<ToolDefinition>)> = vec![
            (emoji::TOOLS, emoji::definitions()),
            (sticker::TOOLS, sticker::definitions()),
            (channel::TOOLS, channel::definitions()),
            (guild::TOOLS, guild::definitions()),
            (member::TOOLS, member::definitions()),
            (role::TOOLS, role::definitions()),
            (template::TOOLS, template::definitions()),
            (event::TOOLS, event::definitions()),
            (webhook::TOOLS, webhook::definitions()),
            (invite::TOOLS, invite::definitions()),
        ];

        for (routed, defs) in areas {
            assert_eq!(names(defs), routed.to_vec());
        }
    }

    #[test]
    fn tool_names_are_unique_and_prefixed() {
        let all = names(list_tools());
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        assert!(all.iter().all(|n| n.starts_with("discord_")));
    }

    #[test]
    fn schemas_are_objects_with_known_required_keys() {
        for def in list_tools() {
            let schema = &def.input_schema;
            assert_eq!(schema["type"], "object", "{}", def.name);
            let props = schema["properties"].as_object().unwrap();
            for req in schema["required"].as_array().cloned().unwrap_or_default() {
                let key = req.as_str().unwrap();
                assert!(props.contains_key(key), "{} requires undeclared {}", def.name, key);
            }
        }
    }

    #[test]
    fn failure_renders_as_tool_error() {
        let value = render(
            "discord_get_guild",
            Ok(Outcome::failure(404, "Unknown Guild")),
        );
        assert_eq!(value["isError"], true);
        assert_eq!(value["metadata"]["kind"], "remote");
        assert_eq!(value["metadata"]["status"], 404);
        assert_eq!(
            value["content"][0]["text"],
            "Discord API Error 404: Unknown Guild"
        );
    }

    #[test]
    fn local_error_reports_kind() {
        let value = render("discord_update_guild", Err(Error::validation("nothing to update")));
        assert_eq!(value["isError"], true);
        assert_eq!(value["metadata"]["kind"], "validation");
        assert_eq!(value["content"][0]["text"], "nothing to update");
    }

    #[test]
    fn parse_reports_missing_argument() {
        let err = parse::<GuildArgs>(json!({})).unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("guild_id"));
    }
}
