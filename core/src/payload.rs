// Where the prompt lands inside a caller-shaped request body.

use serde_json::{json, Map, Value};
use tracing::debug;

const PAYLOAD_KEY: &str = "payload";
const PROMPT_FIELD_KEY: &str = "promptField";
const APPEND_AS_MESSAGE_KEY: &str = "appendAsMessage";

/// Caller description of the outgoing request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadConfig {
    /// Explicit base body. Replaces `extra` entirely when present.
    pub payload: Option<Map<String, Value>>,
    /// Dotted path (`"query.text"`) naming where the prompt goes.
    pub prompt_field: Option<String>,
    pub append_as_message: bool,
    /// Every non-control key of the config, used as the base otherwise.
    pub extra: Map<String, Value>,
}

impl PayloadConfig {
    pub fn from_value(value: &Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        let mut config = PayloadConfig::default();
        for (key, value) in map {
            match key.as_str() {
                PAYLOAD_KEY => config.payload = value.as_object().cloned(),
                PROMPT_FIELD_KEY => {
                    config.prompt_field = value.as_str().filter(|s| !s.is_empty()).map(String::from)
                }
                APPEND_AS_MESSAGE_KEY => config.append_as_message = value == &Value::Bool(true),
                _ => {
                    config.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Some(config)
    }

    fn base(&self) -> Map<String, Value> {
        self.payload.clone().unwrap_or_else(|| self.extra.clone())
    }

    /// Build the outgoing body. The config itself is never modified.
    pub fn assemble(&self, prompt: &str) -> Value {
        let mut base = self.base();
        let placement = PLACEMENTS
            .iter()
            .find(|p| (p.applies)(self, &base))
            .unwrap_or(&PLACEMENTS[PLACEMENTS.len() - 1]);

        debug!(placement = placement.name, "placing prompt in payload");
        (placement.place)(self, &mut base, prompt);
        Value::Object(base)
    }
}

// No usable config: `{ "query": prompt }`.
pub fn assemble_payload(config: Option<&Value>, prompt: &str) -> Value {
    match config.and_then(PayloadConfig::from_value) {
        Some(config) => config.assemble(prompt),
        None => json!({ "query": prompt }),
    }
}

pub struct Placement {
    pub name: &'static str,
    applies: fn(&PayloadConfig, &Map<String, Value>) -> bool,
    place: fn(&PayloadConfig, &mut Map<String, Value>, &str),
}

/// Placement strategies in precedence order. The last one always applies.
pub static PLACEMENTS: [Placement; 5] = [
    Placement {
        name: "prompt_field",
        applies: |config, _| config.prompt_field.is_some(),
        place: |config, base, prompt| {
            if let Some(path) = &config.prompt_field {
                set_path(base, path, Value::String(prompt.to_string()));
            }
        },
    },
    Placement {
        name: "append_message",
        applies: |config, base| {
            config.append_as_message || base.get("messages").is_some_and(Value::is_array)
        },
        place: |_, base, prompt| {
            let message = json!({ "role": "user", "content": prompt });
            match base.get_mut("messages") {
                Some(Value::Array(messages)) => messages.push(message),
                _ => {
                    base.insert("messages".into(), Value::Array(vec![message]));
                }
            }
        },
    },
    Placement {
        name: "query_object",
        applies: |_, base| base.get("query").is_some_and(Value::is_object),
        place: |_, base, prompt| {
            if let Some(Value::Object(query)) = base.get_mut("query") {
                query.insert("prompt".into(), Value::String(prompt.to_string()));
            }
        },
    },
    Placement {
        name: "prompt",
        applies: |_, base| matches!(base.get("prompt"), None | Some(Value::String(_))),
        place: |_, base, prompt| {
            base.insert("prompt".into(), Value::String(prompt.to_string()));
        },
    },
    Placement {
        name: "query",
        applies: |_, _| true,
        place: |_, base, prompt| {
            base.insert("query".into(), Value::String(prompt.to_string()));
        },
    },
];

/// Set `value` at a dotted path, creating mappings along the way.
///
/// Existing non-mapping intermediates are overwritten with empty mappings.
pub fn set_path(target: &mut Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut cursor = target;
    for segment in parents {
        let slot = cursor
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(next) = ensure_mapping(slot) else {
            return;
        };
        cursor = next;
    }
    cursor.insert(last.to_string(), value);
}

fn ensure_mapping(slot: &mut Value) -> Option<&mut Map<String, Value>> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut()
}
