use serde_json::{Map, Value};

use crate::value::{format_value, humanize_key, StructuredValue};

pub const NOT_PROVIDED: &str = "Not provided.";
pub const NO_RESOURCES: &str = "No personalized learning resources were returned.";

// Resource fields rendered as `Key: value` extras, in this order.
const RESOURCE_EXTRA_FIELDS: [&str; 5] = ["skills", "topics", "level", "format", "duration"];

pub fn format_personal_info(value: &StructuredValue) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .filter(|line| !line.is_empty())
            .map(|line| format!("- {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                let rendered = format_value(value);
                (!rendered.is_empty()).then(|| format!("- {}: {}", humanize_key(key), rendered))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => format_value(other),
    }
}

// Numbering only counts surviving items.
pub fn format_goals(value: &StructuredValue) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, line)| format!("{}. {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n"),
        other => format_value(other),
    }
}

// Numbering follows input position, so dropped entries leave gaps.
pub fn format_resources(value: &StructuredValue) -> String {
    let Value::Array(items) = value else {
        return NO_RESOURCES.to_string();
    };

    let lines: Vec<String> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| format_resource(i + 1, item))
        .collect();

    if lines.is_empty() {
        NO_RESOURCES.to_string()
    } else {
        lines.join("\n")
    }
}

fn format_resource(position: usize, item: &StructuredValue) -> Option<String> {
    match item {
        Value::Null => None,
        Value::Object(map) => Some(format_resource_entry(position, map)),
        other => {
            let text = format_value(other);
            (!text.is_empty()).then(|| format!("{position}. {text}"))
        }
    }
}

fn format_resource_entry(position: usize, map: &Map<String, Value>) -> String {
    let title =
        first_present(map, &["title", "name"]).unwrap_or_else(|| format!("Resource {position}"));
    let link = first_present(map, &["url", "link"]);
    let summary = first_present(map, &["summary", "description", "notes"]);

    let extras = RESOURCE_EXTRA_FIELDS
        .iter()
        .filter_map(|field| {
            let rendered = map.get(*field).map(format_value).unwrap_or_default();
            (!rendered.is_empty()).then(|| format!("{}: {}", humanize_key(field), rendered))
        })
        .collect::<Vec<_>>()
        .join(" | ");

    let details = [summary.unwrap_or_default(), extras]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");

    let mut line = format!("{position}. {title}");
    if let Some(link) = link {
        line.push_str(&format!(" ({link})"));
    }
    if !details.is_empty() {
        line.push_str(&format!(" - {details}"));
    }
    line
}

fn first_present(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .map(format_value)
        .find(|s| !s.is_empty())
}

pub fn or_not_provided(text: String) -> String {
    if text.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn personal_info_string_is_trimmed() {
        assert_eq!(format_personal_info(&json!("  Jane, 28 \n")), "Jane, 28");
    }

    #[test]
    fn personal_info_sequence_becomes_bullets() {
        let value = json!(["Jane", "", { "age": 28 }, null]);
        assert_eq!(format_personal_info(&value), "- Jane\n- Age: 28");
        assert_eq!(format_personal_info(&json!([])), "");
    }

    #[test]
    fn personal_info_mapping_becomes_labelled_bullets() {
        let value = json!({ "fullName": "Jane Doe", "age": 28, "pets": [], "role": "  " });
        assert_eq!(format_personal_info(&value), "- Full Name: Jane Doe\n- Age: 28");
        assert_eq!(or_not_provided(format_personal_info(&json!({}))), NOT_PROVIDED);
    }

    #[test]
    fn goals_number_only_surviving_items() {
        let value = json!(["", "Learn Go", null, ["ship", "a CLI"]]);
        assert_eq!(format_goals(&value), "1. Learn Go\n2. ship, a CLI");
    }

    #[test]
    fn goals_fall_back_to_value_formatter() {
        assert_eq!(format_goals(&json!("  Run a 10k ")), "Run a 10k");
        assert_eq!(format_goals(&json!({ "primary": "Learn Go" })), "Primary: Learn Go");
    }

    #[test]
    fn resources_fallback_for_empty_and_non_sequence() {
        assert_eq!(format_resources(&json!([])), NO_RESOURCES);
        assert_eq!(format_resources(&json!(null)), NO_RESOURCES);
        assert_eq!(format_resources(&json!("The Rust Book")), NO_RESOURCES);
        assert_eq!(format_resources(&json!({ "title": "x" })), NO_RESOURCES);
        assert_eq!(format_resources(&json!([null, "  "])), NO_RESOURCES);
    }

    #[test]
    fn resources_keep_input_positions() {
        let value = json!([null, "  Tour of Go ", 7, true]);
        assert_eq!(format_resources(&value), "2. Tour of Go\n3. 7\n4. true");
    }

    #[test]
    fn resource_mapping_renders_title_link_and_details() {
        let value = json!([{
            "name": "Go by Example",
            "link": "https://gobyexample.com",
            "description": "Hands-on introduction",
            "skills": ["concurrency", "testing"],
            "level": "beginner",
            "ignored": "not in the fixed field list"
        }]);
        assert_eq!(
            format_resources(&value),
            "1. Go by Example (https://gobyexample.com) - Hands-on introduction | \
             Skills: concurrency, testing | Level: beginner"
        );
    }

    #[test]
    fn resource_mapping_prefers_first_non_empty_alias() {
        let value = json!([{ "title": " ", "name": "Named", "url": "", "link": "l", "summary": "", "notes": "n" }]);
        assert_eq!(format_resources(&value), "1. Named (l) - n");
    }

    #[test]
    fn resource_mapping_without_known_fields_uses_positional_title() {
        let value = json!(["first", {}, { "duration": "2h" }]);
        assert_eq!(
            format_resources(&value),
            "1. first\n2. Resource 2\n3. Resource 3 - Duration: 2h"
        );
    }
}
