use serde_json::{Number, Value};

// Mapping entries keep insertion order (serde_json `preserve_order`).
pub type StructuredValue = Value;

/// Render a value as one line of text, dropping anything that renders empty.
pub fn format_value(value: &StructuredValue) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                let rendered = format_value(value);
                (!rendered.is_empty()).then(|| format!("{}: {}", humanize_key(key), rendered))
            })
            .collect::<Vec<_>>()
            .join("; "),
    }
}

// Floats print the way a browser would: `28.0` as `28`, `1e21` as `1e+21`.
fn format_number(n: &Number) -> String {
    let Some(f) = n.as_f64().filter(|_| n.is_f64()) else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let abs = f.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{f:e}");
        match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        }
    } else {
        f.to_string()
    }
}

// `learningStyle` -> `Learning Style`, `current_skill` -> `Current skill`.
pub fn humanize_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;

    for c in key.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !spaced.ends_with(' ') {
                spaced.push(' ');
            }
            prev = Some(' ');
            continue;
        }
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn has_content(value: &StructuredValue) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(has_content),
        Value::Object(map) => map.values().any(has_content),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
