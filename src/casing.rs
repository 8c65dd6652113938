//! Key transforms between the API's camelCase field names and snake_case.
//!
//! Models store a single canonical value; keys are renamed only when a view
//! is requested.

use serde_json::{Map, Value};

/// `publishedDate` -> `published_date`, `videoURL` -> `video_url`.
///
/// Keys that are already snake_case come back unchanged. Hyphens and spaces
/// become underscores.
pub fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                // End of an acronym: the `R` in `URLResult`.
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' || c == ' ' {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    out
}

/// `published_date` -> `publishedDate`. A leading underscore is kept.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;

    for c in key.chars() {
        if c == '_' && !out.is_empty() {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

/// Rename every object key in `value`, recursing through nested objects and
/// arrays. Non-key data is moved through untouched.
pub fn transform_keys<F>(value: Value, rename: &F) -> Value
where
    F: Fn(&str) -> String,
{
    match value {
        Value::Object(map) => Value::Object(transform_map(map, rename)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| transform_keys(item, rename))
                .collect(),
        ),
        other => other,
    }
}

/// Keys already in the target form keep their slot. A renamed key that would
/// land on an occupied slot keeps its original spelling, so the output has
/// exactly as many keys as the input.
pub(crate) fn transform_map<F>(map: Map<String, Value>, rename: &F) -> Map<String, Value>
where
    F: Fn(&str) -> String,
{
    let mut out = Map::new();
    let mut renamed = Vec::new();

    for (key, value) in map {
        let target = rename(&key);
        if target == key {
            out.insert(key, transform_keys(value, rename));
        } else {
            renamed.push((key, target, value));
        }
    }

    for (key, target, value) in renamed {
        let key = if out.contains_key(&target) { key } else { target };
        out.insert(key, transform_keys(value, rename));
    }

    out
}
