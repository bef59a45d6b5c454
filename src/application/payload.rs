//! Form entries → API payload mapping.

use serde_json::{Map, Number, Value};

use crate::domain::schema::{FieldKind, FieldSpec};
use crate::domain::types::ContentType;

/// Last value submitted under `name`, matching form-data semantics for repeated keys.
pub fn entry<'a>(entries: &'a [(String, String)], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Build the request body for `type_key` from raw form entries.
///
/// Only the coercions of the field schema are applied; the backend validates.
/// Unknown type keys pass the raw entries through as strings.
pub fn normalize_payload(type_key: &str, entries: &[(String, String)]) -> Map<String, Value> {
    let Some(ty) = ContentType::from_key(type_key) else {
        return raw_map(entries);
    };

    let mut payload = Map::new();
    for spec in ty.fields() {
        if let Some(value) = coerce(spec, entry(entries, spec.name)) {
            payload.insert(spec.name.to_string(), value);
        }
    }
    payload
}

fn raw_map(entries: &[(String, String)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in entries {
        map.insert(key.clone(), Value::String(value.clone()));
    }
    map
}

/// `None` means the key is left out of the payload.
fn coerce(spec: &FieldSpec, raw: Option<&str>) -> Option<Value> {
    match spec.kind {
        FieldKind::Text => raw.map(|value| Value::String(value.to_string())),
        FieldKind::Number => Some(raw.map_or(Value::Null, parse_number)),
        FieldKind::Boolean => Some(Value::Bool(raw == Some("on"))),
        FieldKind::Tags => Some(Value::Array(
            split_tags(raw.unwrap_or_default())
                .into_iter()
                .map(Value::String)
                .collect(),
        )),
    }
}

/// Numeric coercion of a form value.
///
/// Empty input and anything that does not read as a finite number yield
/// `null`; whitespace-only input reads as `0`. Whole values are sent as
/// integers (`"1e3"` → `1000`), and `0x`/`0o`/`0b` prefixes are accepted.
pub fn parse_number(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Number(0.into());
    }
    if let Some(int) = parse_radix(trimmed) {
        return Value::Number(int.into());
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }

    let Some(float) = parse_decimal(trimmed) else {
        return Value::Null;
    };
    if let Some(int) = whole(float) {
        return Value::Number(int.into());
    }
    Number::from_f64(float).map_or(Value::Null, Value::Number)
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[allow(clippy::cast_possible_truncation)]
fn whole(float: f64) -> Option<i64> {
    (float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER).then(|| float as i64)
}

/// Finite decimal literal; word forms such as `inf` or `nan` are not numbers here.
fn parse_decimal(raw: &str) -> Option<f64> {
    let digits = raw.trim_start_matches(['+', '-']);
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    raw.parse::<f64>().ok().filter(|float| float.is_finite())
}

fn parse_radix(raw: &str) -> Option<u64> {
    let lower = raw.get(..2)?.to_ascii_lowercase();
    let radix = match lower.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    u64::from_str_radix(&raw[2..], radix).ok()
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
