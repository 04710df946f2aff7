//! Response-shape extraction rules.
//!
//! The backend does not commit to one response envelope, so credentials,
//! identity and scopes are located by trying a fixed, ordered list of
//! extraction rules. The order is part of the contract: top-level fields
//! always win over fields nested under `data`, and the first match ends the
//! search. Unrecognized shapes fall back to defaults instead of failing.

use serde_json::{Map, Value};

/// Keys checked, in order, when locating the bearer token.
pub const TOKEN_KEYS: [&str; 5] = [
    "token",
    "accessToken",
    "access_token",
    "authToken",
    "auth_token",
];

/// Keys checked, in order, when locating the session correlation id.
pub const SESSION_ID_KEYS: [&str; 4] = ["sessionId", "sessionID", "sid", "session_id"];

/// Where to look for a field in the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldRule {
    /// A top-level field of the response object.
    TopLevel(&'static str),
    /// A field nested one level under `data`.
    UnderData(&'static str),
}

impl FieldRule {
    fn lookup<'a>(&self, response: &'a Value) -> Option<&'a Value> {
        match self {
            FieldRule::TopLevel(key) => response.get(key),
            FieldRule::UnderData(key) => response.get("data")?.get(key),
        }
    }
}

/// Evaluates the two-pass rule list (all top-level keys, then the same keys
/// under `data`) and returns the first usable scalar, stringified.
fn first_scalar(response: &Value, keys: &[&'static str]) -> Option<String> {
    let rules = keys
        .iter()
        .map(|k| FieldRule::TopLevel(k))
        .chain(keys.iter().map(|k| FieldRule::UnderData(k)));

    for rule in rules {
        if let Some(found) = rule.lookup(response).and_then(scalar_to_string) {
            return Some(found);
        }
    }
    None
}

/// Stringifies a scalar value, treating empty/zero/false/null as absent.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Locates the bearer token in a login response.
pub fn extract_token(response: &Value) -> Option<String> {
    first_scalar(response, &TOKEN_KEYS)
}

/// Locates the session correlation id in a login response.
pub fn extract_session_id(response: &Value) -> Option<String> {
    first_scalar(response, &SESSION_ID_KEYS)
}

/// Secondary session-id discovery, consulted only when the primary rules
/// found nothing: the discovered user record itself, then `data.sessionId`,
/// then the response root.
pub fn extract_session_id_fallback(
    record: &Map<String, Value>,
    response: &Value,
) -> Option<String> {
    record
        .get("sessionId")
        .and_then(scalar_to_string)
        .or_else(|| {
            response
                .get("data")
                .and_then(|data| data.get("sessionId"))
                .and_then(scalar_to_string)
        })
        .or_else(|| response.get("sessionId").and_then(scalar_to_string))
}

/// Locates the user-identity object in a login response.
///
/// Checked in order: `user`, `data.user`, `data` itself when it looks like an
/// identity (`name`/`username`/`id`/`uid`), `profile`, then the response root
/// when it looks like an identity (`name`/`username`/`email`/`firstName`).
/// Returns `None` when nothing matches; callers synthesize a fallback.
pub fn extract_user(response: &Value) -> Option<Map<String, Value>> {
    if let Some(user) = response.get("user").and_then(Value::as_object) {
        return Some(user.clone());
    }
    if let Some(user) = response
        .get("data")
        .and_then(|d| d.get("user"))
        .and_then(Value::as_object)
    {
        return Some(user.clone());
    }
    if let Some(data) = response.get("data").and_then(Value::as_object) {
        if has_any_key(data, &["name", "username", "id", "uid"]) {
            return Some(data.clone());
        }
    }
    if let Some(profile) = response.get("profile").and_then(Value::as_object) {
        return Some(profile.clone());
    }
    if let Some(root) = response.as_object() {
        if has_any_key(root, &["name", "username", "email", "firstName"]) {
            return Some(root.clone());
        }
    }
    None
}

fn has_any_key(object: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter()
        .any(|k| object.get(*k).map(|v| !v.is_null()).unwrap_or(false))
}

/// Derives a display name from an identity record.
///
/// First of: `displayName`, `name`, `fullName`, `firstName + " " + lastName`
/// (trimmed, lastName optional), `username`, `email`.
pub fn derive_display_name(record: &Map<String, Value>) -> Option<String> {
    for key in ["displayName", "name", "fullName"] {
        if let Some(name) = record.get(key).and_then(scalar_to_string) {
            return Some(name);
        }
    }
    if let Some(first) = record.get("firstName").and_then(scalar_to_string) {
        let last = record
            .get("lastName")
            .and_then(scalar_to_string)
            .unwrap_or_default();
        return Some(format!("{first} {last}").trim().to_string());
    }
    for key in ["username", "email"] {
        if let Some(name) = record.get(key).and_then(scalar_to_string) {
            return Some(name);
        }
    }
    None
}

/// Extracts a scope list from a scopes response.
///
/// Accepts a bare array, `{"data": [...]}` or `{"scopes": [...]}`. Any other
/// shape yields `None` and the caller leaves its current scopes unchanged.
/// Non-string array elements are skipped.
pub fn extract_scopes(response: &Value) -> Option<Vec<String>> {
    let list = match response {
        Value::Array(list) => list,
        Value::Object(object) => object
            .get("data")
            .and_then(Value::as_array)
            .or_else(|| object.get("scopes").and_then(Value::as_array))?,
        _ => return None,
    };

    Some(
        list.iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
    )
}
