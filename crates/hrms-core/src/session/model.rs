//! Session domain model.
//!
//! The authenticated-user context: bearer token, optional correlation id,
//! backend-defined identity record and the granted permission scopes.

use crate::scope::ScopeSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The backend-defined identity of the authenticated user.
///
/// The record shape is not fixed by the core; the backend decides which
/// fields exist. A display name is derived once at discovery time and kept
/// alongside the raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Raw identity object as returned by the backend.
    pub record: Map<String, Value>,
    /// Human-readable name derived from the record.
    pub display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(record: Map<String, Value>, display_name: Option<String>) -> Self {
        Self {
            record,
            display_name,
        }
    }

    /// The minimal identity synthesized when a login response carries no
    /// recognizable user object.
    pub fn fallback() -> Self {
        let mut record = Map::new();
        record.insert("username".to_string(), Value::String("User".to_string()));
        Self {
            record,
            display_name: Some("Authenticated User".to_string()),
        }
    }

    /// Looks up a field of the raw record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// A string field of the raw record, if present and non-empty.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.record
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The record's `permissions` array, when the backend embeds grants
    /// directly in the identity instead of the scopes endpoint.
    pub fn embedded_permissions(&self) -> Option<Vec<String>> {
        let list = self.record.get("permissions")?.as_array()?;
        Some(
            list.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
        )
    }
}

/// Represents the authenticated actor.
///
/// Owned exclusively by the session service; every other component reads it
/// through snapshots and never mutates it directly.
///
/// Invariant: `scopes` is non-empty only while `token` is present. `clear`
/// resets every field in one step so no reader can observe a torn state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer credential; absence means unauthenticated.
    pub token: Option<String>,
    /// Secondary correlation id, concatenated into the auth header when present.
    pub session_id: Option<String>,
    /// Identity of the authenticated user.
    pub user: Option<UserIdentity>,
    /// Permission scopes granted to the user.
    pub scopes: ScopeSet,
    /// When the current token was obtained.
    pub authenticated_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The derived display name, if a user has been discovered.
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref()?.display_name.as_deref()
    }

    /// Resets every field at once (logout semantics).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
