//! Session storage trait.
//!
//! Defines the contract for the durable client-side key/value store the
//! session layer persists into (the browser `sessionStorage` analogue).
//! Implementations live in `hrms-infrastructure`.

use crate::error::Result;

/// Well-known storage keys used by the session layer.
///
/// `keys::TOKEN` is only the default; the active token key comes from
/// `ApiConfig::token_key`.
pub mod keys {
    pub const TOKEN: &str = "accessToken";
    pub const SESSION_ID: &str = "sessionId";
    pub const USER: &str = "userDetails";
    pub const SCOPES: &str = "scopes";
}

/// An abstract string key/value store for session state.
///
/// The store is expected to be cheap and synchronous (an in-memory map or a
/// small local file); all methods are infallible lookups except the writes,
/// which may fail at the storage layer.
///
/// # Implementation Notes
///
/// Implementations must be safe for concurrent use; the session service
/// reads and writes from overlapping async completions.
pub trait SessionStorage: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
