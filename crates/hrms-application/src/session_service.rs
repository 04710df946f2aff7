//! Session service: the authentication lifecycle.
//!
//! One `SessionService` instance is shared per running application. It owns
//! the [`Session`] exclusively; screens read it through snapshots and the
//! synchronous permission query, and drive transitions through `login`,
//! `logout` and the scope operations.

use chrono::Utc;
use hrms_core::config::ApiConfig;
use hrms_core::error::{HrmsError, Result};
use hrms_core::scope::{PermissionRequirement, ScopeSet};
use hrms_core::session::extract;
use hrms_core::session::model::{Session, UserIdentity};
use hrms_core::session::storage::{SessionStorage, keys};
use hrms_core::transport::Transport;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Manages the authentication lifecycle and exposes identity/permission
/// facts to the rest of the application.
///
/// # Responsibilities
///
/// - Logging in: credential POST, token/session-id/user discovery, durable
///   persistence, scope fetch
/// - Logging out: best-effort remote notify, atomic local clear
/// - Fetching and refreshing permission scopes
/// - Restoring a persisted session on startup
/// - Answering synchronous permission queries
///
/// # Concurrency
///
/// Field updates are grouped into single write-lock scopes, so a concurrent
/// reader never observes a torn state (e.g. a new token with the previous
/// user). Overlapping scope fetches are not deduplicated; the last response
/// to arrive wins.
pub struct SessionService {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn SessionStorage>,
    config: ApiConfig,
    state: RwLock<Session>,
    loading: AtomicBool,
}

impl SessionService {
    /// Creates the service and restores any previously persisted session.
    ///
    /// Restoration is synchronous and local; call [`initialize`] afterwards
    /// to run the one-shot scope reconciliation against the backend.
    ///
    /// [`initialize`]: SessionService::initialize
    pub fn new(
        transport: Arc<dyn Transport>,
        storage: Arc<dyn SessionStorage>,
        config: ApiConfig,
    ) -> Self {
        let state = restore_session(storage.as_ref(), &config.token_key);
        Self {
            transport,
            storage,
            config,
            state: RwLock::new(state),
            loading: AtomicBool::new(false),
        }
    }

    /// One-shot startup reconciliation: when a token was restored but no
    /// scopes were, fetch them once. Not a watcher; runs exactly once per
    /// service initialization.
    pub async fn initialize(&self) {
        let needs_scopes = {
            let state = self.read_state();
            state.token.is_some() && state.scopes.is_empty()
        };
        if needs_scopes {
            self.fetch_scopes().await;
        } else {
            tracing::debug!("scopes already loaded, skipping initial fetch");
        }
    }

    // ============================================================================
    // Queries
    // ============================================================================

    /// A consistent snapshot of the current session.
    pub fn snapshot(&self) -> Session {
        self.read_state().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read_state().token.clone()
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.read_state().user.clone()
    }

    pub fn scopes(&self) -> ScopeSet {
        self.read_state().scopes.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated()
    }

    /// Whether a login or profile fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Pure, synchronous permission check.
    ///
    /// A list requirement passes when *any* member is granted (OR semantics).
    pub fn has_permission(&self, requirement: impl Into<PermissionRequirement>) -> bool {
        self.read_state().scopes.satisfies(&requirement.into())
    }

    // ============================================================================
    // Lifecycle operations
    // ============================================================================

    /// Authenticates against `endpoint` with the given credential payload.
    ///
    /// On success the session is persisted to storage (token first, so the
    /// scope fetch that follows can never observe a session-less token) and
    /// a snapshot of the new session is returned. When the response carries
    /// no recognizable token the attempt fails with
    /// [`HrmsError::Authentication`] and no session is created.
    pub async fn login(&self, endpoint: &str, credentials: Value) -> Result<Session> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.login_inner(endpoint, credentials).await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    async fn login_inner(&self, endpoint: &str, credentials: Value) -> Result<Session> {
        let response = self.transport.post(endpoint, credentials).await?;

        let token = extract::extract_token(&response).ok_or_else(|| {
            HrmsError::authentication("authentication succeeded but no access token was received")
        })?;

        // Durably store the credential before anything else depends on it.
        self.persist(&self.config.token_key, &token);

        let mut session_id = extract::extract_session_id(&response);

        let user = match extract::extract_user(&response) {
            Some(mut record) => {
                let display_name = extract::derive_display_name(&record);
                if let Some(name) = &display_name {
                    record.insert("displayName".to_string(), Value::String(name.clone()));
                }
                UserIdentity::new(record, display_name)
            }
            None => {
                tracing::warn!("no user object found in login response, using fallback identity");
                UserIdentity::fallback()
            }
        };

        if session_id.is_none() {
            session_id = extract::extract_session_id_fallback(&user.record, &response);
        }
        if let Some(id) = &session_id {
            self.persist(keys::SESSION_ID, id);
        }
        self.persist(keys::USER, &Value::Object(user.record.clone()).to_string());

        {
            let mut state = self.write_state();
            state.token = Some(token);
            state.session_id = session_id;
            state.user = Some(user);
            state.authenticated_at = Some(Utc::now());
        }

        tracing::info!("login succeeded, fetching permission scopes");
        self.fetch_scopes().await;

        Ok(self.snapshot())
    }

    /// Logs out.
    ///
    /// When `endpoint` is given the backend is notified best-effort; a
    /// failed notify is logged and ignored. Local state and storage are
    /// always cleared, in one step, before this returns.
    pub async fn logout(&self, endpoint: Option<&str>) {
        if let Some(endpoint) = endpoint {
            if let Err(err) = self.transport.post(endpoint, Value::Object(Default::default())).await
            {
                tracing::error!("logout API call failed: {err}");
            }
        }

        for key in [
            self.config.token_key.as_str(),
            keys::SESSION_ID,
            keys::USER,
            keys::SCOPES,
        ] {
            if let Err(err) = self.storage.remove(key) {
                tracing::warn!("failed to clear stored {key}: {err}");
            }
        }

        self.write_state().clear();
    }

    /// Fetches the permission scopes for the current token.
    ///
    /// No-op without a token. The raw response is persisted for reload
    /// survival; recognized shapes (a bare array, `{data: [...]}` or
    /// `{scopes: [...]}`) replace the current scopes, anything else leaves
    /// them unchanged. Failures are logged and swallowed; overlapping calls
    /// are last-write-wins.
    pub async fn fetch_scopes(&self) {
        if !self.is_authenticated() {
            return;
        }

        let endpoint = self.config.endpoints.scopes.clone();
        let response = match self.transport.get(&endpoint).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("failed to fetch scopes: {err}");
                return;
            }
        };

        if response.is_null() {
            return;
        }

        self.persist(keys::SCOPES, &response.to_string());

        match extract::extract_scopes(&response) {
            Some(scopes) => {
                self.write_state().scopes = scopes.into_iter().collect();
            }
            None => {
                tracing::warn!("unrecognized scopes response shape, keeping current scopes");
            }
        }
    }

    /// Forces a scope re-fetch; used after a role's permissions are edited
    /// elsewhere in the system.
    pub async fn refresh_scopes(&self) {
        tracing::debug!("manually refreshing scopes");
        self.fetch_scopes().await;
    }

    /// Fetches the user profile from `endpoint` and replaces the session's
    /// identity with it. On failure the identity is cleared and the error is
    /// swallowed.
    pub async fn fetch_profile(&self, endpoint: &str) {
        self.loading.store(true, Ordering::SeqCst);

        match self.transport.get(endpoint).await {
            Ok(Value::Object(mut record)) => {
                let display_name = extract::derive_display_name(&record);
                if let Some(name) = &display_name {
                    record.insert("displayName".to_string(), Value::String(name.clone()));
                }
                self.persist(keys::USER, &Value::Object(record.clone()).to_string());
                self.write_state().user = Some(UserIdentity::new(record, display_name));
            }
            Ok(other) => {
                tracing::warn!("profile response was not an object: {other}");
                if let Err(err) = self.storage.remove(keys::USER) {
                    tracing::warn!("failed to clear stored user: {err}");
                }
                self.write_state().user = None;
            }
            Err(err) => {
                tracing::warn!("failed to fetch profile: {err}");
                if let Err(remove_err) = self.storage.remove(keys::USER) {
                    tracing::warn!("failed to clear stored user: {remove_err}");
                }
                self.write_state().user = None;
            }
        }

        self.loading.store(false, Ordering::SeqCst);
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn read_state(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Storage writes never block a lifecycle transition; a failed persist
    /// only costs reload survival.
    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.set(key, value) {
            tracing::warn!("failed to persist {key}: {err}");
        }
    }
}

/// Rebuilds a session from durable storage.
///
/// Stored scopes without a stored token are discarded: the session invariant
/// says scopes exist only alongside a credential.
fn restore_session(storage: &dyn SessionStorage, token_key: &str) -> Session {
    let token = storage.get(token_key);
    if token.is_none() {
        return Session::new();
    }

    let session_id = storage.get(keys::SESSION_ID);

    let user = storage
        .get(keys::USER)
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .and_then(|value| value.as_object().cloned())
        .map(|record| {
            let display_name = extract::derive_display_name(&record);
            UserIdentity::new(record, display_name)
        });

    let scopes: ScopeSet = storage
        .get(keys::SCOPES)
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .and_then(|value| extract::extract_scopes(&value))
        .map(|list| list.into_iter().collect())
        .unwrap_or_default();

    Session {
        token,
        session_id,
        user,
        scopes,
        authenticated_at: None,
    }
}
