//! Permission gate: the render/redirect decision helper.

use crate::session_service::SessionService;
use hrms_core::scope::{PermissionRequirement, ScopeSet};
use std::sync::Arc;

/// Outcome of a gate check: render the guarded content, or don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny,
}

/// Decides whether the current user may see a guarded screen or widget.
///
/// The gate holds no state of its own; every check reads the session service
/// at call time, so a decision made after a scope refresh reflects the new
/// scopes. Callers re-evaluate whenever they observe the session change.
///
/// Effective permissions are resolved through a fallback chain: the fetched
/// scopes when non-empty, else a `permissions` array embedded in the user
/// record, else the configured default grants (empty unless a deployment
/// opts in).
pub struct PermissionGate {
    session: Arc<SessionService>,
    default_grants: Vec<String>,
}

impl PermissionGate {
    pub fn new(session: Arc<SessionService>) -> Self {
        Self {
            session,
            default_grants: Vec::new(),
        }
    }

    /// Grants applied when neither scopes nor an embedded permission list
    /// exist. Off by default.
    pub fn with_default_grants(mut self, grants: Vec<String>) -> Self {
        self.default_grants = grants;
        self
    }

    /// The permissions currently in effect, after the fallback chain.
    /// An unauthenticated session has none.
    pub fn effective_permissions(&self) -> ScopeSet {
        let snapshot = self.session.snapshot();
        let Some(user) = &snapshot.user else {
            return ScopeSet::new();
        };
        if !snapshot.is_authenticated() {
            return ScopeSet::new();
        }

        if !snapshot.scopes.is_empty() {
            return snapshot.scopes;
        }

        if let Some(embedded) = user.embedded_permissions() {
            if !embedded.is_empty() {
                return embedded.into_iter().collect();
            }
        }

        self.default_grants.iter().cloned().collect()
    }

    /// Whether the requirement is satisfied (OR semantics for lists).
    pub fn allows(&self, requirement: impl Into<PermissionRequirement>) -> bool {
        self.effective_permissions()
            .satisfies(&requirement.into())
    }

    /// The allow/deny decision for a routing context.
    pub fn check(&self, requirement: impl Into<PermissionRequirement>) -> GateDecision {
        if self.allows(requirement) {
            GateDecision::Allow
        } else {
            GateDecision::Deny
        }
    }
}
