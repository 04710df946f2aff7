//! Permission scope domain model.
//!
//! A scope is an opaque string naming a grantable capability, e.g.
//! `"leave.view"`. Scopes are granted as a set; only membership matters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of permission scopes granted to the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Checks a requirement against this set.
    ///
    /// A list requirement is satisfied when *any* member is granted
    /// (OR semantics, not AND).
    pub fn satisfies(&self, requirement: &PermissionRequirement) -> bool {
        match requirement {
            PermissionRequirement::Single(scope) => self.contains(scope),
            PermissionRequirement::AnyOf(scopes) => scopes.iter().any(|s| self.contains(s)),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A permission requirement: one scope, or any of several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionRequirement {
    Single(String),
    AnyOf(Vec<String>),
}

impl From<&str> for PermissionRequirement {
    fn from(scope: &str) -> Self {
        Self::Single(scope.to_string())
    }
}

impl From<String> for PermissionRequirement {
    fn from(scope: String) -> Self {
        Self::Single(scope)
    }
}

impl From<Vec<&str>> for PermissionRequirement {
    fn from(scopes: Vec<&str>) -> Self {
        Self::AnyOf(scopes.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for PermissionRequirement {
    fn from(scopes: Vec<String>) -> Self {
        Self::AnyOf(scopes)
    }
}

impl From<&[&str]> for PermissionRequirement {
    fn from(scopes: &[&str]) -> Self {
        Self::AnyOf(scopes.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes() -> ScopeSet {
        ["leave.view", "profile.view"].into_iter().collect()
    }

    #[test]
    fn test_single_membership() {
        let scopes = scopes();
        assert!(scopes.satisfies(&"leave.view".into()));
        assert!(!scopes.satisfies(&"role.view".into()));
    }

    #[test]
    fn test_any_of_is_or_not_and() {
        let scopes = scopes();
        // Only one of the two is granted; OR semantics still pass.
        assert!(scopes.satisfies(&vec!["dashboard.view", "leave.view"].into()));
        assert!(!scopes.satisfies(&vec!["dashboard.view", "payroll.view"].into()));
    }

    #[test]
    fn test_empty_any_of_never_passes() {
        let scopes = scopes();
        assert!(!scopes.satisfies(&PermissionRequirement::AnyOf(vec![])));
    }

    #[test]
    fn test_empty_set_denies_everything() {
        let scopes = ScopeSet::new();
        assert!(!scopes.satisfies(&"leave.view".into()));
        assert!(scopes.is_empty());
    }
}
