use std::fmt;

use tracing::{debug, warn};

use crate::claims::Claims;

/// Org scope granting the carried role across all organizations.
pub const WILDCARD_ORG: &str = "*";

/// Closed set of role levels, in descending privilege order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleLevel {
    Admin,
    Editor,
    Viewer,
}

impl RoleLevel {
    /// Static descending-privilege table: every level a holder of `self`
    /// may act as.
    pub fn grants(self) -> &'static [RoleLevel] {
        match self {
            RoleLevel::Admin => &[RoleLevel::Admin, RoleLevel::Editor, RoleLevel::Viewer],
            RoleLevel::Editor => &[RoleLevel::Editor, RoleLevel::Viewer],
            RoleLevel::Viewer => &[RoleLevel::Viewer],
        }
    }

    /// Parse a level string from a role entry; anything outside the closed
    /// set is no role at all.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(RoleLevel::Admin),
            "editor" => Some(RoleLevel::Editor),
            "viewer" => Some(RoleLevel::Viewer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoleLevel::Admin => "admin",
            RoleLevel::Editor => "editor",
            RoleLevel::Viewer => "viewer",
        }
    }
}

impl fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when the held role is at least the required role. `None` never
/// satisfies anything.
pub fn satisfies(held: Option<RoleLevel>, required: RoleLevel) -> bool {
    held.is_some_and(|level| level.grants().contains(&required))
}

/// Role an end user holds within `org_id`, if any.
pub fn user_role(org_id: &str, claims: &Claims) -> Option<RoleLevel> {
    org_scoped_role(org_id, claims)
}

/// Role an org-scoped service account holds within `org_id`. Service
/// accounts share the org role list with end users.
pub fn service_role(org_id: &str, claims: &Claims) -> Option<RoleLevel> {
    org_scoped_role(org_id, claims)
}

fn org_scoped_role(org_id: &str, claims: &Claims) -> Option<RoleLevel> {
    let Some(entries) = claims.roles.as_deref() else {
        debug!("claims carry no org role list");
        return None;
    };
    scan(entries, |scope| scope == WILDCARD_ORG || scope == org_id)
}

/// Role an employee holds for `service`. Internal grants match the service
/// name exactly; there is no wildcard.
pub fn employee_role(service: &str, claims: &Claims) -> Option<RoleLevel> {
    let Some(entries) = claims.internal_roles.as_deref() else {
        debug!("claims carry no internal role list");
        return None;
    };
    scan(entries, |scope| scope == service)
}

/// Role an internal service account holds for `service`. A missing internal
/// role list is treated as empty.
pub fn internal_service_role(service: &str, claims: &Claims) -> Option<RoleLevel> {
    scan(claims.internal_roles.as_deref().unwrap_or(&[]), |scope| {
        scope == service
    })
}

// The first scope match ends the scan, even when its level is unknown.
// Entries that do not split into exactly two parts are skipped so later
// valid entries can still match.
fn scan<F>(entries: &[String], matches: F) -> Option<RoleLevel>
where
    F: Fn(&str) -> bool,
{
    for entry in entries {
        let Some((scope, level)) = split_entry(entry) else {
            warn!(entry = %entry, "skipping malformed role entry");
            continue;
        };
        if matches(scope) {
            let held = RoleLevel::parse(level);
            if held.is_none() {
                warn!(entry = %entry, "matched role entry carries unknown level");
            }
            return held;
        }
    }
    None
}

fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let (scope, level) = entry.split_once(':')?;
    if level.contains(':') {
        return None;
    }
    Some((scope, level))
}
