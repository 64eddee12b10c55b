use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// Application-focused representation of verified token claims.
#[derive(Debug, Clone)]
pub struct Claims {
    pub actor: Actor,
    /// Org-scoped `"<org-id>:<level>"` entries, shared by end users and
    /// org-scoped service accounts.
    pub roles: Option<Vec<String>>,
    /// Internal `"<service-name>:<level>"` entries for employees and
    /// internal service accounts.
    pub internal_roles: Option<Vec<String>>,
    pub expires_at: DateTime<Utc>,
}

/// Caller kind, decided once when the claims are parsed: a `sub` claim
/// marks an end user, its absence a service account.
#[derive(Debug, Clone)]
pub enum Actor {
    User {
        sub: String,
        name: Option<String>,
        email: Option<String>,
    },
    ServiceAccount {
        id: Option<String>,
        name: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ClaimsRepr {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    roles: Option<Vec<String>>,
    #[serde(default)]
    internal_roles: Option<Vec<String>>,
    exp: i64,
}

impl TryFrom<ClaimsRepr> for Claims {
    type Error = AuthError;

    fn try_from(value: ClaimsRepr) -> AuthResult<Self> {
        let expires_at = Utc
            .timestamp_opt(value.exp, 0)
            .single()
            .ok_or(AuthError::TokenMalformed)?;

        let actor = match value.sub {
            Some(sub) => Actor::User {
                sub,
                name: value.name,
                email: value.email,
            },
            None => Actor::ServiceAccount {
                id: value.id,
                name: value.name,
            },
        };

        Ok(Self {
            actor,
            roles: value.roles,
            internal_roles: value.internal_roles,
            expires_at,
        })
    }
}

impl TryFrom<serde_json::Value> for Claims {
    type Error = AuthError;

    fn try_from(value: serde_json::Value) -> AuthResult<Self> {
        let repr: ClaimsRepr = serde_json::from_value(value).map_err(|err| {
            debug!(error = %err, "claim payload failed to deserialize");
            AuthError::TokenMalformed
        })?;
        Claims::try_from(repr)
    }
}
