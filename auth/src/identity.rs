use serde::Serialize;

use crate::claims::{Actor, Claims};
use crate::error::{AuthError, AuthResult};

/// Normalized caller identity handed back to the routing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    User {
        id: String,
        name: String,
        email: String,
    },
    ServiceAccount {
        id: String,
        name: String,
    },
}

impl Identity {
    pub fn id(&self) -> &str {
        match self {
            Identity::User { id, .. } | Identity::ServiceAccount { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Identity::User { name, .. } | Identity::ServiceAccount { name, .. } => name,
        }
    }

    /// Denial message for an insufficient role, phrased per caller kind.
    pub(crate) fn role_denied_message(&self) -> &'static str {
        match self {
            Identity::User { .. } => "you do not have the role required for this action",
            Identity::ServiceAccount { .. } => {
                "this service account does not have the role required for this action"
            }
        }
    }
}

impl Claims {
    /// Normalize an end-user identity. Every field is required; a missing
    /// one marks a credential that passed the signature check but violates
    /// the claim contract.
    pub fn user_identity(&self) -> AuthResult<Identity> {
        match &self.actor {
            Actor::User { sub, name, email } => Ok(Identity::User {
                id: sub.clone(),
                name: name.clone().ok_or(AuthError::MissingClaim("name"))?,
                email: email.clone().ok_or(AuthError::MissingClaim("email"))?,
            }),
            Actor::ServiceAccount { .. } => Err(AuthError::MissingClaim("sub")),
        }
    }

    /// Normalize a service-account identity.
    pub fn service_account_identity(&self) -> AuthResult<Identity> {
        match &self.actor {
            Actor::ServiceAccount { id, name } => Ok(Identity::ServiceAccount {
                id: id.clone().ok_or(AuthError::MissingClaim("id"))?,
                name: name.clone().ok_or(AuthError::MissingClaim("name"))?,
            }),
            Actor::User { .. } => Err(AuthError::MissingClaim("id")),
        }
    }

    /// Normalize along the actor tag.
    pub fn identity(&self) -> AuthResult<Identity> {
        match &self.actor {
            Actor::User { .. } => self.user_identity(),
            Actor::ServiceAccount { .. } => self.service_account_identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(actor: Actor) -> Claims {
        Claims {
            actor,
            roles: None,
            internal_roles: None,
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn user_identity_requires_every_field() {
        let full = claims(Actor::User {
            sub: "u1".to_string(),
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        });
        assert_eq!(
            full.user_identity().expect("identity"),
            Identity::User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }
        );

        let missing_email = claims(Actor::User {
            sub: "u1".to_string(),
            name: Some("Ada".to_string()),
            email: None,
        });
        let err = missing_email.user_identity().expect_err("should fail");
        assert!(matches!(err, AuthError::MissingClaim("email")));
    }

    #[test]
    fn user_identity_rejects_service_account_actor() {
        let subless = claims(Actor::ServiceAccount {
            id: Some("svc-7".to_string()),
            name: Some("importer".to_string()),
        });
        let err = subless.user_identity().expect_err("should fail");
        assert!(matches!(err, AuthError::MissingClaim("sub")));
    }

    #[test]
    fn service_account_identity_requires_id_and_name() {
        let full = claims(Actor::ServiceAccount {
            id: Some("svc-7".to_string()),
            name: Some("importer".to_string()),
        });
        assert_eq!(
            full.service_account_identity().expect("identity"),
            Identity::ServiceAccount {
                id: "svc-7".to_string(),
                name: "importer".to_string(),
            }
        );

        let nameless = claims(Actor::ServiceAccount {
            id: Some("svc-7".to_string()),
            name: None,
        });
        let err = nameless.service_account_identity().expect_err("should fail");
        assert!(matches!(err, AuthError::MissingClaim("name")));
    }

    #[test]
    fn identity_dispatches_on_actor_tag() {
        let user = claims(Actor::User {
            sub: "u1".to_string(),
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        });
        assert!(matches!(
            user.identity().expect("identity"),
            Identity::User { .. }
        ));

        let account = claims(Actor::ServiceAccount {
            id: Some("svc-7".to_string()),
            name: Some("importer".to_string()),
        });
        assert!(matches!(
            account.identity().expect("identity"),
            Identity::ServiceAccount { .. }
        ));
    }

    #[test]
    fn identity_serializes_with_kind_tag() {
        let identity = Identity::ServiceAccount {
            id: "svc-7".to_string(),
            name: "importer".to_string(),
        };
        let value = serde_json::to_value(&identity).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"kind": "service_account", "id": "svc-7", "name": "importer"})
        );
    }
}
