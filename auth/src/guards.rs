use tracing::debug;

use crate::claims::Actor;
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::extractors::bearer_token;
use crate::identity::Identity;
use crate::roles::{self, RoleLevel};
use crate::verifier::TokenVerifier;

/// Authorization facade bound to the signing secret and this deployment's
/// service name.
///
/// Stateless across calls; every decision is derived from the presented
/// credential and the immutable config alone.
#[derive(Clone)]
pub struct Authorizer {
    verifier: TokenVerifier,
    service: String,
}

impl Authorizer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            verifier: TokenVerifier::new(config),
            service: config.service.clone(),
        }
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Require at least `min_role` within `org_id`.
    ///
    /// End users and org-scoped service accounts are dispatched on the
    /// actor tag decided at claim parse time; both resolve against the org
    /// role list, wildcard entries included.
    pub fn authorize_org_role(
        &self,
        min_role: RoleLevel,
        org_id: &str,
        header: Option<&str>,
    ) -> AuthResult<Identity> {
        let claims = self.verifier.verify(bearer_token(header))?;
        let (held, identity) = match claims.actor {
            Actor::User { .. } => (roles::user_role(org_id, &claims), claims.user_identity()?),
            Actor::ServiceAccount { .. } => (
                roles::service_role(org_id, &claims),
                claims.service_account_identity()?,
            ),
        };
        require(held, min_role, identity)
    }

    /// Require at least `min_role` for the service bound at construction.
    ///
    /// Employees resolve against the internal role list with an exact
    /// service match; internal service accounts tolerate a missing list.
    pub fn authorize_employee_role(
        &self,
        min_role: RoleLevel,
        header: Option<&str>,
    ) -> AuthResult<Identity> {
        let claims = self.verifier.verify(bearer_token(header))?;
        let (held, identity) = match claims.actor {
            Actor::User { .. } => (
                roles::employee_role(&self.service, &claims),
                claims.user_identity()?,
            ),
            Actor::ServiceAccount { .. } => (
                roles::internal_service_role(&self.service, &claims),
                claims.service_account_identity()?,
            ),
        };
        require(held, min_role, identity)
    }

    /// Require the credential to belong to `expected_user_id`.
    pub fn authorize_identity_match(
        &self,
        expected_user_id: &str,
        header: Option<&str>,
    ) -> AuthResult<Identity> {
        let claims = self.verifier.verify(bearer_token(header))?;
        let identity = claims.user_identity()?;
        debug!(
            expected_user_id,
            subject = identity.id(),
            "comparing authenticated subject"
        );
        if identity.id() == expected_user_id {
            Ok(identity)
        } else {
            Err(AuthError::IdentityMismatch { identity })
        }
    }
}

fn require(
    held: Option<RoleLevel>,
    min_role: RoleLevel,
    identity: Identity,
) -> AuthResult<Identity> {
    if roles::satisfies(held, min_role) {
        Ok(identity)
    } else {
        Err(AuthError::InsufficientRole { identity })
    }
}
