use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Verifies bearer credentials against the configured symmetric secret.
///
/// HS256 only; no algorithm negotiation. Stateless after construction and
/// safe to share across concurrent requests.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds.into();
        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Validate signature and expiry, then decode the claim payload.
    ///
    /// Pure function of (secret, credential): expiry elapsing is the only
    /// failure reported as [`AuthError::TokenExpired`]; everything else,
    /// including the empty token from a missing header, is
    /// [`AuthError::TokenMalformed`].
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let data = decode::<serde_json::Value>(token, &self.key, &self.validation).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => {
                    debug!(error = %err, "token failed verification");
                    AuthError::TokenMalformed
                }
            },
        )?;

        let claims = Claims::try_from(data.claims)?;
        debug!("verified token");
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Actor;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "unit-test-secret";

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(&AuthConfig::new(SECRET, "ledger"))
    }

    fn mint(secret: &str, claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("sign token")
    }

    fn future_exp() -> i64 {
        Utc::now().timestamp() + 600
    }

    #[test]
    fn accepts_valid_user_token() {
        let token = mint(
            SECRET,
            json!({
                "sub": "u1",
                "name": "Ada",
                "email": "ada@example.com",
                "roles": ["orgA:editor"],
                "exp": future_exp(),
            }),
        );

        let claims = verifier().verify(&token).expect("verification succeeds");
        match claims.actor {
            Actor::User { ref sub, .. } => assert_eq!(sub, "u1"),
            ref other => panic!("expected user actor, got {other:?}"),
        }
        assert_eq!(
            claims.roles.as_deref(),
            Some(&["orgA:editor".to_string()][..])
        );
    }

    #[test]
    fn token_without_subject_parses_as_service_account() {
        let token = mint(
            SECRET,
            json!({
                "id": "svc-7",
                "name": "importer",
                "exp": future_exp(),
            }),
        );

        let claims = verifier().verify(&token).expect("verification succeeds");
        assert!(matches!(claims.actor, Actor::ServiceAccount { .. }));
    }

    #[test]
    fn expired_token_is_classified_as_expired() {
        let strict = TokenVerifier::new(&AuthConfig::new(SECRET, "ledger").with_leeway(0));
        let token = mint(
            SECRET,
            json!({
                "sub": "u1",
                "name": "Ada",
                "email": "ada@example.com",
                "exp": Utc::now().timestamp() - 600,
            }),
        );

        let err = strict.verify(&token).expect_err("should reject");
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let token = mint("another-secret", json!({ "sub": "u1", "exp": future_exp() }));
        let err = verifier().verify(&token).expect_err("should reject");
        assert!(matches!(err, AuthError::TokenMalformed));
    }

    #[test]
    fn empty_and_garbled_tokens_are_malformed() {
        for token in ["", "not-a-jwt", "a.b.c"] {
            let err = verifier().verify(token).expect_err("should reject");
            assert!(matches!(err, AuthError::TokenMalformed), "token {token:?}");
        }
    }

    #[test]
    fn missing_expiry_is_malformed() {
        let token = mint(SECRET, json!({ "sub": "u1" }));
        let err = verifier().verify(&token).expect_err("should reject");
        assert!(matches!(err, AuthError::TokenMalformed));
    }
}
