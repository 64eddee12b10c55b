use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::guards::Authorizer;

/// Token segment of an authorization header value.
///
/// Lenient by contract: any `<scheme> <token>` pair yields the token, and a
/// missing or garbled header yields the empty string, which verification
/// then classifies as malformed. Never fails.
pub fn bearer_token(header: Option<&str>) -> &str {
    header
        .and_then(|value| value.split_whitespace().nth(1))
        .unwrap_or("")
}

/// Verified claims extracted from the request's authorization header.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub claims: Claims,
    pub token: String,
}

impl AuthContext {
    pub fn into_claims(self) -> Claims {
        self.claims
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    Arc<Authorizer>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authorizer = Arc::<Authorizer>::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = bearer_token(header);
        let claims = authorizer.verifier().verify(token)?;

        Ok(Self {
            claims,
            token: token.to_owned(),
        })
    }
}
