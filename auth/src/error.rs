use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::identity::Identity;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Credential failed signature or structural checks.
    #[error("your token is invalid")]
    TokenMalformed,
    /// Signature checked out but the expiry has elapsed.
    #[error("your token has expired, please log in again")]
    TokenExpired,
    /// Verified credential is missing a claim the identity contract requires.
    #[error("token claims are missing required field '{0}'")]
    MissingClaim(&'static str),
    /// Held role does not satisfy the minimum required role.
    #[error("{}", .identity.role_denied_message())]
    InsufficientRole { identity: Identity },
    /// Authenticated subject is not the requested user.
    #[error("you are not the user you are looking for")]
    IdentityMismatch { identity: Identity },
}

impl AuthError {
    /// Identity attached to a denial, for audit logging by the caller.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthError::InsufficientRole { identity }
            | AuthError::IdentityMismatch { identity } => Some(identity),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::TokenMalformed | AuthError::TokenExpired | AuthError::MissingClaim(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::InsufficientRole { .. } | AuthError::IdentityMismatch { .. } => {
                StatusCode::FORBIDDEN
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let code = match &self {
            AuthError::TokenMalformed => "AUTH_TOKEN",
            AuthError::TokenExpired => "AUTH_EXPIRED",
            AuthError::MissingClaim(_) => "AUTH_CLAIMS",
            AuthError::InsufficientRole { .. } => "AUTH_ROLE",
            AuthError::IdentityMismatch { .. } => "AUTH_SUBJECT",
        };

        let body = ErrorBody {
            code,
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<AuthError> for (StatusCode, String) {
    fn from(value: AuthError) -> Self {
        (value.status(), value.to_string())
    }
}
