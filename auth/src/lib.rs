pub mod claims;
pub mod config;
pub mod error;
pub mod extractors;
pub mod guards;
pub mod identity;
pub mod roles;
pub mod verifier;

pub use claims::{Actor, Claims};
pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use extractors::{bearer_token, AuthContext};
pub use guards::Authorizer;
pub use identity::Identity;
pub use roles::{
    employee_role, internal_service_role, satisfies, service_role, user_role, RoleLevel,
    WILDCARD_ORG,
};
pub use verifier::TokenVerifier;
