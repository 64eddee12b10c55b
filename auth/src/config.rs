use std::env;

/// Environment variable the signing secret is read from at startup.
pub const SECRET_ENV: &str = "LEDGER_AUTH_SECRET";

/// Runtime configuration for credential verification.
///
/// Constructed once at startup and injected into the verifier; never read
/// from ambient global state afterwards.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric secret used to verify token signatures.
    pub secret: String,
    /// Internal service name employee role checks are evaluated against.
    pub service: String,
    /// Allowable clock skew in seconds when validating exp.
    pub leeway_seconds: u32,
}

impl AuthConfig {
    /// Construct config with sensible defaults (30 second leeway).
    pub fn new(secret: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            service: service.into(),
            leeway_seconds: 30,
        }
    }

    /// Adjust the allowed leeway.
    pub fn with_leeway(mut self, seconds: u32) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// Load the secret from [`SECRET_ENV`].
    pub fn from_env(service: impl Into<String>) -> Result<Self, env::VarError> {
        Ok(Self::new(env::var(SECRET_ENV)?, service))
    }
}
