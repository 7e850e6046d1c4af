//! Application Configuration
//!
//! Configuration for the Accounts application layer.

use std::fmt;
use std::time::Duration;

/// Re-export the Argon2 cost from platform
pub use platform::password::HashCost;

/// Accounts application configuration
#[derive(Clone)]
pub struct AccountsConfig {
    /// HMAC-SHA256 key for bearer tokens
    pub token_secret: Vec<u8>,
    /// `iss` claim
    pub token_issuer: String,
    /// `aud` claim
    pub token_audience: String,
    /// Bearer token lifetime (30 minutes)
    pub token_ttl: Duration,
    /// Clock skew tolerated on `exp` and `nbf`
    pub token_leeway: Duration,
    /// Deadline for one request's unit of work
    pub request_timeout: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id work factor
    pub password_cost: HashCost,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_issuer: "accounts".to_string(),
            token_audience: "accounts".to_string(),
            token_ttl: Duration::from_secs(30 * 60),
            token_leeway: Duration::ZERO,
            request_timeout: Duration::from_secs(5),
            password_pepper: None,
            password_cost: HashCost::default(),
        }
    }
}

impl AccountsConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development and tests (cheapest Argon2 cost)
    pub fn development() -> Self {
        Self {
            password_cost: HashCost::minimal(),
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AccountsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountsConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_issuer", &self.token_issuer)
            .field("token_audience", &self.token_audience)
            .field("token_ttl", &self.token_ttl)
            .field("token_leeway", &self.token_leeway)
            .field("request_timeout", &self.request_timeout)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("password_cost", &self.password_cost)
            .finish()
    }
}
