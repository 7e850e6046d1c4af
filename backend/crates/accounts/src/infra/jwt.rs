//! HS256 JWT Token Issuer
//!
//! Only HS256 is accepted on the way back in. `exp`, `nbf`, `iss`, `aud` and
//! `sub` are required, and every rejection collapses into
//! [`AccountsError::InvalidToken`].

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::config::AccountsConfig;
use crate::domain::service::{TokenClaims, TokenIssuer};
use crate::error::{AccountsError, AccountsResult};

/// Wire claims. `sub` carries the numeric user id as a string.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    nbf: i64,
    exp: i64,
    iss: String,
    aud: String,
}

pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl JwtTokenIssuer {
    pub fn new(config: &AccountsConfig) -> AccountsResult<Self> {
        if config.token_secret.is_empty() {
            return Err(AccountsError::TokenSigning(
                "token secret must not be empty".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.token_issuer]);
        validation.set_audience(&[&config.token_audience]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = config.token_leeway.as_secs();

        Ok(Self {
            encoding: EncodingKey::from_secret(&config.token_secret),
            decoding: DecodingKey::from_secret(&config.token_secret),
            validation,
            issuer: config.token_issuer.clone(),
            audience: config.token_audience.clone(),
        })
    }

    fn issue_at(
        &self,
        subject: UserId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> AccountsResult<String> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AccountsError::TokenSigning(e.to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AccountsError::TokenSigning(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn generate_token(&self, subject: UserId, ttl: Duration) -> AccountsResult<String> {
        self.issue_at(subject, ttl, Utc::now())
    }

    fn validate_token(&self, token: &str) -> AccountsResult<TokenClaims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(reason = ?e.kind(), "Token rejected");
            AccountsError::InvalidToken
        })?;

        let claims = data.claims;
        let subject = claims
            .sub
            .parse::<i64>()
            .map(UserId::new)
            .ok()
            .filter(UserId::is_assigned)
            .ok_or(AccountsError::InvalidToken)?;

        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(AccountsError::InvalidToken)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AccountsError::InvalidToken)?;

        Ok(TokenClaims {
            subject,
            issued_at,
            expires_at,
        })
    }
}

impl fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    const TTL: Duration = Duration::from_secs(30 * 60);

    fn config(secret: &[u8]) -> AccountsConfig {
        AccountsConfig {
            token_secret: secret.to_vec(),
            token_issuer: "accounts-test".to_string(),
            token_audience: "accounts-clients".to_string(),
            ..AccountsConfig::default()
        }
    }

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(&config(b"0123456789abcdef0123456789abcdef")).unwrap()
    }

    #[test]
    fn test_roundtrip_yields_subject() {
        let issuer = issuer();
        let token = issuer.generate_token(UserId::new(42), TTL).unwrap();

        let claims = issuer.validate_token(&token).unwrap();
        assert_eq!(claims.subject, UserId::new(42));
        assert_eq!(
            (claims.expires_at - claims.issued_at).num_seconds(),
            TTL.as_secs() as i64
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer();
        let an_hour_ago = Utc::now() - chrono::Duration::hours(1);
        let token = issuer.issue_at(UserId::new(42), TTL, an_hour_ago).unwrap();

        assert!(matches!(
            issuer.validate_token(&token),
            Err(AccountsError::InvalidToken)
        ));
    }

    #[test]
    fn test_not_yet_valid_token_rejected() {
        let issuer = issuer();
        let later = Utc::now() + chrono::Duration::hours(1);
        let token = issuer.issue_at(UserId::new(42), TTL, later).unwrap();

        assert!(matches!(
            issuer.validate_token(&token),
            Err(AccountsError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let issuer = issuer();
        let victim = issuer.generate_token(UserId::new(1), TTL).unwrap();
        let attacker = issuer.generate_token(UserId::new(2), TTL).unwrap();

        let victim_parts: Vec<&str> = victim.split('.').collect();
        let attacker_parts: Vec<&str> = attacker.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            victim_parts[0], attacker_parts[1], victim_parts[2]
        );

        assert_ne!(victim_parts[1], attacker_parts[1]);
        assert!(matches!(
            issuer.validate_token(&forged),
            Err(AccountsError::InvalidToken)
        ));
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = issuer().generate_token(UserId::new(42), TTL).unwrap();
        let other = JwtTokenIssuer::new(&config(b"another-secret-another-secret!!!")).unwrap();

        assert!(matches!(
            other.validate_token(&token),
            Err(AccountsError::InvalidToken)
        ));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let issuer = issuer();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "42".to_string(),
            iat: now,
            nbf: now,
            exp: now + 600,
            iss: "accounts-test".to_string(),
            aud: "accounts-clients".to_string(),
        };
        let hs384 = encode(&Header::new(Algorithm::HS384), &claims, &issuer.encoding).unwrap();

        assert!(matches!(
            issuer.validate_token(&hs384),
            Err(AccountsError::InvalidToken)
        ));
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let issuer = issuer();
        let now = Utc::now().timestamp();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"sub":"42","iat":{now},"nbf":{now},"exp":{},"iss":"accounts-test","aud":"accounts-clients"}}"#,
            now + 600
        ));
        let token = format!("{header}.{payload}.");

        assert!(matches!(
            issuer.validate_token(&token),
            Err(AccountsError::InvalidToken)
        ));
    }

    #[test]
    fn test_issuer_and_audience_checked() {
        let token = issuer().generate_token(UserId::new(42), TTL).unwrap();

        let wrong_issuer = JwtTokenIssuer::new(&AccountsConfig {
            token_issuer: "someone-else".to_string(),
            ..config(b"0123456789abcdef0123456789abcdef")
        })
        .unwrap();
        assert!(wrong_issuer.validate_token(&token).is_err());

        let wrong_audience = JwtTokenIssuer::new(&AccountsConfig {
            token_audience: "someone-else".to_string(),
            ..config(b"0123456789abcdef0123456789abcdef")
        })
        .unwrap();
        assert!(wrong_audience.validate_token(&token).is_err());
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let issuer = issuer();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "not-a-number".to_string(),
            iat: now,
            nbf: now,
            exp: now + 600,
            iss: "accounts-test".to_string(),
            aud: "accounts-clients".to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &issuer.encoding).unwrap();

        assert!(matches!(
            issuer.validate_token(&token),
            Err(AccountsError::InvalidToken)
        ));
    }

    #[test]
    fn test_empty_secret_refused() {
        assert!(matches!(
            JwtTokenIssuer::new(&config(b"")),
            Err(AccountsError::TokenSigning(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            issuer().validate_token("not.a.jwt"),
            Err(AccountsError::InvalidToken)
        ));
    }
}
