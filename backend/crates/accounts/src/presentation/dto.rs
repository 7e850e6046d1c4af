//! API DTOs (Data Transfer Objects)
//!
//! Request bodies carry structural checks (presence and length). Domain rules
//! are applied later by the use cases.

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WalletId};
use serde::{Deserialize, Serialize};

use crate::application::Profile;
use crate::application::{LoginInput, SignUpInput};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AccountsError, AccountsResult};

const NAME_MAX_LENGTH: usize = 100;
const EMAIL_MAX_LENGTH: usize = 100;
const PASSWORD_MIN_LENGTH: usize = 6;
const PASSWORD_MAX_LENGTH: usize = 100;

fn require(field: &str, value: &str) -> AccountsResult<()> {
    if value.is_empty() {
        return Err(AccountsError::MalformedRequest(format!("{field} is required")));
    }
    Ok(())
}

fn at_most(field: &str, value: &str, max: usize) -> AccountsResult<()> {
    if value.chars().count() > max {
        return Err(AccountsError::MalformedRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn exactly(field: &str, value: Option<&str>, len: usize) -> AccountsResult<()> {
    match value {
        Some(v) if !v.is_empty() && v.chars().count() != len => Err(
            AccountsError::MalformedRequest(format!("{field} must be {len} characters")),
        ),
        _ => Ok(()),
    }
}

fn password_length(value: &str) -> AccountsResult<()> {
    let len = value.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&len) {
        return Err(AccountsError::MalformedRequest(format!(
            "password must be between {PASSWORD_MIN_LENGTH} and {PASSWORD_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub fullname: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub cnpj: Option<String>,
    pub email: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> AccountsResult<()> {
        require("fullname", &self.fullname)?;
        at_most("fullname", &self.fullname, NAME_MAX_LENGTH)?;
        exactly("cpf", self.cpf.as_deref(), 11)?;
        exactly("cnpj", self.cnpj.as_deref(), 14)?;
        require("email", &self.email)?;
        at_most("email", &self.email, EMAIL_MAX_LENGTH)?;
        require("password", &self.password)?;
        password_length(&self.password)
    }
}

impl From<SignUpRequest> for SignUpInput {
    fn from(req: SignUpRequest) -> Self {
        SignUpInput {
            full_name: req.fullname,
            cpf: req.cpf,
            cnpj: req.cnpj,
            email: req.email,
            password: req.password,
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AccountsResult<()> {
        require("email", &self.email)?;
        at_most("email", &self.email, EMAIL_MAX_LENGTH)?;
        require("password", &self.password)?;
        password_length(&self.password)
    }
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput {
            email: req.email,
            password: req.password,
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

// ============================================================================
// Current user
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct WalletResponse {
    pub id: WalletId,
    pub active: bool,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// Current user info response
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub id: UserId,
    pub fullname: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub wallet: Option<WalletResponse>,
}

impl From<Profile> for MeResponse {
    fn from(profile: Profile) -> Self {
        let Profile { user, wallet } = profile;
        MeResponse {
            id: user.id,
            role: user.role(),
            cpf: user.document.cpf().map(str::to_string),
            cnpj: user.document.cnpj().map(str::to_string),
            fullname: user.full_name,
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            wallet: wallet.map(|w| WalletResponse {
                id: w.id,
                active: w.active,
                balance: w.balance,
                created_at: w.created_at,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignUpRequest {
        SignUpRequest {
            fullname: "John Doe".to_string(),
            cpf: Some("12345678901".to_string()),
            cnpj: None,
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
        }
    }

    #[test]
    fn test_valid_signup_request() {
        assert!(signup().validate().is_ok());
    }

    #[test]
    fn test_document_lengths_are_structural() {
        let req = SignUpRequest {
            cpf: Some("123".to_string()),
            ..signup()
        };
        assert!(matches!(req.validate(), Err(AccountsError::MalformedRequest(_))));

        let req = SignUpRequest {
            cnpj: Some("123".to_string()),
            ..signup()
        };
        assert!(matches!(req.validate(), Err(AccountsError::MalformedRequest(_))));
    }

    #[test]
    fn test_document_contents_are_left_to_the_domain() {
        // right length, wrong characters: rejected later as invalid CPF
        let req = SignUpRequest {
            cpf: Some("1234567890a".to_string()),
            ..signup()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_password_bounds() {
        let short = SignUpRequest {
            password: "12345".to_string(),
            ..signup()
        };
        assert!(short.validate().is_err());

        let long = SignUpRequest {
            password: "x".repeat(101),
            ..signup()
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_missing_fields() {
        let req = SignUpRequest {
            fullname: String::new(),
            ..signup()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "fullname is required");
    }

    #[test]
    fn test_signup_json_shape() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"fullname":"ACME","cnpj":"12345678000199","email":"a@b.com","password":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(req.cpf, None);
        assert_eq!(req.cnpj.as_deref(), Some("12345678000199"));
    }
}
