//! User Entity
//!
//! An account identity. Created once at signup and never updated.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::validation::{ValidationError, is_valid_email, is_valid_full_name, is_valid_role};
use crate::domain::value_object::{
    email::Email,
    password::{PasswordDigest, RawPassword},
    tax_document::TaxDocument,
    user_role::UserRole,
};

/// User about to be persisted (no id yet)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub document: TaxDocument,
    pub email: Email,
    pub password_hash: PasswordDigest,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        full_name: impl Into<String>,
        document: TaxDocument,
        email: Email,
        password_hash: PasswordDigest,
    ) -> Self {
        let now = Utc::now();
        Self {
            full_name: full_name.into(),
            document,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn role(&self) -> UserRole {
        self.document.role()
    }

    /// Check domain rules, stopping at the first failure
    ///
    /// Order: full name, role, document, email, password.
    pub fn validate(&self, password: &RawPassword) -> Result<(), ValidationError> {
        if !is_valid_full_name(&self.full_name) {
            return Err(ValidationError::FullNameTooShort);
        }

        if !is_valid_role(self.role().code()) {
            return Err(ValidationError::InvalidRole);
        }

        self.document.validate()?;

        if !is_valid_email(self.email.as_str()) {
            return Err(ValidationError::InvalidEmail);
        }

        if !password.meets_minimum_length() {
            return Err(ValidationError::PasswordTooShort);
        }

        Ok(())
    }

    /// Attach the id assigned by storage
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            full_name: self.full_name,
            document: self.document,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub document: TaxDocument,
    pub email: Email,
    pub password_hash: PasswordDigest,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> UserRole {
        self.document.role()
    }
}
