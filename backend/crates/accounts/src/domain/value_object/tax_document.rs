//! Tax Document Value Object
//!
//! The single identifying document of an account. The variant decides the
//! role, so an account can never carry both documents or neither.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{ValidationError, is_valid_cnpj, is_valid_cpf};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AccountsError, AccountsResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "number", rename_all = "snake_case")]
pub enum TaxDocument {
    /// Individual taxpayer number, 11 digits
    Cpf(String),
    /// Company taxpayer number, 14 digits
    Cnpj(String),
}

impl TaxDocument {
    /// Resolve the request's optional pair into exactly one document
    ///
    /// Empty strings count as absent.
    pub fn from_choice(cpf: Option<String>, cnpj: Option<String>) -> AccountsResult<Self> {
        let cpf = cpf.filter(|s| !s.is_empty());
        let cnpj = cnpj.filter(|s| !s.is_empty());

        match (cpf, cnpj) {
            (Some(cpf), None) => Ok(Self::Cpf(cpf)),
            (None, Some(cnpj)) => Ok(Self::Cnpj(cnpj)),
            (None, None) => Err(AccountsError::MissingDocument),
            (Some(_), Some(_)) => Err(AccountsError::ConflictingDocuments),
        }
    }

    /// Rebuild from a stored row, where the role column decides which
    /// document column is authoritative
    pub fn from_stored(
        role: UserRole,
        cpf: Option<String>,
        cnpj: Option<String>,
    ) -> Option<Self> {
        match role {
            UserRole::Common => cpf.map(Self::Cpf),
            UserRole::Shopkeeper => cnpj.map(Self::Cnpj),
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Self::Cpf(_) => UserRole::Common,
            Self::Cnpj(_) => UserRole::Shopkeeper,
        }
    }

    pub fn number(&self) -> &str {
        match self {
            Self::Cpf(n) | Self::Cnpj(n) => n,
        }
    }

    pub fn cpf(&self) -> Option<&str> {
        match self {
            Self::Cpf(n) => Some(n),
            Self::Cnpj(_) => None,
        }
    }

    pub fn cnpj(&self) -> Option<&str> {
        match self {
            Self::Cnpj(n) => Some(n),
            Self::Cpf(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Cpf(n) if !is_valid_cpf(n) => Err(ValidationError::InvalidCpf),
            Self::Cnpj(n) if !is_valid_cnpj(n) => Err(ValidationError::InvalidCnpj),
            _ => Ok(()),
        }
    }

    /// Conflict reported when another account already holds this document
    pub fn taken_error(&self) -> AccountsError {
        match self {
            Self::Cpf(_) => AccountsError::CpfTaken,
            Self::Cnpj(_) => AccountsError::CnpjTaken,
        }
    }
}
