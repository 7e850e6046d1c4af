//! Domain Validation
//!
//! Field predicates and the rule errors returned when an assembled entity
//! breaks them. Entities run the predicates in a fixed order and stop at the
//! first failure.

use thiserror::Error;

use crate::domain::value_object::user_role::UserRole;

pub const FULL_NAME_MIN_LENGTH: usize = 3;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const CPF_LENGTH: usize = 11;
pub const CNPJ_LENGTH: usize = 14;

/// A domain rule violated by an otherwise well-formed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("fullname too short")]
    FullNameTooShort,

    #[error("invalid role")]
    InvalidRole,

    #[error("invalid CPF")]
    InvalidCpf,

    #[error("invalid CNPJ")]
    InvalidCnpj,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("password too short")]
    PasswordTooShort,

    #[error("invalid user id")]
    InvalidUserId,

    #[error("balance cannot be negative")]
    NegativeBalance,
}

/// At least three characters once surrounding whitespace is removed
pub fn is_valid_full_name(full_name: &str) -> bool {
    full_name.trim().chars().count() >= FULL_NAME_MIN_LENGTH
}

pub fn is_valid_role(code: &str) -> bool {
    UserRole::from_code(code).is_some()
}

pub fn is_valid_cpf(cpf: &str) -> bool {
    is_digits_of_length(cpf, CPF_LENGTH)
}

pub fn is_valid_cnpj(cnpj: &str) -> bool {
    is_digits_of_length(cnpj, CNPJ_LENGTH)
}

/// `local@label.[label.]tld`
///
/// Local part and labels use ASCII word characters, `-` (and `.` in the
/// local part). The top-level label is 2 to 4 characters long.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(|c| is_word_char(c) || c == '.') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };

    if hosts.is_empty() {
        return false;
    }

    hosts
        .iter()
        .all(|label| !label.is_empty() && label.chars().all(is_word_char))
        && (2..=4).contains(&tld.len())
        && tld.chars().all(is_word_char)
}

/// Length counted in characters, not bytes
pub fn is_valid_password(char_count: usize) -> bool {
    char_count >= PASSWORD_MIN_LENGTH
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_digits_of_length(value: &str, length: usize) -> bool {
    value.len() == length && value.bytes().all(|b| b.is_ascii_digit())
}
