//! Value Object Module

pub mod email;
pub mod password;
pub mod tax_document;
pub mod user_role;
