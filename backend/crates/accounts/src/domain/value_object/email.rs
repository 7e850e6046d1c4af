//! Email Value Object
//!
//! Normalized (trimmed, lowercased) email address. Format is checked by the
//! entity validation so that rule order stays fixed.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
