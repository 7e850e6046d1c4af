//! Password Value Objects
//!
//! `RawPassword` is user input (zeroized on drop). `PasswordDigest` is the
//! self-describing string persisted in `users.password_hash`.
//! Delegates normalization to `platform::password`.

use platform::password::ClearTextPassword;
use std::fmt;

use crate::domain::validation::is_valid_password;

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    pub fn char_count(&self) -> usize {
        self.0.char_count()
    }

    pub fn meets_minimum_length(&self) -> bool {
        is_valid_password(self.char_count())
    }

    /// Explicit copy for moving into a blocking task
    pub fn duplicate(&self) -> Self {
        Self(self.0.duplicate())
    }

    pub fn as_clear_text(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password digest
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_length_counts_characters() {
        assert!(!RawPassword::new("12345".to_string()).meets_minimum_length());
        assert!(RawPassword::new("123456".to_string()).meets_minimum_length());
        // six characters, twelve bytes
        assert!(RawPassword::new("éééééé".to_string()).meets_minimum_length());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("password123".to_string());
        assert!(!format!("{:?}", raw).contains("password123"));

        let digest = PasswordDigest::new("$argon2id$v=19$secret");
        assert!(!format!("{:?}", digest).contains("secret"));
    }
}
