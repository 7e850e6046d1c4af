use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role, fixed at creation by the document supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Individual, identified by CPF
    Common,
    /// Business, identified by CNPJ
    Shopkeeper,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Common => "common",
            Shopkeeper => "shopkeeper",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "common" => Some(Common),
            "shopkeeper" => Some(Shopkeeper),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
