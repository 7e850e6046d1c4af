//! Wallet Entity
//!
//! The financial account opened alongside each user.

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WalletId};
use serde::Serialize;

use crate::domain::validation::ValidationError;

/// Wallet about to be persisted (no id yet)
#[derive(Debug, Clone)]
pub struct NewWallet {
    pub user_id: UserId,
    pub active: bool,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewWallet {
    /// Active wallet with an opening balance
    pub fn opening(user_id: UserId, balance: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            active: true,
            balance,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.user_id.is_assigned() {
            return Err(ValidationError::InvalidUserId);
        }

        if self.balance < 0 {
            return Err(ValidationError::NegativeBalance);
        }

        Ok(())
    }

    pub fn into_wallet(self, id: WalletId) -> Wallet {
        Wallet {
            id,
            user_id: self.user_id,
            active: self.active,
            balance: self.balance,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Persisted wallet
#[derive(Debug, Clone, Serialize)]
pub struct Wallet {
    pub id: WalletId,
    pub user_id: UserId,
    pub active: bool,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_wallet_is_active() {
        let wallet = NewWallet::opening(UserId::new(1), 0);
        assert!(wallet.active);
        assert_eq!(wallet.balance, 0);
        assert_eq!(wallet.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_unassigned_user() {
        assert_eq!(
            NewWallet::opening(UserId::new(0), 0).validate(),
            Err(ValidationError::InvalidUserId)
        );
    }

    #[test]
    fn test_rejects_negative_balance() {
        assert_eq!(
            NewWallet::opening(UserId::new(1), -1).validate(),
            Err(ValidationError::NegativeBalance)
        );
    }
}
