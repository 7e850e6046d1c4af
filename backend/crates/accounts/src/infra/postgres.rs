//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WalletId};
use sqlx::PgPool;

use crate::domain::entity::{
    user::{NewUser, User},
    wallet::{NewWallet, Wallet},
};
use crate::domain::repository::{UserRepository, WalletRepository};
use crate::domain::value_object::{
    email::Email, password::PasswordDigest, tax_document::TaxDocument, user_role::UserRole,
};
use crate::error::{AccountsError, AccountsResult};

/// PostgreSQL-backed account store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_user_where(
        &self,
        column: &'static str,
        value: &str,
    ) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT
                id,
                fullname,
                role,
                cpf,
                cnpj,
                email,
                password_hash,
                created_at,
                updated_at
            FROM users
            WHERE {column} = $1
            "#
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

/// Translate named constraint violations into domain conflicts
fn map_write_error(err: sqlx::Error) -> AccountsError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("users_email_key") => return AccountsError::EmailTaken,
                Some("users_cpf_key") => return AccountsError::CpfTaken,
                Some("users_cnpj_key") => return AccountsError::CnpjTaken,
                Some("wallets_user_id_key") => return AccountsError::WalletAlreadyExists,
                _ => {}
            }
        }
        if db_err.is_foreign_key_violation() && db_err.constraint() == Some("wallets_user_id_fkey")
        {
            return AccountsError::UserNotFound;
        }
    }
    AccountsError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountStore {
    async fn save(&self, user: &NewUser) -> AccountsResult<UserId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (
                fullname,
                role,
                cpf,
                cnpj,
                email,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&user.full_name)
        .bind(user.role().code())
        .bind(user.document.cpf())
        .bind(user.document.cnpj())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(UserId::new(id))
    }

    async fn find_by_cpf(&self, cpf: &str) -> AccountsResult<Option<User>> {
        self.find_user_where("cpf", cpf).await
    }

    async fn find_by_cnpj(&self, cnpj: &str) -> AccountsResult<Option<User>> {
        self.find_user_where("cnpj", cnpj).await
    }

    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>> {
        self.find_user_where("email", email.as_str()).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                fullname,
                role,
                cpf,
                cnpj,
                email,
                password_hash,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn delete(&self, user_id: UserId) -> AccountsResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Wallet Repository Implementation
// ============================================================================

impl WalletRepository for PgAccountStore {
    async fn save(&self, wallet: &NewWallet) -> AccountsResult<WalletId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO wallets (
                user_id,
                active,
                balance,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(wallet.user_id.value())
        .bind(wallet.active)
        .bind(wallet.balance)
        .bind(wallet.created_at)
        .bind(wallet.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(WalletId::new(id))
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AccountsResult<Option<Wallet>> {
        let row = sqlx::query_as::<_, WalletRow>(
            r#"
            SELECT
                id,
                user_id,
                active,
                balance,
                created_at,
                updated_at
            FROM wallets
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WalletRow::into_wallet))
    }

    async fn find_users_without_wallet(&self, limit: i64) -> AccountsResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT u.id
            FROM users u
            LEFT JOIN wallets w ON w.user_id = u.id
            WHERE w.id IS NULL
            ORDER BY u.id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(UserId::new).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    fullname: String,
    role: String,
    cpf: Option<String>,
    cnpj: Option<String>,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountsResult<User> {
        let role = UserRole::from_code(&self.role).ok_or_else(|| {
            AccountsError::Internal(format!("user {} has unknown role {:?}", self.id, self.role))
        })?;

        let document = TaxDocument::from_stored(role, self.cpf, self.cnpj).ok_or_else(|| {
            AccountsError::Internal(format!("user {} has no document for role {}", self.id, role))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            full_name: self.fullname,
            document,
            email: Email::new(self.email),
            password_hash: PasswordDigest::new(self.password_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WalletRow {
    id: i64,
    user_id: i64,
    active: bool,
    balance: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WalletRow {
    fn into_wallet(self) -> Wallet {
        Wallet {
            id: WalletId::new(self.id),
            user_id: UserId::new(self.user_id),
            active: self.active,
            balance: self.balance,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
