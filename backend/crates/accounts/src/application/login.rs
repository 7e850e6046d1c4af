//! Login Use Case
//!
//! Exchanges email and password for a bearer token.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::context::RequestContext;
use crate::domain::repository::UserRepository;
use crate::domain::service::{CredentialHasher, TokenIssuer};
use crate::domain::value_object::{email::Email, password::RawPassword};
use crate::error::{AccountsError, AccountsResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<U, H, T>
where
    U: UserRepository,
    H: CredentialHasher,
    T: TokenIssuer,
{
    user_repo: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    config: Arc<AccountsConfig>,
}

impl<U, H, T> LoginUseCase<U, H, T>
where
    U: UserRepository + Sync,
    H: CredentialHasher + Sync,
    T: TokenIssuer,
{
    pub fn new(
        user_repo: Arc<U>,
        hasher: Arc<H>,
        tokens: Arc<T>,
        config: Arc<AccountsConfig>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
            config,
        }
    }

    /// Unknown email and wrong password fail identically
    ///
    /// An unknown email is still verified against the hasher's decoy digest,
    /// so both failures take one password verification.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        input: LoginInput,
    ) -> AccountsResult<LoginOutput> {
        let email = Email::new(input.email);
        let password = RawPassword::new(input.password);

        let user = ctx
            .run("find_by_email", self.user_repo.find_by_email(&email))
            .await?;

        let digest = match &user {
            Some(user) => &user.password_hash,
            None => self.hasher.decoy_digest(),
        };
        let matches = ctx
            .run("verify_password", self.hasher.verify(&password, digest))
            .await?;

        let Some(user) = user.filter(|_| matches) else {
            return Err(AccountsError::InvalidCredentials);
        };

        let token = self.tokens.generate_token(user.id, self.config.token_ttl)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeHasher, FakeTokenIssuer};
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::tax_document::TaxDocument;
    use crate::infra::memory::InMemoryAccountStore;
    use kernel::error::kind::ErrorKind;
    use kernel::id::UserId;
    use std::time::Duration;

    struct Fixture {
        store: InMemoryAccountStore,
        hasher: Arc<FakeHasher>,
        tokens: Arc<FakeTokenIssuer>,
        use_case: LoginUseCase<InMemoryAccountStore, FakeHasher, FakeTokenIssuer>,
        john: UserId,
    }

    async fn fixture(config: AccountsConfig) -> Fixture {
        let store = InMemoryAccountStore::new();
        let hasher = Arc::new(FakeHasher::default());
        let tokens = Arc::new(FakeTokenIssuer::default());

        let digest = hasher
            .hash(&RawPassword::new("password123".to_string()))
            .await
            .unwrap();
        let john = UserRepository::save(
            &store,
            &NewUser::new(
                "John Doe",
                TaxDocument::Cpf("12345678901".to_string()),
                Email::new("john@example.com"),
                digest,
            ),
        )
        .await
        .unwrap();

        let use_case = LoginUseCase::new(
            Arc::new(store.clone()),
            hasher.clone(),
            tokens.clone(),
            Arc::new(config),
        );
        Fixture {
            store,
            hasher,
            tokens,
            use_case,
            john,
        }
    }

    fn input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_with_configured_ttl() {
        let f = fixture(AccountsConfig::default()).await;
        let output = f
            .use_case
            .execute(
                &RequestContext::background(),
                input("john@example.com", "password123"),
            )
            .await
            .unwrap();

        assert!(!output.token.is_empty());
        assert_eq!(f.tokens.issued(), vec![(f.john, Duration::from_secs(1800))]);
    }

    #[tokio::test]
    async fn test_ttl_is_configurable() {
        let config = AccountsConfig {
            token_ttl: Duration::from_secs(60),
            ..AccountsConfig::default()
        };
        let f = fixture(config).await;
        f.use_case
            .execute(
                &RequestContext::background(),
                input("john@example.com", "password123"),
            )
            .await
            .unwrap();

        assert_eq!(f.tokens.issued(), vec![(f.john, Duration::from_secs(60))]);
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let f = fixture(AccountsConfig::default()).await;
        let ctx = RequestContext::background();

        let unknown = f
            .use_case
            .execute(&ctx, input("nobody@example.com", "password123"))
            .await
            .unwrap_err();
        let wrong = f
            .use_case
            .execute(&ctx, input("john@example.com", "wrongpass"))
            .await
            .unwrap_err();

        assert_eq!(unknown.kind(), ErrorKind::Unauthorized);
        assert_eq!(wrong.kind(), ErrorKind::Unauthorized);
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(
            unknown.to_app_error().to_string(),
            wrong.to_app_error().to_string()
        );
        assert!(f.tokens.issued().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_email_still_verifies_once() {
        let f = fixture(AccountsConfig::default()).await;
        let ctx = RequestContext::background();

        f.use_case
            .execute(&ctx, input("nobody@example.com", "password123"))
            .await
            .unwrap_err();
        assert_eq!(f.hasher.verify_calls(), 1);
        assert_eq!(f.hasher.verified(), vec![f.hasher.decoy_digest().clone()]);

        f.use_case
            .execute(&ctx, input("john@example.com", "wrongpass"))
            .await
            .unwrap_err();
        assert_eq!(f.hasher.verify_calls(), 2);
    }

    #[tokio::test]
    async fn test_decoy_match_never_logs_in() {
        let f = fixture(AccountsConfig::default()).await;
        let use_case = LoginUseCase::new(
            Arc::new(f.store.clone()),
            Arc::new(FakeHasher::with_decoy_matching("password123")),
            f.tokens.clone(),
            Arc::new(AccountsConfig::default()),
        );

        let err = use_case
            .execute(
                &RequestContext::background(),
                input("nobody@example.com", "password123"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidCredentials));
        assert!(f.tokens.issued().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_masked() {
        let f = fixture(AccountsConfig::default()).await;
        f.store.set_offline(true);

        let err = f
            .use_case
            .execute(
                &RequestContext::background(),
                input("john@example.com", "password123"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_email_is_normalized() {
        let f = fixture(AccountsConfig::default()).await;
        let output = f
            .use_case
            .execute(
                &RequestContext::background(),
                input(" John@Example.COM ", "password123"),
            )
            .await;
        assert!(output.is_ok());
    }
}
