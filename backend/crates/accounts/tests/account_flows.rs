//! End-to-end account flows through the use cases, with real Argon2 and JWT

use std::sync::Arc;
use std::time::Duration;

use accounts::application::{
    AuthenticateUseCase, LoginInput, LoginUseCase, ReconcileWalletsUseCase, RequestContext,
    SignUpInput, SignUpUseCase, WalletService,
};
use accounts::domain::TokenIssuer;
use accounts::domain::value_object::user_role::UserRole;
use accounts::infra::{Argon2CredentialHasher, JwtTokenIssuer};
use accounts::{AccountsConfig, AccountsError, InMemoryAccountStore};

struct Harness {
    store: InMemoryAccountStore,
    config: Arc<AccountsConfig>,
    hasher: Arc<Argon2CredentialHasher>,
    tokens: Arc<JwtTokenIssuer>,
}

impl Harness {
    fn new() -> Self {
        let config = AccountsConfig::development();
        let hasher = Argon2CredentialHasher::new(config.password_cost, config.pepper()).unwrap();
        let tokens = JwtTokenIssuer::new(&config).unwrap();
        Self {
            store: InMemoryAccountStore::new(),
            config: Arc::new(config),
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
        }
    }

    fn sign_up(
        &self,
    ) -> SignUpUseCase<
        InMemoryAccountStore,
        WalletService<InMemoryAccountStore>,
        Argon2CredentialHasher,
    > {
        let repo = Arc::new(self.store.clone());
        SignUpUseCase::new(
            repo.clone(),
            Arc::new(WalletService::new(repo)),
            self.hasher.clone(),
            self.config.clone(),
        )
    }

    fn login(&self) -> LoginUseCase<InMemoryAccountStore, Argon2CredentialHasher, JwtTokenIssuer> {
        LoginUseCase::new(
            Arc::new(self.store.clone()),
            self.hasher.clone(),
            self.tokens.clone(),
            self.config.clone(),
        )
    }
}

fn john() -> SignUpInput {
    SignUpInput {
        full_name: "John Doe".to_string(),
        cpf: Some("12345678901".to_string()),
        cnpj: None,
        email: "john@example.com".to_string(),
        password: "password123".to_string(),
    }
}

fn ctx() -> RequestContext {
    RequestContext::with_timeout(Duration::from_secs(10))
}

#[tokio::test]
async fn signup_with_cpf_creates_common_user_and_empty_wallet() {
    let harness = Harness::new();

    let output = harness.sign_up().execute(&ctx(), john()).await.unwrap();

    let user = harness.store.user(output.user_id).unwrap();
    assert_eq!(user.role(), UserRole::Common);
    assert_eq!(user.document.cpf(), Some("12345678901"));
    assert_eq!(user.document.cnpj(), None);
    assert!(user.password_hash.as_str().starts_with("$argon2id$"));

    let wallet = harness.store.wallet_of(output.user_id).unwrap();
    assert_eq!(wallet.id, output.wallet_id);
    assert_eq!(wallet.balance, 0);
    assert!(wallet.active);
}

#[tokio::test]
async fn signup_with_both_documents_fails_before_any_lookup() {
    let harness = Harness::new();
    let input = SignUpInput {
        cnpj: Some("12345678000199".to_string()),
        email: "a@b.com".to_string(),
        ..john()
    };

    let err = harness.sign_up().execute(&ctx(), input).await.unwrap_err();

    assert!(matches!(err, AccountsError::ConflictingDocuments));
    assert!(harness.store.calls().is_empty());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let harness = Harness::new();
    harness.sign_up().execute(&ctx(), john()).await.unwrap();

    let err = harness
        .login()
        .execute(
            &ctx(),
            LoginInput {
                email: "john@example.com".to_string(),
                password: "wrongpass".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AccountsError::InvalidCredentials));
}

#[tokio::test]
async fn login_issues_token_for_configured_ttl() {
    let harness = Harness::new();
    let signed_up = harness.sign_up().execute(&ctx(), john()).await.unwrap();

    let output = harness
        .login()
        .execute(
            &ctx(),
            LoginInput {
                email: "John@Example.com".to_string(),
                password: "password123".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(!output.token.is_empty());

    let claims = harness.tokens.validate_token(&output.token).unwrap();
    assert_eq!(claims.subject, signed_up.user_id);
    assert_eq!(
        (claims.expires_at - claims.issued_at).num_seconds(),
        harness.config.token_ttl.as_secs() as i64
    );

    let user = AuthenticateUseCase::new(Arc::new(harness.store.clone()), harness.tokens.clone())
        .execute(&ctx(), &output.token)
        .await
        .unwrap();
    assert_eq!(user.id, signed_up.user_id);
}

#[tokio::test]
async fn reconciliation_opens_missing_wallets() {
    let harness = Harness::new();
    let orphan = harness.store.seed_user("orphan@example.com", "10987654321");
    harness.sign_up().execute(&ctx(), john()).await.unwrap();

    let repo = Arc::new(harness.store.clone());
    let created = ReconcileWalletsUseCase::new(repo.clone(), Arc::new(WalletService::new(repo)))
        .execute(&ctx())
        .await
        .unwrap();

    assert_eq!(created, 1);
    assert_eq!(harness.store.wallet_of(orphan).unwrap().balance, 0);
    assert_eq!(harness.store.wallet_count(), 2);
}
