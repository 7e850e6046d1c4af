//! Test doubles for the collaborator traits

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Utc;
use kernel::id::UserId;

use crate::application::wallet::WalletService;
use crate::domain::entity::wallet::Wallet;
use crate::domain::service::{
    CredentialHasher, TokenClaims, TokenIssuer, WalletProvisioner,
};
use crate::domain::value_object::password::{PasswordDigest, RawPassword};
use crate::error::{AccountsError, AccountsResult};
use crate::infra::memory::InMemoryAccountStore;

/// Deterministic, salt-free digest. Never use outside tests.
pub struct FakeHasher {
    hash_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    verified: Mutex<Vec<PasswordDigest>>,
    fail: AtomicBool,
    decoy: PasswordDigest,
}

impl Default for FakeHasher {
    fn default() -> Self {
        Self {
            hash_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            verified: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
            decoy: PasswordDigest::new("fake$decoy"),
        }
    }
}

impl FakeHasher {
    pub fn fail_hashing(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn hash_calls(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    /// A hasher whose decoy digest verifies for `password`
    pub fn with_decoy_matching(password: &str) -> Self {
        Self {
            decoy: Self::digest_of(&RawPassword::new(password.to_string())),
            ..Self::default()
        }
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// Digests passed to `verify`, in call order
    pub fn verified(&self) -> Vec<PasswordDigest> {
        self.verified.lock().unwrap().clone()
    }

    fn digest_of(password: &RawPassword) -> PasswordDigest {
        let mut state = DefaultHasher::new();
        password.as_clear_text().expose().hash(&mut state);
        PasswordDigest::new(format!("fake${:016x}", state.finish()))
    }
}

impl CredentialHasher for FakeHasher {
    async fn hash(&self, password: &RawPassword) -> AccountsResult<PasswordDigest> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AccountsError::PasswordHash("injected failure".to_string()));
        }
        Ok(Self::digest_of(password))
    }

    async fn verify(
        &self,
        password: &RawPassword,
        digest: &PasswordDigest,
    ) -> AccountsResult<bool> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verified.lock().unwrap().push(digest.clone());
        Ok(&Self::digest_of(password) == digest)
    }

    fn decoy_digest(&self) -> &PasswordDigest {
        &self.decoy
    }
}

/// Tokens of the form `token:<user id>:<ttl seconds>`
#[derive(Default)]
pub struct FakeTokenIssuer {
    issued: Mutex<Vec<(UserId, Duration)>>,
}

impl FakeTokenIssuer {
    pub fn issued(&self) -> Vec<(UserId, Duration)> {
        self.issued.lock().unwrap().clone()
    }
}

impl TokenIssuer for FakeTokenIssuer {
    fn generate_token(&self, subject: UserId, ttl: Duration) -> AccountsResult<String> {
        self.issued.lock().unwrap().push((subject, ttl));
        Ok(format!("token:{}:{}", subject, ttl.as_secs()))
    }

    fn validate_token(&self, token: &str) -> AccountsResult<TokenClaims> {
        let mut parts = token.split(':');
        let (Some("token"), Some(id), Some(ttl), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AccountsError::InvalidToken);
        };

        let id: i64 = id.parse().map_err(|_| AccountsError::InvalidToken)?;
        let ttl: i64 = ttl.parse().map_err(|_| AccountsError::InvalidToken)?;
        let now = Utc::now();

        Ok(TokenClaims {
            subject: UserId::new(id),
            issued_at: now,
            expires_at: now + chrono::Duration::seconds(ttl),
        })
    }
}

/// Real wallet service over the in-memory store, recording each request and
/// able to fail on demand
pub struct RecordingWalletProvisioner {
    inner: WalletService<InMemoryAccountStore>,
    requests: Mutex<Vec<(UserId, i64)>>,
    fail_next: AtomicBool,
}

impl RecordingWalletProvisioner {
    pub fn new(store: InMemoryAccountStore) -> Self {
        Self {
            inner: WalletService::new(std::sync::Arc::new(store)),
            requests: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<(UserId, i64)> {
        self.requests.lock().unwrap().clone()
    }
}

impl WalletProvisioner for RecordingWalletProvisioner {
    async fn create(&self, user_id: UserId, balance: i64) -> AccountsResult<Wallet> {
        self.requests.lock().unwrap().push((user_id, balance));
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AccountsError::Unavailable("wallet store offline".to_string()));
        }
        self.inner.create(user_id, balance).await
    }
}
