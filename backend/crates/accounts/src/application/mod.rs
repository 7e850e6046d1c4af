//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod context;
pub mod login;
pub mod profile;
pub mod reconcile;
pub mod sign_up;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AccountsConfig;
pub use context::{CancelHandle, RequestContext};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{Profile, ProfileUseCase};
pub use reconcile::ReconcileWalletsUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use wallet::WalletService;
