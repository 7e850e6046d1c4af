//! Request Context
//!
//! Deadline and cancellation for one unit of work. Every storage call and
//! every hash runs through [`RequestContext::run`].

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{AccountsError, AccountsResult};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels every context cloned from the one it was created with
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

impl RequestContext {
    /// No deadline, never cancelled
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    /// Attach a cancellation signal
    pub fn with_cancellation(self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                cancel: Some(rx),
                ..self
            },
            CancelHandle(tx),
        )
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drive `future` unless the deadline passes or the context is cancelled
    /// first. An already-expired or already-cancelled context fails without
    /// polling the future.
    pub async fn run<T, F>(&self, operation: &'static str, future: F) -> AccountsResult<T>
    where
        F: Future<Output = AccountsResult<T>>,
    {
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        let cancelled = async {
            match &self.cancel {
                Some(rx) => {
                    let mut rx = rx.clone();
                    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                        // handle dropped without cancelling
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => {
                tracing::debug!(operation, "Operation cancelled");
                Err(AccountsError::Cancelled { operation })
            }
            _ = expired => Err(AccountsError::DeadlineExceeded { operation }),
            result = future => result,
        }
    }
}
