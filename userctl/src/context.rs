//! Per-call execution context carrying cancellation and deadline signals.
//!
//! Every repository operation takes an [`ExecutionContext`]. The context does not know anything
//! about SQL: it wraps the store future and races it against a [`CancellationToken`] and an
//! optional deadline. Whichever finishes first decides the outcome, and the losing store future is
//! dropped, which makes the driver abandon the statement.
//!
//! ```ignore
//! use std::time::Duration;
//! use userctl::context::ExecutionContext;
//!
//! let ctx = ExecutionContext::background().with_timeout(Duration::from_secs(5));
//! let user = users.get_by_id(&ctx, &"1".to_string()).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::db::errors::{DbError, Result};

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ExecutionContext {
    /// A context that is never cancelled unless [`ExecutionContext::cancel`] is called, and has no
    /// deadline.
    pub fn background() -> Self {
        Self::new(CancellationToken::new())
    }

    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel, deadline: None }
    }

    /// Bound the context by `timeout` from now. An earlier existing deadline is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Bound the context by `deadline`. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Derive a context whose cancellation follows this one, but which can be cancelled on its own
    /// without affecting the parent.
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `operation` to completion unless the context is cancelled or its deadline passes first.
    ///
    /// # Errors
    /// - [`DbError::Cancelled`] when the token fires first, including when it was already cancelled.
    /// - [`DbError::TimedOut`] when the deadline passes first.
    /// - Whatever `operation` itself returns otherwise.
    pub async fn run<F, T, E>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: Into<DbError>,
    {
        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(DbError::Cancelled),
                result = operation => result.map_err(Into::into),
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, guarded).await.map_err(|_| DbError::TimedOut)?,
            None => guarded.await,
        }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::background()
    }
}
