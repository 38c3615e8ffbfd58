// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Per-call deadlines and cancellation.
//!
//! Every bit store and client operation takes a [`Context`]. A context may carry
//! a deadline, a cancellation signal, both, or neither. Operations check the
//! context before starting and race their I/O against it, failing with
//! [`BloomError::Cancelled`] as soon as either fires. Nothing is retried.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{BloomError, BloomResult, CancelReason};

/// Deadline and cancellation carried into an operation.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Handle used to cancel every context derived from [`Context::with_cancel`].
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    /// A context that never expires and cannot be cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    /// A cancellable context together with the handle that cancels it.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            cancel: Some(receiver),
        };
        (ctx, CancelHandle { sender })
    }

    /// Returns a copy of this context that also expires at `deadline`.
    ///
    /// The earlier of the two deadlines wins.
    pub fn and_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        };
        Self {
            deadline: Some(deadline),
            cancel: self.cancel.clone(),
        }
    }

    /// Returns a copy of this context that expires after `timeout` unless it
    /// already carries a deadline.
    pub fn or_timeout(&self, timeout: Duration) -> Self {
        match self.deadline {
            Some(_) => self.clone(),
            None => self.and_deadline(Instant::now() + timeout),
        }
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails if the deadline has passed or cancellation was signalled.
    pub fn check(&self) -> BloomResult<()> {
        if let Some(cancel) = &self.cancel {
            if *cancel.borrow() {
                return Err(BloomError::Cancelled(CancelReason::Cancelled));
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(BloomError::Cancelled(CancelReason::DeadlineExceeded));
            }
        }
        Ok(())
    }

    /// Runs `operation` unless the context fires first.
    ///
    /// When the deadline or cancellation wins the race, `operation` is dropped
    /// and the call fails with [`BloomError::Cancelled`].
    pub async fn run<F, T>(&self, operation: F) -> BloomResult<T>
    where
        F: Future<Output = BloomResult<T>>,
    {
        self.check()?;

        let deadline = self.deadline;
        let mut cancel = self.cancel.clone();

        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        let cancelled = async move {
            if let Some(receiver) = cancel.as_mut() {
                while !*receiver.borrow_and_update() {
                    if receiver.changed().await.is_err() {
                        // The handle is gone without cancelling; it never will.
                        break;
                    }
                }
                if *receiver.borrow() {
                    return;
                }
            }
            std::future::pending::<()>().await
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(BloomError::Cancelled(CancelReason::Cancelled)),
            _ = expired => Err(BloomError::Cancelled(CancelReason::DeadlineExceeded)),
            result = operation => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_never_fires() {
        assert!(Context::background().check().is_ok());
        assert!(Context::background().deadline().is_none());
    }

    #[tokio::test]
    async fn test_expired_deadline_fails_check() {
        let ctx = Context::with_deadline(Instant::now() - Duration::from_millis(1));
        let err = ctx.check().unwrap_err();
        assert!(matches!(err, BloomError::Cancelled(CancelReason::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_cancel_fails_check() {
        let (ctx, handle) = Context::with_cancel();
        assert!(ctx.check().is_ok());
        handle.cancel();
        let err = ctx.check().unwrap_err();
        assert!(matches!(err, BloomError::Cancelled(CancelReason::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_completes_before_deadline() {
        let ctx = Context::with_timeout(Duration::from_secs(5));
        let value = ctx.run(async { Ok::<_, BloomError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out() {
        let ctx = Context::with_timeout(Duration::from_millis(50));
        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, BloomError>(())
            })
            .await;
        assert!(matches!(
            result,
            Err(BloomError::Cancelled(CancelReason::DeadlineExceeded))
        ));
    }

    #[tokio::test]
    async fn test_run_observes_cancellation() {
        let (ctx, handle) = Context::with_cancel();
        let task = tokio::spawn(async move {
            ctx.run(async {
                std::future::pending::<()>().await;
                Ok::<_, BloomError>(())
            })
            .await
        });
        tokio::task::yield_now().await;
        handle.cancel();
        let result = task.await.unwrap();
        assert!(matches!(result, Err(BloomError::Cancelled(CancelReason::Cancelled))));
    }

    #[tokio::test]
    async fn test_dropped_handle_never_cancels() {
        let (ctx, handle) = Context::with_cancel();
        drop(handle);
        let value = ctx.run(async { Ok::<_, BloomError>("done") }).await.unwrap();
        assert_eq!(value, "done");
    }

    #[test]
    fn test_and_deadline_keeps_earlier() {
        let now = Instant::now();
        let ctx = Context::with_deadline(now + Duration::from_secs(1));
        let later = ctx.and_deadline(now + Duration::from_secs(10));
        assert_eq!(later.deadline(), Some(now + Duration::from_secs(1)));
        let earlier = ctx.and_deadline(now + Duration::from_millis(10));
        assert_eq!(earlier.deadline(), Some(now + Duration::from_millis(10)));
    }

    #[test]
    fn test_or_timeout_respects_existing_deadline() {
        let now = Instant::now();
        let ctx = Context::with_deadline(now + Duration::from_secs(1));
        assert_eq!(
            ctx.or_timeout(Duration::from_secs(30)).deadline(),
            Some(now + Duration::from_secs(1))
        );
        assert!(Context::background()
            .or_timeout(Duration::from_secs(30))
            .deadline()
            .is_some());
    }
}
