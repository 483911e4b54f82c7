//! # Persistence Calls
//!
//! Every store call the session makes runs through [`guarded`]:
//!
//! - **Lockout**: a shared busy flag is raised for the duration of the call;
//!   the UI reads it to disable save/restore controls, and a second call
//!   while one is in flight is refused with [`PersistError::Busy`]
//! - **Timeout**: calls longer than the configured limit fail with
//!   [`PersistError::TimedOut`]
//! - **Cancellation**: [`CancelHandle::cancel`] aborts the call in flight
//!
//! The busy flag is released by a drop guard, so dropping the session's
//! future mid-call also unlocks the controls.

use crate::store::StoreError;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOp {
    LoadDocument,
    SaveDocument,
    ListVersions,
    SaveVersion,
    DeleteVersion,
}

impl fmt::Display for PersistOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PersistOp::LoadDocument => "load page",
            PersistOp::SaveDocument => "save page",
            PersistOp::ListVersions => "list versions",
            PersistOp::SaveVersion => "save version",
            PersistOp::DeleteVersion => "delete version",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Could not {op}: {source}")]
    Store {
        op: PersistOp,
        #[source]
        source: StoreError,
    },

    #[error("Could not {0}: timed out")]
    TimedOut(PersistOp),

    #[error("Could not {0}: cancelled")]
    Cancelled(PersistOp),

    #[error("Could not {0}: another save or load is in progress")]
    Busy(PersistOp),
}

impl PersistError {
    pub fn op(&self) -> PersistOp {
        match self {
            PersistError::Store { op, .. } => *op,
            PersistError::TimedOut(op) | PersistError::Cancelled(op) | PersistError::Busy(op) => *op,
        }
    }
}

/// Shared "persistence call in flight" flag
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard(self.0.clone()))
    }
}

struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Cancels whatever persistence call is in flight. A no-op when idle.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<Notify>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.notify_waiters();
    }
}

/// Run one store call under lockout, timeout and cancellation
pub(crate) async fn guarded<T, F>(
    op: PersistOp,
    busy: &BusyFlag,
    cancel: &CancelHandle,
    timeout: Duration,
    call: F,
) -> Result<T, PersistError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    let _guard = busy.acquire().ok_or(PersistError::Busy(op))?;

    tokio::select! {
        result = tokio::time::timeout(timeout, call) => match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(PersistError::Store { op, source }),
            Err(_) => Err(PersistError::TimedOut(op)),
        },
        _ = cancel.0.notified() => Err(PersistError::Cancelled(op)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guarded_success_releases_flag() {
        let busy = BusyFlag::default();
        let cancel = CancelHandle::default();

        let value = guarded(PersistOp::SaveDocument, &busy, &cancel, Duration::from_secs(1), async {
            Ok::<_, StoreError>(42)
        })
        .await
        .unwrap();

        assert_eq!(value, 42);
        assert!(!busy.is_busy());
    }

    #[tokio::test]
    async fn test_guarded_times_out() {
        let busy = BusyFlag::default();
        let cancel = CancelHandle::default();

        let result = guarded(PersistOp::SaveDocument, &busy, &cancel, Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, StoreError>(())
        })
        .await;

        assert!(matches!(result, Err(PersistError::TimedOut(PersistOp::SaveDocument))));
        assert!(!busy.is_busy());
    }

    #[tokio::test]
    async fn test_guarded_cancel() {
        let busy = BusyFlag::default();
        let cancel = CancelHandle::default();
        let canceller = cancel.clone();

        let call = guarded(PersistOp::SaveVersion, &busy, &cancel, Duration::from_secs(5), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, StoreError>(())
        });
        let (result, _) = tokio::join!(call, async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        assert!(matches!(result, Err(PersistError::Cancelled(PersistOp::SaveVersion))));
        assert!(!busy.is_busy());
    }

    #[tokio::test]
    async fn test_second_call_while_busy_is_refused() {
        let busy = BusyFlag::default();
        let cancel = CancelHandle::default();
        let _held = busy.acquire().unwrap();

        let result = guarded(PersistOp::LoadDocument, &busy, &cancel, Duration::from_secs(1), async {
            Ok::<_, StoreError>(())
        })
        .await;

        assert!(matches!(result, Err(PersistError::Busy(PersistOp::LoadDocument))));
        assert!(busy.is_busy());
    }
}
