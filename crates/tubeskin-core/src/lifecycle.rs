//! Mount-scoped cancellation and the process-wide embed readiness gate

use crate::{Error, Result};
use std::future::Future;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Cancellation scope of one mounted player view.
///
/// Background work started for the view (progress polling, hover timers)
/// takes a child token; [`MountScope::unmount`] cancels all of them.
#[derive(Debug, Default)]
pub struct MountScope {
    root: CancellationToken,
}

impl MountScope {
    pub fn new() -> Self {
        Self {
            root: CancellationToken::new(),
        }
    }

    /// Token for one piece of background work
    pub fn child(&self) -> CancellationToken {
        self.root.child_token()
    }

    pub fn is_mounted(&self) -> bool {
        !self.root.is_cancelled()
    }

    /// Cancel everything tied to this mount. Returns false if already unmounted.
    pub fn unmount(&self) -> bool {
        if self.root.is_cancelled() {
            return false;
        }
        self.root.cancel();
        true
    }
}

impl Drop for MountScope {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

/// One-time initializer shared by every player view in the process.
///
/// Concurrent waiters share a single initialization. A failed initialization
/// leaves the gate empty so the next waiter tries again.
#[derive(Debug)]
pub struct ReadyGate {
    cell: OnceCell<()>,
}

impl ReadyGate {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }

    /// Wait until ready, running `init` if nobody has succeeded yet
    pub async fn ready<F, Fut>(&self, init: F) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        if self.cell.initialized() {
            return Ok(());
        }
        self.cell
            .get_or_try_init(move || async move {
                debug!("Initializing embed API");
                init().await?;
                info!("Embed API ready");
                Ok::<(), Error>(())
            })
            .await
            .map(|_| ())
    }
}

impl Default for ReadyGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_unmount_cancels_children() {
        let scope = MountScope::new();
        let poll = scope.child();
        let hover = scope.child();

        assert!(scope.is_mounted());
        assert!(scope.unmount());

        assert!(poll.is_cancelled());
        assert!(hover.is_cancelled());
        assert!(!scope.is_mounted());
        assert!(!scope.unmount());
    }

    #[test]
    fn test_drop_cancels_children() {
        let token = {
            let scope = MountScope::new();
            scope.child()
        };
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_ready_gate_runs_once() {
        let gate = Arc::new(ReadyGate::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let gate = gate.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                gate.ready(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                    Ok(())
                })
                .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(gate.is_ready());
    }

    #[tokio::test]
    async fn test_ready_gate_retries_after_failure() {
        let gate = ReadyGate::new();

        let err = gate
            .ready(|| async { Err(Error::api_load("network")) })
            .await
            .unwrap_err();
        assert!(err.is_recoverable());
        assert!(!gate.is_ready());

        gate.ready(|| async { Ok(()) }).await.unwrap();
        assert!(gate.is_ready());
    }
}
