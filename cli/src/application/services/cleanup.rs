//! Signal-driven container cleanup.
//!
//! The OS signal is never handled inline: a dedicated task waits for the
//! shutdown future, releases the registry under its regular lock, and then
//! notifies the main task, which abandons the running command.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::application::ports::ContainerRuntime;
use crate::application::services::registry::ContainerRegistry;

/// Handle to the background cleanup task. Dropping it stops the task.
pub struct CleanupTask {
    signalled: Arc<AtomicBool>,
    released: Option<oneshot::Receiver<usize>>,
    handle: JoinHandle<()>,
}

/// Start the cleanup task. When `signal` resolves, every container tracked
/// by `registry` is torn down.
pub fn spawn<C, S>(registry: Arc<ContainerRegistry<C>>, signal: S) -> CleanupTask
where
    C: ContainerRuntime + 'static,
    S: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let signalled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&signalled);
    let handle = tokio::spawn(async move {
        signal.await;
        flag.store(true, Ordering::SeqCst);
        tracing::info!("shutdown signal received, removing spawned containers");
        let released = registry.release_all().await;
        let _ = tx.send(released);
    });
    CleanupTask {
        signalled,
        released: Some(rx),
        handle,
    }
}

impl CleanupTask {
    /// Whether the shutdown signal has arrived, even if the release is still
    /// in progress.
    #[must_use]
    pub fn signalled(&self) -> bool {
        self.signalled.load(Ordering::SeqCst)
    }

    /// Resolves after a signal arrived and the registry was released, with
    /// the number of containers torn down. Pending forever otherwise.
    pub async fn interrupted(&mut self) -> usize {
        let Some(rx) = self.released.as_mut() else {
            return std::future::pending().await;
        };
        let result = rx.await;
        self.released = None;
        match result {
            Ok(count) => count,
            Err(_) => std::future::pending().await,
        }
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
