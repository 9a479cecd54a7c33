//! Registry of containers spawned on the user's behalf.
//!
//! Every container id is registered before its container starts and must be
//! torn down (kill + remove) before the process exits, whether the exit is
//! normal or signal-induced. Registration, unregistration and the bulk
//! release all serialize on one exclusive lock; the set is small and
//! contention only happens when a signal races a finishing build stage.
//!
//! Ids drained by a bulk release are remembered. The docker daemon may still
//! create a container whose `docker run` was in flight when the release ran;
//! [`ContainerRegistry::sweep_released`] tears those ids down once more after
//! the interrupted command has been abandoned.

use std::collections::{BTreeSet, HashSet};
use std::process::Output;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::application::ports::ContainerRuntime;

/// Tracks live container ids and guarantees their forced removal.
pub struct ContainerRegistry<C> {
    runtime: C,
    live: Mutex<HashSet<String>>,
    released: Mutex<BTreeSet<String>>,
}

impl<C: ContainerRuntime> ContainerRegistry<C> {
    #[must_use]
    pub fn new(runtime: C) -> Self {
        Self {
            runtime,
            live: Mutex::new(HashSet::new()),
            released: Mutex::new(BTreeSet::new()),
        }
    }

    /// The runtime used to start and tear down containers.
    pub fn runtime(&self) -> &C {
        &self.runtime
    }

    /// Track `id`. Registering an id twice keeps a single entry.
    pub async fn register(&self, id: &str) {
        let mut live = self.live.lock().await;
        if !live.insert(id.to_string()) {
            tracing::debug!(container = id, "container already registered");
        }
    }

    /// Kill and remove `id` (best effort), then stop tracking it.
    ///
    /// Returns `false` without touching the runtime when `id` is not
    /// tracked, e.g. because a signal-triggered release got there first.
    pub async fn unregister(&self, id: &str) -> bool {
        let mut live = self.live.lock().await;
        if !live.contains(id) {
            return false;
        }
        self.teardown(id).await;
        live.remove(id);
        true
    }

    /// Tear down every tracked container. The lock is held for the whole
    /// drain, so no registration can interleave. Idempotent; returns the
    /// number of containers released.
    pub async fn release_all(&self) -> usize {
        let mut live = self.live.lock().await;
        let mut ids: Vec<String> = live.iter().cloned().collect();
        ids.sort();
        for id in &ids {
            self.teardown(id).await;
            live.remove(id);
        }
        if !ids.is_empty() {
            tracing::info!(count = ids.len(), "released spawned containers");
            self.released.lock().await.extend(ids.iter().cloned());
        }
        ids.len()
    }

    /// Kill and remove every id drained by [`ContainerRegistry::release_all`]
    /// again, catching containers created after their first teardown. Each
    /// drained id is swept once; returns the number swept.
    pub async fn sweep_released(&self) -> usize {
        let ids = std::mem::take(&mut *self.released.lock().await);
        for id in &ids {
            self.teardown(id).await;
        }
        if !ids.is_empty() {
            tracing::debug!(count = ids.len(), "swept released containers");
        }
        ids.len()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.live.lock().await.contains(id)
    }

    pub async fn len(&self) -> usize {
        self.live.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.live.lock().await.is_empty()
    }

    async fn teardown(&self, id: &str) {
        log_cleanup(id, "kill", self.runtime.kill(id).await);
        log_cleanup(id, "rm", self.runtime.remove(id).await);
    }
}

/// Cleanup never fails the caller; outcomes are only logged.
fn log_cleanup(id: &str, action: &str, result: Result<Output>) {
    match result {
        Ok(output) if output.status.success() => {
            tracing::debug!(container = id, action, "container cleanup ok");
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.contains("No such container") || stderr.contains("is not running") {
                // `docker run --rm` already removed it
                tracing::debug!(container = id, action, "container already gone");
            } else {
                tracing::warn!(container = id, action, stderr, "container cleanup failed");
            }
        }
        Err(e) => {
            tracing::warn!(container = id, action, error = %format!("{e:#}"), "container cleanup failed");
        }
    }
}
