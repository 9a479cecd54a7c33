//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.
//!
//! Async ports return `Send` futures so the container registry can be driven
//! from the signal cleanup task as well as from the main task.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;
use oxy_common::WorkspaceConfig;

use crate::domain::{CommandSpec, ContainerRun};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
pub trait CommandRunner: Send + Sync {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    fn run(&self, spec: &CommandSpec) -> impl Future<Output = Result<Output>> + Send;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    fn run_with_timeout(
        &self,
        spec: &CommandSpec,
        timeout: Duration,
    ) -> impl Future<Output = Result<Output>> + Send;

    /// Run a program with inherited stdio and no timeout; return its exit status.
    fn run_status(&self, spec: &CommandSpec) -> impl Future<Output = Result<ExitStatus>> + Send;
}

// ── Container Runtime Port ────────────────────────────────────────────────────

/// Container engine operations used by the build.
pub trait ContainerRuntime: Send + Sync {
    /// Fetch `image` from its registry.
    fn pull(&self, image: &str) -> impl Future<Output = Result<()>> + Send;

    /// Build `context_dir/Dockerfile` and tag the result `tag`.
    fn build_image(&self, tag: &str, context_dir: &Path)
    -> impl Future<Output = Result<()>> + Send;

    /// Start a container, stream its stdio, and wait for it to exit.
    fn run(&self, run: &ContainerRun) -> impl Future<Output = Result<ExitStatus>> + Send;

    /// Send SIGKILL to a running container.
    fn kill(&self, id: &str) -> impl Future<Output = Result<Output>> + Send;

    /// Remove a container.
    fn remove(&self, id: &str) -> impl Future<Output = Result<Output>> + Send;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config and Filesystem Ports ───────────────────────────────────────────────

/// Abstracts persistence of the workspace cache.
pub trait ConfigStore {
    /// Load the cache. Never fails: a missing or unreadable cache yields
    /// `WorkspaceConfig::default()`.
    fn load(&self) -> WorkspaceConfig;

    /// Persist `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be fully written.
    fn save(&self, config: &WorkspaceConfig) -> Result<()>;

    /// Location of the cache file.
    fn path(&self) -> PathBuf;
}

/// Abstracts local filesystem operations.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
