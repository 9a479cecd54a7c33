//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is constructed once in `main` and shared by the command
//! handlers and the signal cleanup task, which only needs the container
//! registry.

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::registry::ContainerRegistry;
use crate::domain::container::container_id;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config_store::JsonConfigStore;
use crate::infra::docker::DockerRuntime;
use crate::infra::fs::LocalFs;
use crate::output::{OutputContext, TerminalReporter};

/// Registry type used by the binary.
pub type DockerRegistry = ContainerRegistry<DockerRuntime<TokioCommandRunner>>;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Debug-level diagnostics.
    pub verbose: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Host-side process runner (git).
    pub runner: TokioCommandRunner,
    /// Local filesystem.
    pub fs: LocalFs,
    /// Containers started by this process; shared with the cleanup task.
    pub registry: Arc<DockerRegistry>,
    /// Name given to every container this process starts.
    pub container_id: String,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            runner: TokioCommandRunner::default(),
            fs: LocalFs,
            registry: Arc::new(ContainerRegistry::new(DockerRuntime::default_runner())),
            container_id: container_id(std::process::id()),
        }
    }

    /// Cache store of the workspace in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn config_store(&self) -> Result<JsonConfigStore> {
        JsonConfigStore::discover()
    }

    /// Progress reporter writing to the terminal.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
