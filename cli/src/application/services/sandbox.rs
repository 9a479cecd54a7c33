//! Tracked execution of commands inside the build container.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::process::ExitStatus;

use anyhow::{Context, Result};
use oxy_common::WorkspaceConfig;

use crate::application::ports::ContainerRuntime;
use crate::application::services::registry::ContainerRegistry;
use crate::domain::{CommandError, CommandSpec, ContainerRun, require_container};

/// Runs commands in ephemeral containers built from the workspace image.
///
/// Each command gets its own container; its id is registered before the
/// container starts and unregistered (killed and removed) once it exits.
pub struct Sandbox<'a, C> {
    registry: &'a ContainerRegistry<C>,
    config: &'a WorkspaceConfig,
    container_id: String,
    interactive: bool,
}

impl<'a, C: ContainerRuntime> Sandbox<'a, C> {
    pub fn new(
        registry: &'a ContainerRegistry<C>,
        config: &'a WorkspaceConfig,
        container_id: String,
        interactive: bool,
    ) -> Self {
        Self {
            registry,
            config,
            container_id,
            interactive,
        }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        self.config
    }

    /// Run `command` in a fresh container and return its exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if no container image is registered or the
    /// container cannot be started.
    pub async fn exec_status(&self, command: CommandSpec) -> Result<ExitStatus> {
        require_container(self.config)?;
        let run = ContainerRun::for_workspace(
            self.config,
            self.container_id.clone(),
            command,
            self.interactive,
        );
        tracing::debug!(container = %run.id, image = %run.image, command = %run.command, "starting container");

        self.registry.register(&run.id).await;
        let status = self.registry.runtime().run(&run).await;
        self.registry.unregister(&run.id).await;

        status.with_context(|| format!("running '{}' in image {}", run.command, run.image))
    }

    /// Run `command` in a fresh container; a non-zero exit is an error.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` when the command fails, or any error of
    /// [`Sandbox::exec_status`].
    pub async fn exec(&self, command: CommandSpec) -> Result<()> {
        let display = command.to_string();
        let status = self.exec_status(command).await?;
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::from_code(display, status.code()).into())
        }
    }
}
