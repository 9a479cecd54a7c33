//! Infrastructure implementation of the `ContainerRuntime` port.
//!
//! `DockerRuntime<R>` routes every docker CLI call through a `CommandRunner`.
//! Long-running calls (`pull`, `build`, `run`) inherit stdio and have no
//! timeout; teardown calls (`kill`, `rm`) are captured and time-boxed.

use std::path::Path;
use std::process::{ExitStatus, Output};

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ContainerRuntime};
use crate::domain::{CommandError, CommandSpec, ContainerRun};
use crate::infra::command_runner::TokioCommandRunner;

/// Name of the container engine CLI.
pub const DOCKER: &str = "docker";

/// Infrastructure adapter that drives the docker CLI.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct DockerRuntime<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> DockerRuntime<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn run_checked(&self, spec: CommandSpec) -> Result<()> {
        let status = self.runner.run_status(&spec).await?;
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::from_code(spec.to_string(), status.code()).into())
        }
    }
}

impl DockerRuntime<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> ContainerRuntime for DockerRuntime<R> {
    async fn pull(&self, image: &str) -> Result<()> {
        self.run_checked(CommandSpec::new(DOCKER).args(["pull", image]))
            .await
            .with_context(|| format!("docker pull {image}"))
    }

    async fn build_image(&self, tag: &str, context_dir: &Path) -> Result<()> {
        let spec = CommandSpec::new(DOCKER)
            .args(["build", "--rm", "-t", tag, "."])
            .current_dir(context_dir);
        self.run_checked(spec)
            .await
            .with_context(|| format!("docker build {tag}"))
    }

    async fn run(&self, run: &ContainerRun) -> Result<ExitStatus> {
        let spec = CommandSpec::new(DOCKER).args(run.docker_args());
        self.runner
            .run_status(&spec)
            .await
            .with_context(|| format!("docker run {}", run.id))
    }

    async fn kill(&self, id: &str) -> Result<Output> {
        self.runner
            .run(&CommandSpec::new(DOCKER).args(["kill", id]))
            .await
            .context("docker kill")
    }

    async fn remove(&self, id: &str) -> Result<Output> {
        self.runner
            .run(&CommandSpec::new(DOCKER).args(["rm", id]))
            .await
            .context("docker rm")
    }
}
