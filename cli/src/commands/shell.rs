//! `oxy shell`: run a command inside the build container.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use oxy_common::CONTAINER_ROOT;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::sandbox::Sandbox;
use crate::domain::{CommandSpec, require_container};

/// Program started when no command is given.
pub const DEFAULT_SHELL: &str = "bash";

/// Arguments for the shell command.
#[derive(Args)]
#[command(trailing_var_arg = true)]
pub struct ShellArgs {
    /// Command and arguments to run (default: bash)
    #[arg(allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// The in-container command for `argv`, run from the container root.
#[must_use]
pub fn shell_command(argv: &[String]) -> CommandSpec {
    CommandSpec::from_argv(argv)
        .unwrap_or_else(|| CommandSpec::new(DEFAULT_SHELL))
        .current_dir(CONTAINER_ROOT)
}

/// Run a command inside the build container.
///
/// Passes stdin, stdout, and stderr through transparently. When stdin is a
/// terminal, allocates a TTY in the container (`docker run -it`). The
/// command's exit code becomes ours.
///
/// # Errors
///
/// Returns an error if no image is registered or the container cannot start.
pub async fn run(args: &ShellArgs, app: &AppContext) -> Result<ExitCode> {
    let config = app.config_store()?.load();
    require_container(&config)?;

    let interactive = std::io::stdin().is_terminal();
    let sandbox = Sandbox::new(&*app.registry, &config, app.container_id.clone(), interactive);
    let status = sandbox.exec_status(shell_command(&args.command)).await?;

    let code = status.code().unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
