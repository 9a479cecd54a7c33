//! Host-side checkout of the three upstream repositories.

use std::path::Path;

use anyhow::{Context, Result};
use oxy_common::Project;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::{CommandError, CommandSpec};

/// Git command that brings `project` up to date under `src_dir`: a clone
/// when the checkout is missing, otherwise a fetch of all remotes.
#[must_use]
pub fn sync_command(project: Project, src_dir: &Path, exists: bool) -> CommandSpec {
    let dir = src_dir.join(project.name());
    if exists {
        CommandSpec::new("git").args(["fetch", "--all"]).current_dir(dir)
    } else {
        CommandSpec::new("git")
            .args(["clone", project.repo_url()])
            .arg(dir.display().to_string())
    }
}

/// Clone or update every project, in build order. The first failure aborts.
///
/// # Errors
///
/// Returns an error naming the repository when git fails.
pub async fn sync_sources(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    src_dir: &Path,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    for project in Project::ALL {
        reporter.step(&format!("fetching repo [{}]...", project.repo_url()));
        let exists = fs.exists(&src_dir.join(project.name()));
        let spec = sync_command(project, src_dir, exists);
        run_checked(runner, &spec)
            .await
            .with_context(|| format!("fetching {} from {}", project, project.repo_url()))?;
    }
    Ok(())
}

/// Run a host command with inherited stdio; a non-zero exit is an error.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or does not succeed.
pub async fn run_checked(runner: &impl CommandRunner, spec: &CommandSpec) -> Result<()> {
    let status = runner.run_status(spec).await?;
    if status.success() {
        Ok(())
    } else {
        Err(CommandError::from_code(spec.to_string(), status.code()).into())
    }
}
