//! `oxy build`: run the build pipeline in the workspace image.

use std::num::NonZeroUsize;

use anyhow::Result;
use clap::Args;
use oxy_common::Project;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::build::{BuildOptions, run_pipeline};
use crate::application::services::sandbox::Sandbox;
use crate::domain::require_container;

/// Arguments for the `oxy build` command.
#[derive(Args)]
pub struct BuildArgs {
    /// Projects to build (default: all); always built in dependency order
    #[arg(value_enum)]
    pub targets: Vec<Project>,

    /// Skip cloning/fetching the sources
    #[arg(long)]
    pub no_fetch: bool,

    /// Parallel make jobs (default: number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,
}

impl BuildArgs {
    fn options(&self) -> BuildOptions {
        let jobs = self
            .jobs
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get);
        BuildOptions {
            targets: self.targets.clone(),
            fetch: !self.no_fetch,
            jobs,
        }
    }
}

/// Run `oxy build`.
///
/// # Errors
///
/// Returns an error if no image is registered or any stage fails.
pub async fn run(args: &BuildArgs, app: &AppContext) -> Result<()> {
    let config = app.config_store()?.load();
    require_container(&config)?;

    let opts = args.options();
    tracing::debug!(?opts, "starting build");
    let sandbox = Sandbox::new(&*app.registry, &config, app.container_id.clone(), false);
    run_pipeline(
        &app.runner,
        &app.fs,
        &sandbox,
        &opts,
        &app.terminal_reporter(),
    )
    .await?;
    Ok(())
}
