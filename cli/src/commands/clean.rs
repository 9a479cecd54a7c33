//! `oxy clean`: remove build products.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::clean::clean;
use crate::application::services::sandbox::Sandbox;
use crate::domain::require_container;

/// Arguments for the `oxy clean` command.
#[derive(Args)]
pub struct CleanArgs {
    /// fair-soft, fair-root, alice-o2 or a FairSoft external package
    /// (default: alice-o2 fair-root fair-soft)
    pub targets: Vec<String>,
}

/// Run `oxy clean`.
///
/// # Errors
///
/// Returns an error if no image is registered, a target is unknown, or a
/// clean command fails.
pub async fn run(args: &CleanArgs, app: &AppContext) -> Result<()> {
    let config = app.config_store()?.load();
    require_container(&config)?;

    let sandbox = Sandbox::new(&*app.registry, &config, app.container_id.clone(), false);
    clean(&app.fs, &sandbox, &args.targets, &app.terminal_reporter()).await?;
    Ok(())
}
