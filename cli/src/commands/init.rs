//! `oxy init`: create a workspace, fetch the sources and build the image.

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::workspace_init::init_workspace;
use crate::commands::init_container::build_image;
use crate::domain::dockerfile::DEFAULT_CONTAINER_NAME;
use crate::domain::workspace::resolve_workspace_dir;
use crate::infra::config_store::JsonConfigStore;

/// Arguments for the `oxy init` command.
#[derive(Args)]
pub struct InitArgs {
    /// Workspace directory; `$VAR` and `${VAR}` are expanded
    #[arg(default_value = ".")]
    pub dir: String,

    /// Tag of the build image to create
    #[arg(long, default_value = DEFAULT_CONTAINER_NAME)]
    pub container: String,

    /// Only fetch sources; run `oxy init-container` later
    #[arg(long)]
    pub no_container: bool,
}

/// Run `oxy init`.
///
/// # Errors
///
/// Returns an error if the layout cannot be created, a repository cannot be
/// fetched, or the image build fails.
pub async fn run(args: &InitArgs, app: &AppContext) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let dir = resolve_workspace_dir(&args.dir, &cwd, |name| std::env::var(name).ok());
    let store = JsonConfigStore::in_dir(&dir);
    let reporter = app.terminal_reporter();

    let config = init_workspace(&app.runner, &app.fs, &store, &dir, &reporter).await?;

    if args.no_container {
        app.output.info("no build image created; run 'oxy init-container' when ready.");
    } else {
        build_image(app, &store, &args.container).await?;
    }

    app.output.kv("workspace", &config.dir.display().to_string());
    app.output.kv("sources", &config.src_dir.display().to_string());
    Ok(())
}
