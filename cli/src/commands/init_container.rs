//! `oxy init-container`: build the docker image used for compilation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::image::init_container;
use crate::domain::dockerfile::DEFAULT_CONTAINER_NAME;

/// UID used for the image user when the invoking user's cannot be read.
const FALLBACK_UID: u32 = 1000;

/// Arguments for the `oxy init-container` command.
#[derive(Args)]
pub struct InitContainerArgs {
    /// Tag of the image to build
    #[arg(default_value = DEFAULT_CONTAINER_NAME)]
    pub name: String,
}

/// Run `oxy init-container`.
///
/// # Errors
///
/// Returns an error outside a workspace or if the image cannot be built.
pub async fn run(args: &InitContainerArgs, app: &AppContext) -> Result<()> {
    let store = app.config_store()?;
    build_image(app, &store, &args.name).await
}

/// Build image `name` for the workspace behind `store`, using a temporary
/// directory as docker build context.
pub(crate) async fn build_image(
    app: &AppContext,
    store: &impl ConfigStore,
    name: &str,
) -> Result<()> {
    let context = tempfile::Builder::new()
        .prefix("oxy-docker-")
        .tempdir()
        .context("creating docker build context")?;
    let uid = invoking_uid(context.path());
    tracing::debug!(uid, context = %context.path().display(), "building image");

    init_container(
        store,
        &app.fs,
        app.registry.runtime(),
        context.path(),
        name,
        uid,
        &app.terminal_reporter(),
    )
    .await?;
    Ok(())
}

/// UID of the invoking user, read from the owner of a directory it just
/// created.
fn invoking_uid(owned: &Path) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        match std::fs::metadata(owned) {
            Ok(meta) => return meta.uid(),
            Err(e) => tracing::warn!(error = %e, "cannot read invoking user id"),
        }
    }
    #[cfg(not(unix))]
    let _ = owned;
    FALLBACK_UID
}
