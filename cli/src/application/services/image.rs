//! Application service: build image creation (`oxy init-container`).
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::{Context, Result};
use oxy_common::WorkspaceConfig;

use crate::application::ports::{ConfigStore, ContainerRuntime, LocalFs, ProgressReporter};
use crate::domain::dockerfile::{BASE_IMAGE, default_packages, render_dockerfile};
use crate::domain::require_initialized;

/// Register `name` as the workspace image and build it.
///
/// The name is saved before anything is pulled so a failed build can be
/// retried with `oxy init-container` alone. The Dockerfile is written into
/// `context_dir`, which the caller owns and removes.
///
/// # Errors
///
/// Returns `WorkspaceError::NotInitialized` outside a workspace, or the
/// first failing save, pull, write or build.
pub async fn init_container(
    store: &impl ConfigStore,
    fs: &impl LocalFs,
    runtime: &impl ContainerRuntime,
    context_dir: &Path,
    name: &str,
    uid: u32,
    reporter: &impl ProgressReporter,
) -> Result<WorkspaceConfig> {
    let mut config = store.load();
    require_initialized(&config)?;

    reporter.step(&format!("init-container [{name}]..."));
    if !config.container.is_empty() && config.container != name {
        reporter.warn(&format!(
            "replacing container [{}] with [{name}]",
            config.container
        ));
    }
    config.container = name.to_string();
    if config.deps.is_empty() {
        config.deps = default_packages();
    }
    store
        .save(&config)
        .with_context(|| format!("saving {}", store.path().display()))?;

    reporter.step(&format!("retrieving latest {BASE_IMAGE} image..."));
    runtime.pull(BASE_IMAGE).await?;

    reporter.step(&format!("building container [{name}]..."));
    let dockerfile = context_dir.join("Dockerfile");
    fs.write(&dockerfile, &render_dockerfile(&config.deps, uid))?;
    runtime.build_image(name, context_dir).await?;

    reporter.success(&format!("container [{name}] ready."));
    Ok(config)
}
