//! Application service: workspace creation (`oxy init`).
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::{Context, Result};
use oxy_common::WorkspaceConfig;

use crate::application::ports::{CommandRunner, ConfigStore, LocalFs, ProgressReporter};
use crate::application::services::build::write_fairsoft_config;
use crate::application::services::sources::sync_sources;
use crate::domain::dockerfile::default_packages;

/// Config for a workspace rooted at `dir`, keeping the image name, compiler
/// and dependency choices of a previous cache at the same place.
#[must_use]
pub fn layout_config(dir: &Path, previous: &WorkspaceConfig) -> WorkspaceConfig {
    let mut config = WorkspaceConfig::for_root(dir);
    config.container.clone_from(&previous.container);
    config.env = previous.env.clone();
    config.deps = if previous.deps.is_empty() {
        default_packages()
    } else {
        previous.deps.clone()
    };
    config
}

/// Create the directory layout, fetch all sources, write the externals
/// config and save the cache. `dir` must already be absolute.
///
/// # Errors
///
/// Returns the first failing directory creation, git command or write.
pub async fn init_workspace(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    store: &impl ConfigStore,
    dir: &Path,
    reporter: &impl ProgressReporter,
) -> Result<WorkspaceConfig> {
    reporter.step(&format!("init [{}]...", dir.display()));
    let config = layout_config(dir, &store.load());

    for path in [&config.src_dir, &config.sim_path, &config.fair_root_path] {
        fs.create_dir_all(path)
            .with_context(|| format!("creating {}", path.display()))?;
    }

    sync_sources(runner, fs, &config.src_dir, reporter).await?;
    let cache = write_fairsoft_config(fs, &config.src_dir)?;
    reporter.step(&format!("config [{}] written", cache.display()));

    store
        .save(&config)
        .with_context(|| format!("saving {}", store.path().display()))?;
    reporter.success(&format!("workspace [{}] initialized.", dir.display()));
    Ok(config)
}
