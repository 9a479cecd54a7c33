//! Infrastructure implementation of the `ConfigStore` port.
//!
//! `JsonConfigStore` reads and writes `.oxy.json` with an atomic write
//! (temp file + rename) so a crash never leaves a half-written cache.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use oxy_common::{CONFIG_CACHE_FILE, WorkspaceConfig};

use crate::application::ports::ConfigStore;

/// Workspace cache file manager.
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Store for the cache in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        Ok(Self::in_dir(cwd))
    }

    /// Store for the cache of the workspace rooted at `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_path(dir.into().join(CONFIG_CACHE_FILE))
    }

    /// Store with an explicit file path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn try_load(&self) -> Result<Option<WorkspaceConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(config))
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> WorkspaceConfig {
        match self.try_load() {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable workspace cache");
                WorkspaceConfig::default()
            }
        }
    }

    fn save(&self, config: &WorkspaceConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let mut content = serde_json::to_string_pretty(config).context("serializing config")?;
        content.push('\n');

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = std::fs::File::create(&temp_path)
            .with_context(|| format!("creating temp file {}", temp_path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("syncing temp file {}", temp_path.display()))?;
        drop(file);

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "workspace cache saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}
