use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the persisted workspace cache, relative to the workspace root.
pub const CONFIG_CACHE_FILE: &str = ".oxy.json";

/// Compiler selection exported into the build container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerEnv {
    #[serde(rename = "CXX")]
    pub cxx: String,
    #[serde(rename = "CC")]
    pub cc: String,
}

impl Default for CompilerEnv {
    fn default() -> Self {
        Self {
            cxx: "/usr/bin/g++".to_string(),
            cc: "/usr/bin/gcc".to_string(),
        }
    }
}

/// Persisted description of a workspace.
///
/// Keys are PascalCase so caches written by earlier releases of the tool
/// still load. Field order is the serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct WorkspaceConfig {
    /// Workspace root.
    pub dir: PathBuf,
    /// Source checkouts (`<dir>/src`).
    pub src_dir: PathBuf,
    /// External dependency installs (`<dir>/externals`).
    pub sim_path: PathBuf,
    /// Install prefix of the built projects (`<dir>/install`).
    pub fair_root_path: PathBuf,
    /// OS packages installed into the build image.
    #[serde(deserialize_with = "null_as_empty")]
    pub deps: Vec<String>,
    /// Tag of the build image; empty until `init-container` ran.
    pub container: String,
    pub env: CompilerEnv,
}

impl WorkspaceConfig {
    /// Lay out a fresh workspace rooted at `dir`.
    #[must_use]
    pub fn for_root(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            src_dir: dir.join("src"),
            sim_path: dir.join("externals"),
            fair_root_path: dir.join("install"),
            ..Self::default()
        }
    }

    /// `true` once `init` populated the workspace paths.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.dir.as_os_str().is_empty()
    }

    /// `true` once a build image has been registered.
    #[must_use]
    pub fn has_container(&self) -> bool {
        !self.container.is_empty()
    }

    /// Host checkout directory of `project`.
    #[must_use]
    pub fn project_dir(&self, project: Project) -> PathBuf {
        self.src_dir.join(project.name())
    }

    /// Host build directory of `project`.
    #[must_use]
    pub fn build_dir(&self, project: Project) -> PathBuf {
        self.project_dir(project).join("build")
    }
}

// Older caches store an unset list as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The three upstream projects, in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Project {
    #[serde(rename = "fair-soft")]
    #[cfg_attr(feature = "clap", value(name = "fair-soft"))]
    FairSoft,
    #[serde(rename = "fair-root")]
    #[cfg_attr(feature = "clap", value(name = "fair-root"))]
    FairRoot,
    #[serde(rename = "alice-o2")]
    #[cfg_attr(feature = "clap", value(name = "alice-o2"))]
    AliceO2,
}

impl Project {
    /// All projects in build order.
    pub const ALL: [Project; 3] = [Project::FairSoft, Project::FairRoot, Project::AliceO2];

    /// Directory name of the checkout under `src/`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Project::FairSoft => "fair-soft",
            Project::FairRoot => "fair-root",
            Project::AliceO2 => "alice-o2",
        }
    }

    /// Upstream git repository.
    #[must_use]
    pub fn repo_url(self) -> &'static str {
        match self {
            Project::FairSoft => "https://github.com/FairRootGroup/FairSoft",
            Project::FairRoot => "https://github.com/FairRootGroup/FairRoot",
            Project::AliceO2 => "https://github.com/AliceO2Group/AliceO2",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names none of the known projects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown project '{0}'")]
pub struct ParseProjectError(pub String);

impl FromStr for Project {
    type Err = ParseProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Project::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ParseProjectError(s.to_string()))
    }
}
