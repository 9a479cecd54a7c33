//! Workspace location and precondition checks.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use oxy_common::WorkspaceConfig;
use regex::{Captures, Regex};

use crate::domain::error::WorkspaceError;

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{(?P<braced>[A-Za-z_][A-Za-z0-9_]*)\}|(?P<bare>[A-Za-z_][A-Za-z0-9_]*))")
        .expect("valid env reference pattern")
});

/// Replace `$VAR` and `${VAR}` references using `lookup`.
/// Unset variables expand to the empty string.
pub fn expand_env(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    ENV_REF
        .replace_all(input, |caps: &Captures<'_>| {
            let name = caps
                .name("braced")
                .or_else(|| caps.name("bare"))
                .map_or("", |m| m.as_str());
            lookup(name).unwrap_or_default()
        })
        .into_owned()
}

/// Resolve the `init` directory argument against `cwd`.
///
/// Environment references are expanded, relative paths are joined onto
/// `cwd`, and `.`/`..` components are folded lexically.
#[must_use]
pub fn resolve_workspace_dir(
    arg: &str,
    cwd: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> PathBuf {
    let expanded = expand_env(arg, lookup);
    let joined = if expanded.is_empty() {
        cwd.to_path_buf()
    } else {
        cwd.join(expanded)
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Fail unless `oxy init` has populated the workspace.
///
/// # Errors
///
/// Returns `WorkspaceError::NotInitialized` for an empty config.
pub fn require_initialized(config: &WorkspaceConfig) -> Result<(), WorkspaceError> {
    if config.is_initialized() {
        Ok(())
    } else {
        Err(WorkspaceError::NotInitialized)
    }
}

/// Fail unless a build image has been registered.
///
/// # Errors
///
/// Returns `WorkspaceError::NoContainer` when no container name is recorded,
/// or `NotInitialized` when the workspace itself is missing.
pub fn require_container(config: &WorkspaceConfig) -> Result<&str, WorkspaceError> {
    if !config.has_container() {
        return Err(WorkspaceError::NoContainer);
    }
    require_initialized(config)?;
    Ok(&config.container)
}
