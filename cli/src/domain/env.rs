//! Environment exported into the build container.
//!
//! The install and externals prefixes are exported by name and prepended to
//! the binary and library search paths; the compilers come from the
//! workspace configuration.

use oxy_common::{CONTAINER_INSTALL_PATH, CONTAINER_SIM_PATH, CompilerEnv};

/// `PATH` of the base image before the workspace prefixes are prepended.
pub const IMAGE_DEFAULT_PATH: &str = "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin";

/// Ordered `KEY=VALUE` pairs for every in-container build command.
#[must_use]
pub fn build_env(compilers: &CompilerEnv) -> Vec<(String, String)> {
    let prefixes = [CONTAINER_INSTALL_PATH, CONTAINER_SIM_PATH];
    let bins: Vec<String> = prefixes.iter().map(|p| format!("{p}/bin")).collect();
    let libs: Vec<String> = prefixes.iter().map(|p| format!("{p}/lib")).collect();

    vec![
        ("SIMPATH".to_string(), CONTAINER_SIM_PATH.to_string()),
        ("FAIRROOTPATH".to_string(), CONTAINER_INSTALL_PATH.to_string()),
        ("CXX".to_string(), compilers.cxx.clone()),
        ("CC".to_string(), compilers.cc.clone()),
        ("PATH".to_string(), prepend_path(&bins, IMAGE_DEFAULT_PATH)),
        ("LD_LIBRARY_PATH".to_string(), prepend_path(&libs, "")),
    ]
}

/// Join `entries` in front of `existing`, colon-separated. An empty
/// `existing` adds no trailing separator.
#[must_use]
pub fn prepend_path(entries: &[String], existing: &str) -> String {
    let mut parts: Vec<&str> = entries.iter().map(String::as_str).collect();
    if !existing.is_empty() {
        parts.push(existing);
    }
    parts.join(":")
}
