//! Fixed directory layout inside the build container.
//!
//! Host workspace directories are bind-mounted onto these paths, so every
//! in-container command refers to them rather than to host paths.

/// Non-root user created in the build image.
pub const CONTAINER_USER: &str = "oxy";

/// Working directory for interactive shells.
pub const CONTAINER_ROOT: &str = "/opt/alice";

/// Mount point of the host `src/` directory.
pub const CONTAINER_SRC_DIR: &str = "/opt/alice/src";

/// Mount point of the host `externals/` directory (`SIMPATH`).
pub const CONTAINER_SIM_PATH: &str = "/opt/alice/sw/externals";

/// Mount point of the host `install/` directory (`FAIRROOTPATH`).
pub const CONTAINER_INSTALL_PATH: &str = "/opt/alice/sw/install";

/// Path of a project checkout inside the container, e.g. `/opt/alice/src/fair-root`.
#[must_use]
pub fn container_project_dir(name: &str) -> String {
    format!("{CONTAINER_SRC_DIR}/{name}")
}

/// Path of a project's out-of-source build directory inside the container.
#[must_use]
pub fn container_build_dir(name: &str) -> String {
    format!("{CONTAINER_SRC_DIR}/{name}/build")
}
