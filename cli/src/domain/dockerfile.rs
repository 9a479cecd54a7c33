//! Build image definition.

use oxy_common::CONTAINER_USER;

/// Base image the build environment is derived from.
pub const BASE_IMAGE: &str = "centos:7";

/// Default container name used by `init-container`.
pub const DEFAULT_CONTAINER_NAME: &str = "oxy-dev";

/// OS packages needed to build the externals, FairRoot and O2.
pub const DEFAULT_PACKAGES: &[&str] = &[
    "cmake", "gcc", "gcc-c++", "gcc-gfortran", "make", "patch", "sed",
    "libX11-devel", "libXft-devel", "libXpm-devel", "libXext-devel",
    "libXmu-devel", "mesa-libGLU-devel", "mesa-libGL-devel", "ncurses-devel",
    "curl", "bzip2", "libbz2-dev", "gzip", "unzip", "tar", "expat-devel",
    "subversion", "git", "flex", "bison", "imake", "redhat-lsb-core",
    "python-devel", "libxml2-devel", "wget", "openssl-devel", "curl-devel",
    "automake", "autoconf", "libtool", "which",
];

/// Owned copy of [`DEFAULT_PACKAGES`] for a fresh workspace config.
#[must_use]
pub fn default_packages() -> Vec<String> {
    DEFAULT_PACKAGES.iter().map(ToString::to_string).collect()
}

/// Render the Dockerfile: install `packages` on the base image and switch to
/// a non-root user whose UID matches the invoking user, so files written to
/// the bind-mounted workspace stay owned by them.
#[must_use]
pub fn render_dockerfile(packages: &[String], uid: u32) -> String {
    format!(
        "## Dockerfile for the oxy base development environment.\n\
         FROM {BASE_IMAGE}\n\
         \n\
         RUN yum update -y && yum install -y {packages}\n\
         \n\
         ## create a user for the container\n\
         RUN useradd -m -u {uid} {CONTAINER_USER}\n\
         USER {CONTAINER_USER}\n",
        packages = packages.join(" "),
    )
}
