//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod command;
pub mod container;
pub mod dockerfile;
pub mod env;
pub mod error;
pub mod extpkgs;
pub mod fairsoft;
pub mod workspace;

pub use command::CommandSpec;
pub use container::ContainerRun;
pub use error::{CleanError, CommandError, RunError, WorkspaceError};
pub use workspace::{require_container, require_initialized};
