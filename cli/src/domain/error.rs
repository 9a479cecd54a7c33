//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Workspace errors ──────────────────────────────────────────────────────────

/// Precondition failures: the command cannot run against this workspace yet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("no workspace found in this directory. Run 'oxy init' first.")]
    NotInitialized,

    #[error("no container registered. Run 'oxy init-container' first.")]
    NoContainer,
}

// ── External command errors ───────────────────────────────────────────────────

/// An external process (git, docker, cmake, make) did not succeed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("command '{command}' failed with exit code {code}")]
    Failed { command: String, code: i32 },

    #[error("command '{command}' was terminated by a signal")]
    Killed { command: String },
}

impl CommandError {
    /// Build the error for a finished process from its optional exit code.
    #[must_use]
    pub fn from_code(command: impl Into<String>, code: Option<i32>) -> Self {
        let command = command.into();
        match code {
            Some(code) => CommandError::Failed { command, code },
            None => CommandError::Killed { command },
        }
    }
}

// ── Clean errors ──────────────────────────────────────────────────────────────

/// Errors related to `oxy clean` target resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CleanError {
    #[error("unknown target [{0}]")]
    UnknownTarget(String),
}

// ── Run errors ────────────────────────────────────────────────────────────────

/// Process-level outcomes that are not tied to a single command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("interrupted; spawned containers were removed")]
    Interrupted,
}
