//! Command implementations

pub mod build;
pub mod clean;
pub mod init;
pub mod init_container;
pub mod shell;
