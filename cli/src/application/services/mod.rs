//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod build;
pub mod clean;
pub mod cleanup;
pub mod image;
pub mod registry;
pub mod sandbox;
pub mod sources;
pub mod workspace_init;
