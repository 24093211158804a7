// src/config/mod.rs

//! Project file loading.
//!
//! The project file (`Shipkit.toml` by default) describes the service being
//! deployed and how the orchestration operations should invoke external
//! tools. This module is a thin boundary: it deserializes, applies defaults,
//! and does basic sanity checks; the deployment semantics live in [`ops`].
//!
//! [`ops`]: crate::ops

pub mod loader;
pub mod model;

pub use loader::{default_project_path, load_and_validate, load_from_path};
pub use model::{PipelineSection, ProjectFile, PublishSection, ServiceSection};
