// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::model::ProjectFile;

/// Load a project file from a given path and return the raw `ProjectFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// the sanity checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading project file at {:?}", path))?;

    let project: ProjectFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML project file from {:?}", path))?;

    Ok(project)
}

/// Load a project file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let project = load_from_path(&path)?;
    validate_project(&project)?;
    Ok(project)
}

/// Helper to resolve a default project path.
///
/// Currently this just returns `Shipkit.toml` in the current working
/// directory.
pub fn default_project_path() -> PathBuf {
    PathBuf::from("Shipkit.toml")
}

fn validate_project(project: &ProjectFile) -> Result<()> {
    if project.service.name.trim().is_empty() {
        bail!("[service] name must not be empty");
    }
    if project.service.artifact_dir.trim().is_empty() {
        bail!("[service] artifact_dir must not be empty");
    }
    if project.publish.tool.trim().is_empty() {
        bail!("[publish] tool must not be empty");
    }
    if project.pipeline.remote_name.trim().is_empty() {
        bail!("[pipeline] remote_name must not be empty");
    }

    Ok(())
}
