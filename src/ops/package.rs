// src/ops/package.rs

//! Packaging: compress build output into a deployable archive.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::ServiceSection;
use crate::exec::{CommandRunner, RunSpec};
use crate::ops::{OpTask, StepProgress};

/// Outcome of a packaging run.
#[derive(Debug, Clone)]
pub struct PackageResult {
    /// Path to the deployable zip archive.
    pub archive_path: PathBuf,
}

/// Prepare a zip archive from the service's build output.
///
/// The archive lands in the OS temp directory and is named after the
/// service; [`publish_service`](crate::ops::publish_service) removes it once
/// deployed.
pub fn package_service(
    runner: Arc<dyn CommandRunner>,
    cancel: CancellationToken,
    service: ServiceSection,
) -> OpTask<PackageResult> {
    OpTask::spawn(move |ctx| async move {
        ctx.set_progress(StepProgress::new("Compressing deployment artifacts"));

        let archive_path = std::env::temp_dir().join(format!("{}-deploy.zip", service.name));

        // zip appends to an existing archive instead of replacing it.
        let _ = std::fs::remove_file(&archive_path);

        let spec = RunSpec::new("zip")
            .args(["-r", "-q"])
            .arg(archive_path.display().to_string())
            .arg(".")
            .cwd(&service.artifact_dir)
            .enrich_error(true);

        runner
            .run(&cancel, spec)
            .await
            .context("compressing deployment artifacts")?;

        Ok(PackageResult { archive_path })
    })
}
