// src/ops/publish.rs

//! Publishing: push a packaged archive through the configured cloud CLI.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::PublishSection;
use crate::exec::{CommandRunner, RunSpec};
use crate::ops::package::PackageResult;
use crate::ops::{OpTask, StepProgress};

/// Outcome of a publish run.
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Public endpoints of the deployed service, when the project configures
    /// an endpoints query. Empty otherwise.
    pub endpoints: Vec<String>,
}

/// Publish the prepared archive using the configured provider CLI.
///
/// The deployment token, when present, is passed on the command line; the
/// runner's redaction rules keep it out of logs and enriched errors. The
/// archive is removed after a successful publish.
pub fn publish_service(
    runner: Arc<dyn CommandRunner>,
    cancel: CancellationToken,
    publish: PublishSection,
    package: PackageResult,
) -> OpTask<PublishResult> {
    OpTask::spawn(move |ctx| async move {
        ctx.set_progress(StepProgress::new("Publishing deployment package"));

        let mut spec = RunSpec::new(&publish.tool)
            .args(publish.args.clone())
            .enrich_error(true);
        if let Some(token) = &publish.deployment_token {
            spec = spec.arg("--deployment-token").arg(token);
        }
        spec = spec.arg(package.archive_path.display().to_string());

        runner
            .run(&cancel, spec)
            .await
            .context("publishing deployment package")?;

        let endpoints = match &publish.endpoints_args {
            Some(args) => {
                ctx.set_progress(StepProgress::new("Fetching service endpoints"));

                let result = runner
                    .run(
                        &cancel,
                        RunSpec::new(&publish.tool)
                            .args(args.clone())
                            .enrich_error(true),
                    )
                    .await
                    .context("fetching service endpoints")?;

                result
                    .stdout
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect()
            }
            None => Vec::new(),
        };

        // The archive is single-use; drop it once deployed.
        let _ = std::fs::remove_file(&package.archive_path);

        Ok(PublishResult { endpoints })
    })
}
