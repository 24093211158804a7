// src/ops/pipeline.rs

//! Deployment pipeline configuration.
//!
//! [`PipelineManager`] owns the provider-neutral flow: resolve the git
//! remote, let the source-control and CI providers run their hooks, then
//! push the pipeline definition. The provider traits are the boundary
//! contract; the GitHub-flavoured defaults here are deliberately thin so the
//! CLI stays runnable without pulling provider business logic into this
//! crate.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tokio_util::sync::CancellationToken;

use crate::config::PipelineSection;
use crate::exec::{CommandRunner, RunSpec};
use crate::ops::{OpTask, StepProgress};

/// Source-control side of pipeline configuration.
pub trait ScmProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Verify the resolved remote is usable for pipeline setup.
    fn preflight<'a>(
        &'a self,
        runner: &'a dyn CommandRunner,
        cancel: &'a CancellationToken,
        remote_url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Continuous-integration side of pipeline configuration.
pub trait CiProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Provision whatever the pipeline needs (credentials, secrets) for the
    /// given remote.
    fn configure<'a>(
        &'a self,
        runner: &'a dyn CommandRunner,
        cancel: &'a CancellationToken,
        settings: &'a PipelineSection,
        remote_url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Outcome of a pipeline configuration run.
#[derive(Debug, Clone)]
pub struct PipelineConfigResult {
    /// Name of the CI provider that was configured.
    pub provider: String,

    /// Resolved URL of the configured git remote.
    pub remote_url: String,
}

/// Drives pipeline configuration end to end.
pub struct PipelineManager {
    runner: Arc<dyn CommandRunner>,
    scm: Arc<dyn ScmProvider>,
    ci: Arc<dyn CiProvider>,
    settings: PipelineSection,
}

impl PipelineManager {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        scm: Arc<dyn ScmProvider>,
        ci: Arc<dyn CiProvider>,
        settings: PipelineSection,
    ) -> Self {
        Self {
            runner,
            scm,
            ci,
            settings,
        }
    }

    /// Create and configure the deployment pipeline.
    ///
    /// Steps, in order: resolve the configured git remote, run the SCM
    /// provider's preflight, run the CI provider's configure hook, push the
    /// pipeline definition. The first failing step terminates the task.
    pub fn configure(&self, cancel: CancellationToken) -> OpTask<PipelineConfigResult> {
        let runner = Arc::clone(&self.runner);
        let scm = Arc::clone(&self.scm);
        let ci = Arc::clone(&self.ci);
        let settings = self.settings.clone();

        OpTask::spawn(move |ctx| async move {
            ctx.set_progress(StepProgress::new("Resolving git remote"));

            let result = runner
                .run(
                    &cancel,
                    RunSpec::new("git")
                        .args(["remote", "get-url"])
                        .arg(&settings.remote_name)
                        .enrich_error(true),
                )
                .await
                .with_context(|| {
                    format!("resolving git remote '{}'", settings.remote_name)
                })?;
            let remote_url = result.stdout.trim().to_string();

            ctx.set_progress(StepProgress::new(format!(
                "Validating {} repository",
                scm.name()
            )));
            scm.preflight(runner.as_ref(), &cancel, &remote_url).await?;

            ctx.set_progress(StepProgress::new(format!(
                "Configuring {} pipeline",
                ci.name()
            )));
            ci.configure(runner.as_ref(), &cancel, &settings, &remote_url)
                .await?;

            ctx.set_progress(StepProgress::new("Pushing pipeline definition"));
            runner
                .run_list(
                    &cancel,
                    vec![
                        format!("git fetch {}", settings.remote_name),
                        format!("git push {} HEAD", settings.remote_name),
                    ],
                    RunSpec::new("").enrich_error(true),
                )
                .await
                .context("pushing pipeline definition")?;

            Ok(PipelineConfigResult {
                provider: ci.name().to_string(),
                remote_url,
            })
        })
    }
}

/// Default SCM provider: accepts remotes hosted on github.com.
pub struct GitHubScmProvider;

impl ScmProvider for GitHubScmProvider {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn preflight<'a>(
        &'a self,
        _runner: &'a dyn CommandRunner,
        _cancel: &'a CancellationToken,
        remote_url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if !remote_url.contains("github.com") {
                bail!("remote '{remote_url}' does not look like a GitHub repository");
            }
            Ok(())
        })
    }
}

/// Default CI provider: verifies the `gh` CLI is present and authenticated.
/// The full secret-provisioning flow lives outside this crate.
pub struct GitHubCiProvider;

impl CiProvider for GitHubCiProvider {
    fn name(&self) -> &'static str {
        "GitHub Actions"
    }

    fn configure<'a>(
        &'a self,
        runner: &'a dyn CommandRunner,
        cancel: &'a CancellationToken,
        _settings: &'a PipelineSection,
        _remote_url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            runner
                .run(
                    cancel,
                    RunSpec::new("gh")
                        .args(["auth", "status"])
                        .enrich_error(true),
                )
                .await
                .context("checking gh CLI authentication")?;
            Ok(())
        })
    }
}
