// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod ops;
pub mod task;

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::{CliArgs, CliCommand};
use crate::config::load_and_validate;
use crate::exec::{CommandRunner, Redactor, RunSpec, ShellCommandRunner};
use crate::ops::{GitHubCiProvider, GitHubScmProvider, OpTask, PipelineManager};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the root cancellation token (Ctrl-C kills in-flight process trees)
/// - the command runner with the standard redaction rules
/// - the subcommand's orchestration task, with progress rendered to stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let cancel = CancellationToken::new();

    // Ctrl-C → cancel every in-flight process invocation.
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            cancel.cancel();
        });
    }

    let runner: Arc<dyn CommandRunner> =
        Arc::new(ShellCommandRunner::new(Redactor::with_default_rules()));

    match args.command {
        CliCommand::Exec {
            command,
            shell,
            interactive,
        } => {
            let mut parts = command.into_iter();
            let cmd = parts.next().unwrap_or_default();

            let spec = RunSpec::new(cmd)
                .args(parts)
                .use_shell(shell)
                .interactive(interactive)
                .debug(args.debug);

            let result = runner.run(&cancel, spec).await?;
            print!("{}", result.stdout);
            eprint!("{}", result.stderr);
            Ok(())
        }

        CliCommand::Package => {
            let project = load_and_validate(&args.project)?;
            let task = ops::package_service(
                Arc::clone(&runner),
                cancel.clone(),
                project.service.clone(),
            );

            let package = drive(task).await?;
            info!(archive = %package.archive_path.display(), "service packaged");
            println!("packaged: {}", package.archive_path.display());
            Ok(())
        }

        CliCommand::Publish => {
            let project = load_and_validate(&args.project)?;

            let package = drive(ops::package_service(
                Arc::clone(&runner),
                cancel.clone(),
                project.service.clone(),
            ))
            .await?;

            let published = drive(ops::publish_service(
                Arc::clone(&runner),
                cancel.clone(),
                project.publish.clone(),
                package,
            ))
            .await?;

            println!("published service '{}'", project.service.name);
            for endpoint in &published.endpoints {
                println!("  - Endpoint: {endpoint}");
            }
            Ok(())
        }

        CliCommand::PipelineConfig => {
            let project = load_and_validate(&args.project)?;
            let manager = PipelineManager::new(
                Arc::clone(&runner),
                Arc::new(GitHubScmProvider),
                Arc::new(GitHubCiProvider),
                project.pipeline.clone(),
            );

            let configured = drive(manager.configure(cancel.clone())).await?;
            println!(
                "pipeline configured for {} ({})",
                configured.remote_url, configured.provider
            );
            Ok(())
        }
    }
}

/// Render progress labels as they arrive, then return the terminal outcome.
async fn drive<R>(mut task: OpTask<R>) -> Result<R>
where
    R: Clone + Send + 'static,
{
    while let Some(progress) = task.next_progress().await {
        println!("  {progress}...");
    }

    task.wait().await.map_err(anyhow::Error::new)
}
