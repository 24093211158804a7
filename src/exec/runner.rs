// src/exec/runner.rs

//! The execution façade.
//!
//! [`ShellCommandRunner`] starts a process tree, wires I/O for interactive or
//! captured mode, watches the caller's cancellation token for the lifetime of
//! the process, and folds the outcome into a [`RunResult`] or an
//! [`ExecError`]. Orchestration code talks to the [`CommandRunner`] trait so
//! tests can substitute a fake that never spawns real processes.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::ExecError;
use crate::exec::redact::Redactor;
use crate::exec::shell::{Shell, platform_shell};
use crate::exec::tree::new_process_tree;
use crate::exec::types::{RunResult, RunSpec};

/// Contract for executing console/shell commands.
///
/// Production code uses [`ShellCommandRunner`]; tests can provide their own
/// implementation that records invocations and scripts results.
pub trait CommandRunner: Send + Sync {
    /// Run the command described by `spec`, honouring `cancel`.
    fn run<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        spec: RunSpec,
    ) -> Pin<Box<dyn Future<Output = Result<RunResult, ExecError>> + Send + 'a>>;

    /// Run several logical commands as one shell-chained invocation.
    ///
    /// Always shell-wrapped and non-interactive; the chain stops at the
    /// first failing command.
    fn run_list<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        commands: Vec<String>,
        spec: RunSpec,
    ) -> Pin<Box<dyn Future<Output = Result<RunResult, ExecError>> + Send + 'a>>;
}

/// The default runner: executes real processes on the underlying shell or
/// directly, with secret redaction applied before anything is logged.
pub struct ShellCommandRunner {
    redactor: Redactor,
    shell: Box<dyn Shell>,
}

impl ShellCommandRunner {
    pub fn new(redactor: Redactor) -> Self {
        Self {
            redactor,
            shell: platform_shell(),
        }
    }

    /// Construct with an explicit shell, for tests exercising shell-line
    /// composition off-platform.
    pub fn with_shell(redactor: Redactor, shell: Box<dyn Shell>) -> Self {
        Self { redactor, shell }
    }

    async fn run_inner(
        &self,
        cancel: &CancellationToken,
        mut spec: RunSpec,
    ) -> Result<RunResult, ExecError> {
        // Use the shell on Windows regardless: most commands there are batch
        // files wrapping real binaries, and plain binaries work fine through
        // cmd.exe too.
        let use_shell = spec.use_shell || cfg!(windows);

        let mut tree = new_process_tree(
            &*self.shell,
            &spec.cmd,
            &spec.args,
            use_shell,
            spec.interactive,
        )?;

        if let Some(cwd) = &spec.cwd {
            tree.cmd.current_dir(cwd);
        }
        apply_extra_env(&mut tree.cmd, &spec.env);

        info!(
            cmd = %spec.cmd,
            args = %self.redactor.redact(&spec.args.join(" ")),
            "running command"
        );

        if spec.debug && !spec.env.is_empty() {
            for entry in &spec.env {
                debug!(entry = %self.redactor.redact(entry), "additional env");
            }
        }

        if tree.interactive {
            tree.cmd
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        } else {
            let stdin = if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                // Empty source: the child sees immediate EOF.
                Stdio::null()
            };
            tree.cmd
                .stdin(stdin)
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }

        let mut child = tree.cmd.spawn().map_err(ExecError::Start)?;

        if let Some(input) = spec.stdin.take() {
            feed_stdin(&mut child, input);
        }

        let (stdout_task, stderr_task) = if tree.interactive {
            (None, None)
        } else {
            (
                child.stdout.take().map(capture_stream),
                child
                    .stderr
                    .take()
                    .map(|err| capture_stream_tee(err, spec.stderr_sink.take())),
            )
        };

        // Either the process exits on its own, or the caller's cancellation
        // signal fires and we kill the process tree. The watcher arm is torn
        // down with the select when this call returns.
        let status = tokio::select! {
            status_res = child.wait() => status_res.map_err(ExecError::Wait)?,

            _ = cancel.cancelled() => {
                info!(cmd = %spec.cmd, "cancellation requested; killing process tree");
                if let Err(e) = child.kill().await {
                    warn!(cmd = %spec.cmd, error = %e, "failed to kill process on cancellation");
                }

                let stdout = collect(stdout_task).await;
                let stderr = collect(stderr_task).await;
                return Err(ExecError::Cancelled {
                    result: RunResult::new(-1, stdout, stderr),
                });
            }
        };

        let exit_code = status.code().unwrap_or(-1);

        // Interactive mode reports empty captured output by construction,
        // whatever the process wrote to the inherited streams.
        let (stdout, stderr) = if tree.interactive {
            (String::new(), String::new())
        } else {
            (collect(stdout_task).await, collect(stderr_task).await)
        };

        if spec.debug && !tree.interactive {
            debug!(
                exit_code,
                stdout = %self.redactor.redact(&stdout),
                stderr = %self.redactor.redact(&stderr),
                "command finished"
            );
        }

        let result = RunResult::new(exit_code, stdout, stderr);

        if status.success() {
            return Ok(result);
        }

        let mut message = format!("command terminated with exit code {exit_code}");
        if spec.enrich_error {
            message = format!("{}: {message}", self.redactor.redact(&result.to_string()));
        }

        Err(ExecError::Failed { result, message })
    }

    async fn run_list_inner(
        &self,
        cancel: &CancellationToken,
        commands: Vec<String>,
        mut spec: RunSpec,
    ) -> Result<RunResult, ExecError> {
        let mut tree = new_process_tree(&*self.shell, "", &commands, true, false)?;

        if let Some(cwd) = &spec.cwd {
            tree.cmd.current_dir(cwd);
        }
        apply_extra_env(&mut tree.cmd, &spec.env);

        info!(
            commands = %self.redactor.redact(&commands.join(" && ")),
            "running command list"
        );

        tree.cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = tree.cmd.spawn().map_err(ExecError::Start)?;

        let stdout_task = child.stdout.take().map(capture_stream);
        let stderr_task = child
            .stderr
            .take()
            .map(|err| capture_stream_tee(err, spec.stderr_sink.take()));

        let status = tokio::select! {
            status_res = child.wait() => status_res.map_err(ExecError::Wait)?,

            _ = cancel.cancelled() => {
                info!("cancellation requested; killing command list process tree");
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "failed to kill process on cancellation");
                }

                let stdout = collect(stdout_task).await;
                let stderr = collect(stderr_task).await;
                return Err(ExecError::Cancelled {
                    result: RunResult::new(-1, stdout, stderr),
                });
            }
        };

        // Unconditional teardown: the interpreter has exited, but a chained
        // command may have left children behind. Best effort, ignore errors.
        let _ = child.start_kill();

        let exit_code = status.code().unwrap_or(-1);
        let stdout = collect(stdout_task).await;
        let stderr = collect(stderr_task).await;
        let result = RunResult::new(exit_code, stdout, stderr);

        if status.success() {
            return Ok(result);
        }

        let mut message = format!("command list terminated with exit code {exit_code}");
        if spec.enrich_error {
            message = format!("{}: {message}", self.redactor.redact(&result.to_string()));
        }

        Err(ExecError::Failed { result, message })
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        spec: RunSpec,
    ) -> Pin<Box<dyn Future<Output = Result<RunResult, ExecError>> + Send + 'a>> {
        Box::pin(self.run_inner(cancel, spec))
    }

    fn run_list<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        commands: Vec<String>,
        spec: RunSpec,
    ) -> Pin<Box<dyn Future<Output = Result<RunResult, ExecError>> + Send + 'a>> {
        Box::pin(self.run_list_inner(cancel, commands, spec))
    }
}

/// Append caller-specified `KEY=VALUE` entries to a full copy of the ambient
/// environment. With no extras the command is left untouched, so the OS
/// default inheritance applies.
fn apply_extra_env(cmd: &mut tokio::process::Command, extra: &[String]) {
    if extra.is_empty() {
        return;
    }

    cmd.env_clear();
    cmd.envs(std::env::vars());

    for entry in extra {
        if let Some((key, value)) = entry.split_once('=') {
            cmd.env(key, value);
        } else {
            warn!(entry = %entry, "ignoring malformed environment entry (expected KEY=VALUE)");
        }
    }
}

/// Write `input` to the child's stdin and close it.
fn feed_stdin(child: &mut Child, input: String) {
    if let Some(mut stdin) = child.stdin.take() {
        tokio::spawn(async move {
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                debug!(error = %e, "failed to write to child stdin");
            }
            // Dropping stdin closes the pipe so the child sees EOF.
        });
    }
}

/// Drain a child output stream into a buffer on a background task.
fn capture_stream<R>(mut stream: R) -> JoinHandle<Vec<u8>>
where
    R: AsyncReadExt + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf).await;
        buf
    })
}

/// Like [`capture_stream`], but each chunk is also duplicated into the
/// caller's sink.
fn capture_stream_tee<R>(
    mut stream: R,
    mut sink: Option<Box<dyn std::io::Write + Send>>,
) -> JoinHandle<Vec<u8>>
where
    R: AsyncReadExt + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];

        loop {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(sink) = sink.as_mut() {
                        let _ = sink.write_all(&chunk[..n]);
                    }
                }
            }
        }

        if let Some(sink) = sink.as_mut() {
            let _ = sink.flush();
        }

        buf
    })
}

/// Join a capture task into a lossily-decoded string.
async fn collect(task: Option<JoinHandle<Vec<u8>>>) -> String {
    match task {
        Some(handle) => match handle.await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => String::new(),
        },
        None => String::new(),
    }
}
