// src/exec/types.rs

//! Run specification and result types for the execution engine.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// Everything needed to execute one logical command.
///
/// Built once per invocation by the caller, consumed by
/// [`CommandRunner::run`](crate::exec::CommandRunner::run), and discarded.
///
/// An empty `cmd` together with shell mode signals "list mode": every entry
/// in `args` is an independent logical command, chained with `&&`.
pub struct RunSpec {
    /// Program name, or empty for list mode.
    pub cmd: String,

    /// Arguments (or logical commands, in list mode).
    pub args: Vec<String>,

    /// Working directory for the child; inherits the runner's when `None`.
    pub cwd: Option<PathBuf>,

    /// Extra `KEY=VALUE` entries appended to the ambient environment.
    ///
    /// Later entries override earlier ones on key collision. When empty, the
    /// child environment is left entirely to OS-default inheritance.
    pub env: Vec<String>,

    /// Input fed to the child's stdin in captured mode. Defaults to an empty
    /// source when `None`.
    pub stdin: Option<String>,

    /// Optional secondary sink that error output is duplicated into, in
    /// addition to being captured.
    pub stderr_sink: Option<Box<dyn Write + Send>>,

    /// Wrap the invocation in the platform shell. On Windows the runner
    /// shell-wraps regardless, so batch-file commands just work.
    pub use_shell: bool,

    /// Inherit the runner's own stdin/stdout/stderr instead of capturing.
    pub interactive: bool,

    /// Log extra environment entries and redacted captured output.
    pub debug: bool,

    /// Augment a failure with a redacted rendering of the captured output,
    /// so callers can return the error without inspecting the result.
    pub enrich_error: bool,
}

impl RunSpec {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            stdin: None,
            stderr_sink: None,
            use_shell: false,
            interactive: false,
            debug: false,
            enrich_error: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Append one `KEY=VALUE` environment entry.
    pub fn env(mut self, entry: impl Into<String>) -> Self {
        self.env.push(entry.into());
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn stderr_sink(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.stderr_sink = Some(sink);
        self
    }

    pub fn use_shell(mut self, value: bool) -> Self {
        self.use_shell = value;
        self
    }

    pub fn interactive(mut self, value: bool) -> Self {
        self.interactive = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.debug = value;
        self
    }

    pub fn enrich_error(mut self, value: bool) -> Self {
        self.enrich_error = value;
        self
    }
}

/// Outcome of one process invocation.
///
/// Exit code -1 means the process never produced a normal exit status
/// (killed, signalled). Safe to log after redaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exit code: {}, stdout: {}, stderr: {}",
            self.exit_code,
            self.stdout.trim_end(),
            self.stderr.trim_end()
        )
    }
}
