// src/errors.rs

//! Crate-wide error types.
//!
//! The execution engine has its own structured error enum so that callers can
//! tell apart "the process never ran" (configuration or start failures) from
//! "the process ran and failed" (a populated [`RunResult`] travels inside the
//! error). Higher layers (orchestration operations, CLI) use `anyhow` on top
//! of this.

use thiserror::Error;

use crate::exec::RunResult;

/// Errors produced by the process execution engine.
#[derive(Error, Debug)]
pub enum ExecError {
    /// Invalid execution setup, detected before any process was started.
    ///
    /// Examples: an empty command with the shell disabled, or the platform
    /// shell-location environment variable being unset.
    #[error("invalid execution setup: {0}")]
    Config(String),

    /// The operating system could not launch the process (missing binary,
    /// permissions). No process ran; there is no result to inspect.
    #[error("failed to start process: {0}")]
    Start(#[source] std::io::Error),

    /// Waiting on the child failed at the OS level.
    #[error("failed to wait for process: {0}")]
    Wait(#[source] std::io::Error),

    /// The process ran and exited non-zero or was terminated abnormally.
    ///
    /// `message` already carries the redacted rendering of the captured
    /// output when the caller opted into error enrichment.
    #[error("{message}")]
    Failed { result: RunResult, message: String },

    /// The process was killed by the cancellation watcher before it could
    /// exit on its own. The result carries exit code -1 and whatever output
    /// was captured before the kill.
    #[error("process was terminated by a cancellation request")]
    Cancelled { result: RunResult },
}

impl ExecError {
    /// Captured result, for failures where a process actually ran.
    pub fn run_result(&self) -> Option<&RunResult> {
        match self {
            ExecError::Failed { result, .. } | ExecError::Cancelled { result } => Some(result),
            _ => None,
        }
    }

    /// Exit code of the failed process, if one ran.
    pub fn exit_code(&self) -> Option<i32> {
        self.run_result().map(|r| r.exit_code)
    }
}

pub use anyhow::{Error, Result};
