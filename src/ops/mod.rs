// src/ops/mod.rs

//! Multi-step orchestration operations.
//!
//! Each operation here is a [`TaskWithProgress`] work function whose steps
//! are Command Runner invocations. Before each slow step the operation
//! reports a short human-readable phase label; downstream consumers (the CLI
//! status display) render the labels as they arrive. A failing step stops
//! the sequence and becomes the task's terminal error.
//!
//! - [`package`] compresses build output into a deployable archive.
//! - [`publish`] pushes the archive through the configured cloud CLI.
//! - [`pipeline`] configures the deployment pipeline against a git remote.

pub mod package;
pub mod pipeline;
pub mod publish;

use std::fmt;

use crate::task::TaskWithProgress;

pub use package::{PackageResult, package_service};
pub use pipeline::{
    CiProvider, GitHubCiProvider, GitHubScmProvider, PipelineConfigResult, PipelineManager,
    ScmProvider,
};
pub use publish::{PublishResult, publish_service};

/// A human-readable phase label reported by an orchestration step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepProgress {
    pub message: String,
}

impl StepProgress {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StepProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The task shape shared by every orchestration operation.
pub type OpTask<R> = TaskWithProgress<R, StepProgress>;
