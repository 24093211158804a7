// src/exec/mod.rs

//! Process execution layer.
//!
//! Every external tool invocation (cloud provider CLIs, git, archivers) goes
//! through this module so that command execution behaves identically across
//! operating systems, secrets are redacted before anything is logged, and
//! cancellation reliably tears down the spawned process tree.
//!
//! - [`types`] holds [`RunSpec`] (what to run) and [`RunResult`] (what
//!   happened).
//! - [`shell`] owns platform shell selection and shell-line composition.
//! - [`tree`] turns a spec into a ready-to-start [`ProcessTree`].
//! - [`redact`] strips secrets from command lines and captured output.
//! - [`runner`] is the execution façade: the [`CommandRunner`] trait and its
//!   production implementation [`ShellCommandRunner`].

pub mod redact;
pub mod runner;
pub mod shell;
pub mod tree;
pub mod types;

pub use redact::Redactor;
pub use runner::{CommandRunner, ShellCommandRunner};
pub use shell::{PosixShell, Shell, WindowsShell, platform_shell};
pub use tree::{ProcessTree, new_process_tree};
pub use types::{RunResult, RunSpec};
