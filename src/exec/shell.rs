// src/exec/shell.rs

//! Platform shell selection and shell-line composition.
//!
//! Instead of scattering OS checks through the process-tree builder, the two
//! shell-wrapping strategies live behind the [`Shell`] trait with exactly two
//! variants, selected once by [`platform_shell`]:
//!
//! - [`WindowsShell`]: `cmd.exe` located via the `SYSTEMROOT` environment
//!   variable, command line passed after `/c`.
//! - [`PosixShell`]: `/bin/sh -c`.
//!
//! Both compose the same two shapes: a single command with arguments, or a
//! list of logical commands chained with `&&` so the chain stops at the
//! first failure.

use std::path::PathBuf;

use crate::errors::ExecError;

/// A platform command interpreter that can wrap logical commands into one
/// shell invocation.
pub trait Shell: Send + Sync {
    /// Path to the interpreter binary. Fails with a configuration error when
    /// the platform's shell-location environment variable is unset.
    fn program(&self) -> Result<PathBuf, ExecError>;

    /// Argument vector for running `cmd` with `args` as one shell line.
    fn single_command_args(&self, cmd: &str, args: &[String]) -> Vec<String>;

    /// Argument vector for running several logical commands chained with
    /// `&&`.
    fn command_list_args(&self, commands: &[String]) -> Vec<String>;
}

/// `cmd.exe`-based shell wrapping. The command and its arguments are simply
/// concatenated into the line the interpreter parses.
pub struct WindowsShell;

impl Shell for WindowsShell {
    fn program(&self) -> Result<PathBuf, ExecError> {
        let root = std::env::var("SYSTEMROOT")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ExecError::Config("environment variable 'SYSTEMROOT' has no value".to_string())
            })?;

        Ok(PathBuf::from(root).join("System32").join("cmd.exe"))
    }

    fn single_command_args(&self, cmd: &str, args: &[String]) -> Vec<String> {
        let mut all = Vec::with_capacity(args.len() + 2);
        all.push("/c".to_string());
        all.push(cmd.to_string());
        all.extend(args.iter().cloned());
        all
    }

    fn command_list_args(&self, commands: &[String]) -> Vec<String> {
        vec!["/c".to_string(), commands.join(" && ")]
    }
}

/// `/bin/sh`-based shell wrapping.
///
/// Arguments are passed as positional shell parameters (`"$0" "$1" …`)
/// appended after the command text, so their contents are never
/// re-interpreted by the shell.
pub struct PosixShell;

impl Shell for PosixShell {
    fn program(&self) -> Result<PathBuf, ExecError> {
        Ok(PathBuf::from("/bin/sh"))
    }

    fn single_command_args(&self, cmd: &str, args: &[String]) -> Vec<String> {
        let mut line = cmd.to_string();
        for i in 0..args.len() {
            line.push_str(&format!(" \"${i}\""));
        }

        let mut all = Vec::with_capacity(args.len() + 2);
        all.push("-c".to_string());
        all.push(line);
        all.extend(args.iter().cloned());
        all
    }

    fn command_list_args(&self, commands: &[String]) -> Vec<String> {
        vec!["-c".to_string(), commands.join(" && ")]
    }
}

/// Select the shell for the current platform.
pub fn platform_shell() -> Box<dyn Shell> {
    if cfg!(windows) {
        Box::new(WindowsShell)
    } else {
        Box::new(PosixShell)
    }
}
