// src/exec/tree.rs

//! Process-tree construction.
//!
//! Turns a logical command into a ready-to-start [`ProcessTree`]: either a
//! direct invocation of the target binary, or a shell-wrapped invocation
//! composed by the platform [`Shell`]. The tree is owned by one runner call
//! and never outlives it.

use tokio::process::Command;

use crate::errors::ExecError;
use crate::exec::shell::Shell;

/// The runnable unit produced from a run spec: the configured command plus
/// the interactive flag the runner needs when wiring I/O.
pub struct ProcessTree {
    pub cmd: Command,
    pub interactive: bool,
}

/// Build a process tree for `cmd` with `args`.
///
/// An empty `cmd` means list mode: every entry of `args` is an independent
/// logical command, joined with `&&`. List mode requires the shell.
pub fn new_process_tree(
    shell: &dyn Shell,
    cmd: &str,
    args: &[String],
    use_shell: bool,
    interactive: bool,
) -> Result<ProcessTree, ExecError> {
    if !use_shell {
        if cmd.is_empty() {
            return Err(ExecError::Config(
                "a command must be provided when the shell is not used".to_string(),
            ));
        }

        let mut command = Command::new(cmd);
        command.args(args);
        command.kill_on_drop(true);

        return Ok(ProcessTree {
            cmd: command,
            interactive,
        });
    }

    let program = shell.program()?;
    let shell_args = if cmd.is_empty() {
        shell.command_list_args(args)
    } else {
        shell.single_command_args(cmd, args)
    };

    let mut command = Command::new(program);
    command.args(shell_args);
    command.kill_on_drop(true);

    Ok(ProcessTree {
        cmd: command,
        interactive,
    })
}
