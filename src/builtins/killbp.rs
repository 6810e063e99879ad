use std::io::Write;

use crate::{
    cmd::{CommandError, Flow},
    process::session::SignalOutcome,
    state::Shell,
};

use super::BuiltinCommand;

/// Kills every process in the shell's group except the shell and its parent.
#[derive(Debug, Default)]
pub struct KillBp;

impl BuiltinCommand for KillBp {
    fn name(&self) -> &'static str {
        "killbp"
    }

    fn execute(&self, shell: &mut Shell, out: &mut dyn Write) -> Result<Flow, CommandError> {
        let outcomes = shell
            .session()
            .kill_group_except_shell()
            .map_err(CommandError::Session)?;

        for outcome in outcomes {
            match outcome {
                SignalOutcome::Delivered(pid) => writeln!(out, "Killed process {pid}")?,
                // exited between enumeration and kill
                SignalOutcome::AlreadyGone(pid) => trace!(%pid, "already gone"),
                SignalOutcome::Failed(pid, errno) => {
                    warn!(%pid, %errno, "kill failed");
                    writeln!(out, "Failed to kill process {pid}")?;
                }
            }
        }

        Ok(Flow::Continue)
    }
}
