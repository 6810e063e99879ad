use std::io::Write;

use crate::{
    cmd::{CommandError, Flow},
    process::session::SignalOutcome,
    state::Shell,
};

use super::BuiltinCommand;

/// Asks every other instance of this shell in the session to terminate, then
/// ends this one.
#[derive(Debug, Default)]
pub struct KillAllTerms;

impl BuiltinCommand for KillAllTerms {
    fn name(&self) -> &'static str {
        "killallterms"
    }

    fn execute(&self, shell: &mut Shell, out: &mut dyn Write) -> Result<Flow, CommandError> {
        let session = shell.session();
        let name = session.shell_name();
        let outcomes = session
            .terminate_peer_shells()
            .map_err(CommandError::Session)?;

        let mut killed = 0;
        for outcome in outcomes {
            match outcome {
                SignalOutcome::Delivered(pid) => {
                    killed += 1;
                    writeln!(out, "Killed {name} PID {pid}")?;
                }
                SignalOutcome::AlreadyGone(pid) => {
                    trace!(%pid, "peer shell already gone");
                }
                SignalOutcome::Failed(pid, errno) => {
                    warn!(%pid, %errno, "failed to signal peer shell");
                    writeln!(out, "Failed to kill {name} PID {pid}")?;
                }
            }
        }

        if killed == 0 {
            writeln!(out, "No other {name} instances found.")?;
        }

        Ok(Flow::Exit)
    }
}
