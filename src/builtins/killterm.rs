use std::io::Write;

use crate::{
    cmd::{CommandError, Flow},
    state::Shell,
};

use super::BuiltinCommand;

#[derive(Debug, Default)]
pub struct KillTerm;

impl BuiltinCommand for KillTerm {
    fn name(&self) -> &'static str {
        "killterm"
    }

    fn execute(&self, shell: &mut Shell, out: &mut dyn Write) -> Result<Flow, CommandError> {
        out.flush()?;

        match shell.session().terminate_self() {
            Ok(()) => {
                writeln!(out, "Current shell killed")?;
                Ok(Flow::Exit)
            }
            Err(errno) => {
                warn!(%errno, "failed to terminate shell");
                writeln!(out, "Failed to terminate shell")?;
                Ok(Flow::Continue)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nix::{sys::signal::Signal, unistd::getpid};

    use super::*;
    use crate::{
        builtins::tests::{run, shell_with},
        process::session::testing::{FakeEnumerator, RecordingSignaller},
    };

    #[test]
    fn signals_itself_and_exits() {
        let signaller = RecordingSignaller::default();
        let sent = signaller.sent.clone();
        let mut shell = shell_with(FakeEnumerator::default(), signaller);

        let (flow, output) = run(&mut shell, KillTerm.into());
        assert_eq!(flow, Flow::Exit);
        assert_eq!(output, "Current shell killed\n");
        assert_eq!(*sent.borrow(), [(getpid(), Signal::SIGKILL)]);
    }
}
