use std::io::Write;

use enum_dispatch::enum_dispatch;
use strum::{EnumIter, IntoEnumIterator};

use crate::{
    cmd::{CommandError, Flow},
    state::Shell,
};

pub mod exit;
pub mod killallterms;
pub mod killbp;
pub mod killterm;
pub mod numbg;

/// Commands the shell runs itself. Each takes no arguments.
#[enum_dispatch(BuiltinCommands)]
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn execute(&self, shell: &mut Shell, out: &mut dyn Write) -> Result<Flow, CommandError>;
}

#[enum_dispatch]
#[derive(Debug, EnumIter)]
pub enum BuiltinCommands {
    KillTerm(killterm::KillTerm),
    KillAllTerms(killallterms::KillAllTerms),
    NumBg(numbg::NumBg),
    KillBp(killbp::KillBp),
    Exit(exit::Exit),
}

impl BuiltinCommands {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|cmd| cmd.name() == name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        config::ShellConfig,
        process::session::{
            testing::{FakeEnumerator, RecordingSignaller},
            SessionRegistry,
        },
    };

    pub fn shell_with(enumerator: FakeEnumerator, signaller: RecordingSignaller) -> Shell {
        Shell::with_session(
            ShellConfig::default(),
            SessionRegistry::new(enumerator, signaller),
        )
    }

    pub fn run(shell: &mut Shell, builtin: BuiltinCommands) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = builtin.execute(shell, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn looks_up_every_builtin_by_name() {
        for name in ["killterm", "killallterms", "numbg", "killbp", "exit"] {
            let builtin = BuiltinCommands::from_name(name).unwrap();
            assert_eq!(builtin.name(), name);
        }
        assert!(BuiltinCommands::from_name("cd").is_none());
    }
}
