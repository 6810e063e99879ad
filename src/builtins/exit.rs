use std::io::Write;

use crate::{
    cmd::{CommandError, Flow},
    state::Shell,
};

use super::BuiltinCommand;

#[derive(Debug, Default)]
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _shell: &mut Shell, _out: &mut dyn Write) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}
