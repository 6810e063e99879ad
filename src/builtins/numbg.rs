use std::io::Write;

use crate::{
    cmd::{CommandError, Flow},
    state::Shell,
};

use super::BuiltinCommand;

#[derive(Debug, Default)]
pub struct NumBg;

impl BuiltinCommand for NumBg {
    fn name(&self) -> &'static str {
        "numbg"
    }

    fn execute(&self, shell: &mut Shell, out: &mut dyn Write) -> Result<Flow, CommandError> {
        let alive = shell.jobs_mut().alive_count();
        writeln!(
            out,
            "Number of background processes in current session: {alive}"
        )?;
        Ok(Flow::Continue)
    }
}
