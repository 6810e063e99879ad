use std::io::Write;

use super::{
    chain::{run_conditional, run_sequential, ChainOutcome},
    execution_plan::ExecutionPlan,
    pipeline::run_pipeline,
    redirect::run_redirection,
    CommandError, Flow,
};
use crate::{
    builtins::BuiltinCommand,
    parse::chain::Segment,
    process::{spawn, wait_for, PreparedCommand, Wiring},
    state::Shell,
};

impl ExecutionPlan<'_> {
    pub fn execute(&self, shell: &mut Shell, out: &mut dyn Write) -> Result<Flow, CommandError> {
        // anything buffered must reach the terminal before children write to it
        out.flush()?;

        match self {
            Self::NoOp => {}
            Self::Builtin(builtin) => {
                trace!(name = builtin.name(), "executing builtin");
                return builtin.execute(shell, out);
            }
            Self::File(request) => {
                trace!(?request, "delegating to file operators");
                request.run(shell.files(), out)?;
            }
            Self::Redirect(redirect) => {
                run_redirection(redirect)?;
            }
            Self::Conditional(chain) => {
                run_conditional(chain)?;
            }
            Self::ReversePipe(chain) | Self::Pipe(chain) => {
                let report = run_pipeline(chain)?;
                if shell.config().report_pipeline_status {
                    if let Some(status) = report.last() {
                        writeln!(out, "Pipeline {status}")?;
                    }
                }
            }
            Self::Sequential(chain) => {
                if let ChainOutcome::Stopped { .. } = run_sequential(chain)? {
                    writeln!(
                        out,
                        "Command execution failed, stopping sequential execution"
                    )?;
                }
            }
            Self::Simple {
                segment,
                background,
            } => run_simple(shell, segment, *background, out)?,
        }

        Ok(Flow::Continue)
    }
}

fn run_simple(
    shell: &mut Shell,
    segment: &Segment<'_>,
    background: bool,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let command = PreparedCommand::new(segment)?;
    let pid = spawn(&command, &Wiring::inherit())?;

    if background {
        shell.jobs_mut().record(pid);
        writeln!(out, "Background process started with PID: {pid}")?;
    } else {
        let status = wait_for(pid)?;
        trace!(%command, %status, "foreground command finished");
    }

    Ok(())
}
