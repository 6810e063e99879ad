use crate::{
    parse::chain::Chain,
    process::{spawn, wait_for, ChildStatus, PreparedCommand, Wiring},
};

use super::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Every segment ran.
    Completed,
    /// A sequential chain hit a failing segment.
    Stopped { at: usize, status: ChildStatus },
    /// A conditional connector declined to run the rest.
    ShortCircuited { at: usize, status: ChildStatus },
}

fn prepare(chain: &Chain<'_>) -> Result<Vec<PreparedCommand>, CommandError> {
    Ok(chain
        .segments
        .iter()
        .map(PreparedCommand::new)
        .collect::<Result<Vec<_>, _>>()?)
}

fn run_one(command: &PreparedCommand) -> Result<ChildStatus, CommandError> {
    let pid = spawn(command, &Wiring::inherit())?;
    Ok(wait_for(pid)?)
}

/// Runs segments left to right, each to completion, stopping at the first
/// one that fails.
pub fn run_sequential(chain: &Chain<'_>) -> Result<ChainOutcome, CommandError> {
    for (at, command) in prepare(chain)?.iter().enumerate() {
        let status = run_one(command)?;
        if status.failure() {
            debug!(at, %command, %status, "sequence stopped");
            return Ok(ChainOutcome::Stopped { at, status });
        }
    }

    Ok(ChainOutcome::Completed)
}

/// Runs segments left to right; after each non-final one the connector that
/// follows it decides whether to go on.
pub fn run_conditional(chain: &Chain<'_>) -> Result<ChainOutcome, CommandError> {
    let commands = prepare(chain)?;

    for (at, command) in commands.iter().enumerate() {
        let status = run_one(command)?;

        let Some(connector) = chain.connectors.get(at) else {
            break;
        };
        if !connector.proceeds_after(status.success()) {
            debug!(at, ?connector, %status, "conditional chain short-circuited");
            return Ok(ChainOutcome::ShortCircuited { at, status });
        }
    }

    Ok(ChainOutcome::Completed)
}
