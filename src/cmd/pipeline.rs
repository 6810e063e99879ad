use nix::unistd::Pid;

use crate::{
    parse::chain::{Chain, ChainKind},
    process::{spawn, wait_for, ChildStatus, PipeLink, PreparedCommand, Wiring},
};

use super::CommandError;

/// Exit statuses of the stages that could be waited for, in execution order.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub statuses: Vec<ChildStatus>,
}

impl PipelineReport {
    pub fn last(&self) -> Option<&ChildStatus> {
        self.statuses.last()
    }
}

fn collect(pids: Vec<Pid>) -> PipelineReport {
    let statuses = pids
        .into_iter()
        .filter_map(|pid| match wait_for(pid) {
            Ok(status) => Some(status),
            Err(err) => {
                warn!(%pid, %err, "lost pipeline stage");
                None
            }
        })
        .collect();

    PipelineReport { statuses }
}

/// Connects every stage to the next through its own pipe and runs them all
/// at once. A reverse pipe flips the whole chain first, so data flows from
/// the last written command to the first.
///
/// Returns only after every started stage has terminated.
pub fn run_pipeline(chain: &Chain<'_>) -> Result<PipelineReport, CommandError> {
    let mut segments = chain.segments.iter().collect::<Vec<_>>();
    if chain.kind == ChainKind::ReversePipe {
        segments.reverse();
    }

    let commands = segments
        .into_iter()
        .map(PreparedCommand::new)
        .collect::<Result<Vec<_>, _>>()?;

    let last = commands.len().saturating_sub(1);
    let links = PipeLink::open_many(last)?;
    let pipe_fds = PipeLink::all_fds(&links);

    let mut pids = Vec::with_capacity(commands.len());
    for (i, command) in commands.iter().enumerate() {
        let wiring = Wiring {
            stdin: (i > 0).then(|| links[i - 1].read_end()),
            stdout: (i < last).then(|| links[i].write_end()),
            close: pipe_fds.clone(),
        };

        match spawn(command, &wiring) {
            Ok(pid) => pids.push(pid),
            Err(err) => {
                // closing our ends lets the stages already running see EOF
                drop(links);
                collect(pids);
                return Err(err.into());
            }
        }
    }

    drop(links);

    let report = collect(pids);
    debug!(stages = commands.len(), ?report, "pipeline finished");
    Ok(report)
}
