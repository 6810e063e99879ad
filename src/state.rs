use std::io::{self, Write};

use crate::{
    cmd::{execution_plan::ExecutionPlan, CommandError, Flow},
    config::ShellConfig,
    fileops::{FileOp, LocalFiles},
    parse::{tokenize, ParseError},
    process::{jobs::JobTracker, session::SessionRegistry},
};

/// Everything that outlives a single input line.
pub struct Shell {
    config: ShellConfig,
    jobs: JobTracker,
    session: SessionRegistry,
    files: Box<dyn FileOp>,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Self::with_session(config, SessionRegistry::system())
    }

    pub fn with_session(config: ShellConfig, session: SessionRegistry) -> Self {
        Self {
            config,
            jobs: JobTracker::new(),
            session,
            files: Box::new(LocalFiles),
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn jobs(&self) -> &JobTracker {
        &self.jobs
    }

    pub fn jobs_mut(&mut self) -> &mut JobTracker {
        &mut self.jobs
    }

    pub fn session(&self) -> &SessionRegistry {
        &self.session
    }

    pub fn files(&self) -> &dyn FileOp {
        self.files.as_ref()
    }

    fn run_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow, CommandError> {
        let tokens = tokenize(line).map_err(ParseError::from)?;
        let plan = ExecutionPlan::classify(&tokens, &self.config.limits)?;

        trace!(?plan, "execution plan");

        plan.execute(self, out)
    }

    /// Runs one input line. Failures are reported on `out` and the line is
    /// dropped; only a failure to write to `out` is returned.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        match self.run_line(line, out) {
            Ok(flow) => Ok(flow),
            Err(CommandError::Io(err)) => Err(err),
            Err(err) => {
                debug!(%line, error = ?err, "line failed");
                writeln!(out, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }
}
