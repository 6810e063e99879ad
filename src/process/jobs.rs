use nix::{
    errno::Errno,
    sys::{
        signal::kill,
        wait::{waitpid, WaitPidFlag, WaitStatus},
    },
    unistd::Pid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub pid: Pid,
    pub launch_order: usize,
    reaped: bool,
}

impl Job {
    /// Reaps the job if it has finished, then falls back to a zero-signal
    /// delivery check. A job that is no longer our child counts as reaped, since
    /// its pid may already belong to someone else.
    fn probe(&mut self) -> bool {
        if self.reaped {
            return false;
        }

        match waitpid(self.pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => true,
            Ok(WaitStatus::Exited(..) | WaitStatus::Signaled(..)) => {
                trace!(pid = %self.pid, "reaped background job");
                self.reaped = true;
                false
            }
            Ok(_) => true,
            Err(Errno::ECHILD) => {
                trace!(pid = %self.pid, "background job already reaped elsewhere");
                self.reaped = true;
                false
            }
            Err(_) => kill(self.pid, None).is_ok(),
        }
    }
}

/// Background processes launched by this shell. Entries are never removed.
#[derive(Debug, Default)]
pub struct JobTracker {
    jobs: Vec<Job>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pid: Pid) -> &Job {
        let job = Job {
            pid,
            launch_order: self.jobs.len(),
            reaped: false,
        };
        debug!(%pid, order = job.launch_order, "tracking background job");
        self.jobs.push(job);
        &self.jobs[self.jobs.len() - 1]
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn alive_count(&mut self) -> usize {
        self.jobs.iter_mut().map(Job::probe).filter(|alive| *alive).count()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        process::Command,
        thread,
        time::{Duration, Instant},
    };

    use super::*;

    fn background(secs: &str) -> Pid {
        let child = Command::new("sleep").arg(secs).spawn().unwrap();
        Pid::from_raw(child.id() as i32)
    }

    #[test]
    fn counts_until_job_exits() {
        let mut tracker = JobTracker::new();
        tracker.record(background("0.2"));
        assert_eq!(tracker.alive_count(), 1);

        let deadline = Instant::now() + Duration::from_secs(5);
        while tracker.alive_count() > 0 {
            assert!(Instant::now() < deadline, "job never exited");
            thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(tracker.alive_count(), 0);
        assert_eq!(tracker.jobs().len(), 1);
    }

    #[test]
    fn live_process_that_is_not_our_child_is_not_counted() {
        // the parent is alive and signalable but can never be waited on
        let mut tracker = JobTracker::new();
        tracker.record(nix::unistd::getppid());
        assert_eq!(tracker.alive_count(), 0);
        assert_eq!(tracker.alive_count(), 0);
    }

    #[test]
    fn launch_order_follows_recording() {
        let mut tracker = JobTracker::new();
        let first = tracker.record(Pid::from_raw(i32::MAX - 1)).launch_order;
        let second = tracker.record(Pid::from_raw(i32::MAX - 2)).launch_order;
        assert_eq!((first, second), (0, 1));
    }
}
