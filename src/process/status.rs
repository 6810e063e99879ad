use std::fmt;

use nix::sys::{signal::Signal, wait::WaitStatus};

use super::child::EXEC_FAILURE_STATUS;

/// How a waited-for child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(Signal),
}

impl ChildStatus {
    /// `None` for statuses that do not mean the child is gone (stopped,
    /// continued, still running).
    pub fn from_wait(status: WaitStatus) -> Option<Self> {
        match status {
            WaitStatus::Exited(_, code) => Some(Self::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => Some(Self::Signaled(signal)),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(*code),
            Self::Signaled(_) => None,
        }
    }

    /// A signal death is a failure.
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }

    pub fn failure(&self) -> bool {
        !self.success()
    }

    pub fn exec_failed(&self) -> bool {
        matches!(self, Self::Exited(code) if *code == EXEC_FAILURE_STATUS)
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with status {code}"),
            Self::Signaled(signal) => write!(f, "killed by {signal:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use nix::unistd::Pid;

    use super::*;

    #[test]
    fn maps_terminal_wait_statuses() {
        let pid = Pid::from_raw(42);
        assert_eq!(
            ChildStatus::from_wait(WaitStatus::Exited(pid, 3)),
            Some(ChildStatus::Exited(3))
        );
        assert_eq!(
            ChildStatus::from_wait(WaitStatus::Signaled(pid, Signal::SIGKILL, false)),
            Some(ChildStatus::Signaled(Signal::SIGKILL))
        );
        assert_eq!(ChildStatus::from_wait(WaitStatus::StillAlive), None);
        assert_eq!(ChildStatus::from_wait(WaitStatus::Continued(pid)), None);
    }

    #[test]
    fn only_clean_zero_exit_succeeds() {
        assert!(ChildStatus::Exited(0).success());
        assert!(ChildStatus::Exited(1).failure());
        assert!(ChildStatus::Signaled(Signal::SIGTERM).failure());
        assert_eq!(ChildStatus::Signaled(Signal::SIGTERM).code(), None);
    }

    #[test]
    fn recognizes_exec_failure() {
        assert!(ChildStatus::Exited(EXEC_FAILURE_STATUS).exec_failed());
        assert!(!ChildStatus::Exited(1).exec_failed());
    }
}
