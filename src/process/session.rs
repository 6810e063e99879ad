use std::{env, fs, io, path::PathBuf};

use nix::{
    errno::Errno,
    sys::signal::{kill, Signal},
    unistd::{getpgid, getpid, getppid, Pid},
};

/// Lists processes by process group. Implementations decide how.
pub trait ProcessEnumerator {
    fn process_group_members(&self, pgid: Pid) -> io::Result<Vec<Pid>>;
    fn executable_name(&self, pid: Pid) -> Option<String>;
}

/// Walks a procfs mount, `/proc` by default.
#[derive(Debug, Clone)]
pub struct Procfs {
    root: PathBuf,
}

impl Default for Procfs {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/proc"),
        }
    }
}

impl ProcessEnumerator for Procfs {
    fn process_group_members(&self, pgid: Pid) -> io::Result<Vec<Pid>> {
        let mut members = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let Ok(entry) = entry else { continue };
            let Some(pid) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<i32>().ok())
            else {
                continue;
            };
            let pid = Pid::from_raw(pid);

            // processes can vanish between readdir and getpgid
            if matches!(getpgid(Some(pid)), Ok(group) if group == pgid) {
                members.push(pid);
            }
        }

        members.sort_by_key(|pid| pid.as_raw());
        Ok(members)
    }

    fn executable_name(&self, pid: Pid) -> Option<String> {
        let comm = fs::read_to_string(self.root.join(pid.to_string()).join("comm")).ok()?;
        Some(comm.trim_end_matches('\n').to_string())
    }
}

pub trait Signaller {
    fn signal(&self, pid: Pid, signal: Signal) -> nix::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSignaller;

impl Signaller for SystemSignaller {
    fn signal(&self, pid: Pid, signal: Signal) -> nix::Result<()> {
        kill(pid, signal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    Delivered(Pid),
    /// The process exited before the signal arrived.
    AlreadyGone(Pid),
    Failed(Pid, Errno),
}

impl SignalOutcome {
    fn from_result(pid: Pid, result: nix::Result<()>) -> Self {
        match result {
            Ok(()) => Self::Delivered(pid),
            Err(Errno::ESRCH) => Self::AlreadyGone(pid),
            Err(errno) => Self::Failed(pid, errno),
        }
    }
}

/// Processes sharing the shell's process group. Every query re-enumerates;
/// nothing is cached between commands.
pub struct SessionRegistry {
    enumerator: Box<dyn ProcessEnumerator>,
    signaller: Box<dyn Signaller>,
    shell: Pid,
    parent: Pid,
}

impl SessionRegistry {
    pub fn new(
        enumerator: impl ProcessEnumerator + 'static,
        signaller: impl Signaller + 'static,
    ) -> Self {
        Self {
            enumerator: Box::new(enumerator),
            signaller: Box::new(signaller),
            shell: getpid(),
            parent: getppid(),
        }
    }

    pub fn system() -> Self {
        Self::new(Procfs::default(), SystemSignaller)
    }

    pub fn shell_pid(&self) -> Pid {
        self.shell
    }

    pub fn members(&self) -> io::Result<Vec<Pid>> {
        let pgid = getpgid(None)?;
        self.enumerator.process_group_members(pgid)
    }

    pub fn shell_name(&self) -> String {
        self.enumerator
            .executable_name(self.shell)
            .or_else(|| {
                env::current_exe()
                    .ok()?
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    }

    /// SIGKILL to the shell itself. Only returns if delivery failed.
    pub fn terminate_self(&self) -> nix::Result<()> {
        debug!(pid = %self.shell, "terminating shell");
        self.signaller.signal(self.shell, Signal::SIGKILL)
    }

    /// SIGTERM to every other process in the group running the same
    /// executable as this shell.
    pub fn terminate_peer_shells(&self) -> io::Result<Vec<SignalOutcome>> {
        let name = self.shell_name();

        let outcomes = self
            .members()?
            .into_iter()
            .filter(|&pid| pid != self.shell)
            .filter(|&pid| {
                self.enumerator.executable_name(pid).as_deref() == Some(name.as_str())
            })
            .map(|pid| {
                debug!(%pid, %name, "terminating peer shell");
                SignalOutcome::from_result(pid, self.signaller.signal(pid, Signal::SIGTERM))
            })
            .collect();

        Ok(outcomes)
    }

    /// SIGKILL to every group member except the shell and its parent.
    pub fn kill_group_except_shell(&self) -> io::Result<Vec<SignalOutcome>> {
        let outcomes = self
            .members()?
            .into_iter()
            .filter(|&pid| pid != self.shell && pid != self.parent)
            .map(|pid| {
                debug!(%pid, "killing session process");
                SignalOutcome::from_result(pid, self.signaller.signal(pid, Signal::SIGKILL))
            })
            .collect();

        Ok(outcomes)
    }
}
