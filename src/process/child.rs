use std::{
    ffi::{CStr, CString},
    fmt,
    os::unix::io::RawFd,
};

use itertools::Itertools;
use nix::{
    libc::{self, STDIN_FILENO, STDOUT_FILENO},
    sys::{
        signal::{signal, SigHandler, Signal},
        wait::waitpid,
    },
    unistd::{self, close, dup2, execvp, fork, ForkResult, Pid},
};

use crate::parse::{chain::Segment, ParseError};

use super::{status::ChildStatus, syscall, SpawnError};

/// Exit status of a child whose program could not be executed.
pub const EXEC_FAILURE_STATUS: i32 = 127;

/// Everything a child needs to exec, built before forking so the child only
/// has to rewire descriptors and call `execvp`.
#[derive(Debug, Clone)]
pub struct PreparedCommand {
    argv: Vec<CString>,
    failure_message: Vec<u8>,
}

impl PreparedCommand {
    pub fn new(segment: &Segment<'_>) -> Result<Self, ParseError> {
        let argv = segment
            .words()
            .iter()
            .map(|word| CString::new(*word).map_err(|_| ParseError::NulByte(word.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            argv,
            failure_message: format!("Exec failed for {}\n", segment.program()).into_bytes(),
        })
    }

    pub fn program(&self) -> &CStr {
        &self.argv[0]
    }

    fn exec(&self, wiring: &Wiring) -> ! {
        // the Rust runtime ignores SIGPIPE, and ignored dispositions survive exec
        // SAFETY: restoring the default disposition installs no handler.
        let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };

        if let Some(fd) = wiring.stdin {
            let _ = dup2(fd, STDIN_FILENO);
        }
        if let Some(fd) = wiring.stdout {
            let _ = dup2(fd, STDOUT_FILENO);
        }
        for &fd in &wiring.close {
            let _ = close(fd);
        }

        let _ = execvp(self.program(), &self.argv);

        // reported on the rewired stdout, like every other status line
        let _ = unistd::write(STDOUT_FILENO, &self.failure_message);
        // SAFETY: `_exit` skips atexit handlers and stdio flushing, none of
        // which may run in a forked copy of the shell.
        unsafe { libc::_exit(EXEC_FAILURE_STATUS) }
    }
}

impl fmt::Display for PreparedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.argv.iter().map(|arg| arg.to_string_lossy()).join(" ")
        )
    }
}

/// Descriptor plumbing applied in the child between `fork` and `exec`.
#[derive(Debug, Clone, Default)]
pub struct Wiring {
    pub stdin: Option<RawFd>,
    pub stdout: Option<RawFd>,
    /// Closed after the dup2 calls so no extra descriptor reaches the program.
    pub close: Vec<RawFd>,
}

impl Wiring {
    pub fn inherit() -> Self {
        Self::default()
    }
}

pub fn spawn(command: &PreparedCommand, wiring: &Wiring) -> Result<Pid, SpawnError> {
    trace!(%command, ?wiring, "forking");

    // SAFETY: the child only performs dup2/close/execvp/write/_exit on data
    // prepared before the fork, and never returns into the caller.
    match unsafe { fork() }.map_err(SpawnError::Fork)? {
        ForkResult::Parent { child } => {
            debug!(pid = %child, %command, "spawned");
            Ok(child)
        }
        ForkResult::Child => command.exec(wiring),
    }
}

/// Blocks until this specific child terminates.
pub fn wait_for(pid: Pid) -> Result<ChildStatus, SpawnError> {
    loop {
        let status =
            syscall(|| waitpid(pid, None)).map_err(|source| SpawnError::Wait { pid, source })?;

        if let Some(status) = ChildStatus::from_wait(status) {
            debug!(%pid, %status, "child finished");
            return Ok(status);
        }
    }
}
