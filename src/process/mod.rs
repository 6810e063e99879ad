use std::io;

use nix::{errno::Errno, unistd::Pid};
use thiserror::Error;

pub mod child;
pub mod jobs;
pub mod pipe;
pub mod session;
pub mod status;

pub use self::{
    child::{spawn, wait_for, PreparedCommand, Wiring, EXEC_FAILURE_STATUS},
    pipe::PipeLink,
    status::ChildStatus,
};

/// Resource failures while wiring up or running children. Anything already
/// opened by the failing component is closed on the way out.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("Fork failed")]
    Fork(#[source] Errno),
    #[error("Pipe creation failed")]
    Pipe(#[source] Errno),
    #[error("Failed to open file {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to wait for process {pid}")]
    Wait {
        pid: Pid,
        #[source]
        source: Errno,
    },
}

/// Runs `f` again for as long as it is interrupted by a signal.
pub(crate) fn syscall<F, T>(f: F) -> nix::Result<T>
where
    F: Fn() -> nix::Result<T>,
{
    loop {
        match f() {
            Err(Errno::EINTR) => continue,
            result => return result,
        }
    }
}
