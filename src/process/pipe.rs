use std::os::unix::io::RawFd;

use nix::{
    fcntl::OFlag,
    unistd::{close, pipe2},
};

use super::SpawnError;

/// Both ends of one pipe, owned by the parent. Dropping closes them; children
/// never run the destructor since they exec or `_exit`.
///
/// Ends are opened close-on-exec, so a stage only keeps what it dup2'd onto
/// stdin/stdout even if some unrelated fork happens meanwhile.
#[derive(Debug)]
pub struct PipeLink {
    read: RawFd,
    write: RawFd,
}

impl PipeLink {
    pub fn open() -> Result<Self, SpawnError> {
        let (read, write) = pipe2(OFlag::O_CLOEXEC).map_err(SpawnError::Pipe)?;
        trace!(read, write, "opened pipe");
        Ok(Self { read, write })
    }

    /// Opens `count` links; on failure the ones already opened are closed.
    pub fn open_many(count: usize) -> Result<Vec<Self>, SpawnError> {
        (0..count).map(|_| Self::open()).collect()
    }

    pub fn read_end(&self) -> RawFd {
        self.read
    }

    pub fn write_end(&self) -> RawFd {
        self.write
    }

    pub fn all_fds(links: &[Self]) -> Vec<RawFd> {
        links.iter().flat_map(|l| [l.read, l.write]).collect()
    }
}

impl Drop for PipeLink {
    fn drop(&mut self) {
        for fd in [self.read, self.write] {
            if let Err(err) = close(fd) {
                warn!(fd, %err, "failed to close pipe end");
            }
        }
    }
}
