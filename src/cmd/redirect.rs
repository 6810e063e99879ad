use std::{
    fs::{File, OpenOptions},
    os::unix::{fs::OpenOptionsExt, io::AsRawFd},
};

use crate::{
    parse::redirect::{RedirectMode, Redirection},
    process::{spawn, wait_for, ChildStatus, PreparedCommand, SpawnError, Wiring},
};

use super::CommandError;

const CREATE_MODE: u32 = 0o644;

fn open_target(path: &str, mode: RedirectMode) -> Result<File, SpawnError> {
    let mut options = OpenOptions::new();
    match mode {
        RedirectMode::Input => options.read(true),
        RedirectMode::Output => options.write(true).create(true).truncate(true),
        RedirectMode::Append => options.append(true).create(true),
    };

    options
        .mode(CREATE_MODE)
        .open(path)
        .map_err(|source| SpawnError::Open {
            path: path.to_string(),
            source,
        })
}

/// Runs one command with stdin or stdout bound to the target file and waits
/// for it. The file is opened before forking, so an open failure spawns
/// nothing.
pub fn run_redirection(redirect: &Redirection<'_>) -> Result<ChildStatus, CommandError> {
    let command = PreparedCommand::new(&redirect.command)?;
    let file = open_target(redirect.target, redirect.mode)?;
    let fd = file.as_raw_fd();

    let wiring = match redirect.mode {
        RedirectMode::Input => Wiring {
            stdin: Some(fd),
            close: vec![fd],
            ..Wiring::default()
        },
        RedirectMode::Output | RedirectMode::Append => Wiring {
            stdout: Some(fd),
            close: vec![fd],
            ..Wiring::default()
        },
    };

    let pid = spawn(&command, &wiring)?;
    drop(file);

    let status = wait_for(pid)?;
    trace!(%command, target = redirect.target, %status, "redirection finished");
    Ok(status)
}
