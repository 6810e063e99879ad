use std::io;

use thiserror::Error;

use crate::{fileops::FileOpError, parse::ParseError, process::SpawnError};

pub mod chain;
pub mod execute;
pub mod execution_plan;
pub mod pipeline;
pub mod redirect;

/// Whether the read loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error(transparent)]
    File(#[from] FileOpError),
    #[error("Error reading session processes")]
    Session(#[source] io::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
