use std::{io, path::Path};

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_FILE: &str = "chainsh.log";

/// Opens `<dir>/chainsh.log` for appending. The appender writes on the
/// calling thread, so no logging thread exists when the shell forks.
pub fn open_log_file(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
}

/// The log file, or a sink when it cannot be created. Logging never keeps
/// the shell from starting.
pub fn log_writer(dir: &Path) -> BoxMakeWriter {
    match open_log_file(dir) {
        Ok(appender) => BoxMakeWriter::new(appender),
        Err(err) => {
            eprintln!("logging disabled: {err}");
            BoxMakeWriter::new(io::sink)
        }
    }
}
