use std::io;

use chainsh::{input::LineReader, logging, Flow, Shell, ShellConfig};
use color_eyre::Result;
use tracing_subscriber::prelude::*;

#[macro_use]
extern crate tracing;

fn main() -> Result<()> {
    if std::env::args_os().len() != 1 {
        println!("No Arguments needed");
        std::process::exit(1);
    }

    dotenvy::dotenv().ok();

    color_eyre::install()?;

    let config = ShellConfig::load()?;

    let writer = logging::log_writer(&config.log_dir);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_error::ErrorLayer::default())
        .init();

    trace!(?config, "starting shell");

    let mut shell = Shell::new(config);
    let mut reader = LineReader::new(io::stdin().lock());
    let mut stdout = io::stdout();

    while let Some(line) = reader.next_line(&shell.config().prompt, &mut stdout)? {
        if shell.execute_line(&line, &mut stdout)? == Flow::Exit {
            break;
        }
    }

    trace!("shell exiting");

    Ok(())
}
