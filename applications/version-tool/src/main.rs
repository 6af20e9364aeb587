use std::env;

use anyhow::{Context as _, Result};
use tracing::debug;

use self::command::{Command, USAGE};

mod command;

fn main() -> Result<()> {
    log::init().context("Failed to initialize logging!")?;

    let command = Command::parse(env::args().skip(1)).with_context(|| {
        format!("Failed to parse command line arguments!\n\n{USAGE}")
    })?;

    debug!(?command, "Running command.");

    let output = command.run().context("Command failed!")?;

    println!("{output}");

    Ok(())
}
