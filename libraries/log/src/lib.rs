use std::{fmt, io::stderr};

use anyhow::{anyhow, Result};
use chrono::Utc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{fmt, format::Writer, time::FormatTime};

use environment::{Flag, ReadFromVar as _};

/// Installs the global subscriber. Diagnostics go to standard error so that
/// standard output stays reserved for results.
///
/// `DEBUG_LOGGING` lowers the maximum level to `DEBUG`, defaulting to on in
/// debug builds. `OUTPUT_JSON` switches to machine-readable events.
pub fn init() -> Result<()> {
    let debug_logging = Flag::read_from_optional_var("DEBUG_LOGGING")?
        .map_or(cfg!(debug_assertions), Flag::get);

    let output_json =
        Flag::read_from_optional_var("OUTPUT_JSON")?.is_some_and(Flag::get);

    let builder = fmt()
        .with_ansi(true)
        .with_file(false)
        .with_level(true)
        .with_line_number(false)
        .with_target(false)
        .with_timer(UtcTimestamp)
        .with_writer(stderr)
        .with_max_level(if debug_logging {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        });

    if output_json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    }
    .map_err(|error| anyhow!(error).context("Failed to initialize logging!"))
}

struct UtcTimestamp;

impl FormatTime for UtcTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}
