//! Logging setup for the CLI.
//!
//! Records go to stderr through `env_logger`. With `--log-file`, every record
//! is also appended to that file, so long unattended runs leave a trail.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialize the global logger.
///
/// `RUST_LOG` is honored when `--log-level` is left at its default, so module
/// filters stay available for debugging.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<()> {
    let level = LevelFilter::from_str(level)
        .with_context(|| format!("Invalid log level '{}'", level))?;

    let mut builder = if level == LevelFilter::Info {
        Builder::from_env(Env::default().default_filter_or("info"))
    } else {
        let mut builder = Builder::new();
        builder.filter_level(level);
        builder
    };
    builder.format_timestamp_secs();

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(Tee { file })));
    }

    // A logger may already be installed when the CLI is driven from tests
    let _ = builder.try_init();
    Ok(())
}

/// Writes every log record to stderr and to a file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
