// tracing setup - stderr for one-shot runs, a file for the tui

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

use crate::Error;

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
}

pub fn init_stderr() -> Result<(), Error> {
    fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

// the terminal belongs to the tui, so diagnostics go to a file or nowhere
pub fn init_file(path: &Path) -> Result<(), Error> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::Logging(format!("{}: {e}", path.display())))?;

    fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
