//! Logging init: file under the XDG state dir, falling back to stderr.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

struct FileWriter(File);

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = Box<dyn io::Write>;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => Box::new(f),
            Err(_) => Box::new(io::stderr()),
        }
    }
}

fn open_log_file() -> anyhow::Result<(File, PathBuf)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("codestl")?;
    let log_dir = xdg_dirs.get_state_home().join("codestl");
    fs::create_dir_all(&log_dir)?;
    let path = log_dir.join("codestl.log");
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Initialize structured logging to `~/.local/state/codestl/codestl.log`.
/// If the state dir is unwritable the server logs to stderr instead of refusing to start.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,codestl=debug"));

    let (writer, file_path) = match open_log_file() {
        Ok((file, path)) => (BoxMakeWriter::new(FileWriter(file)), Some(path)),
        Err(_) => (BoxMakeWriter::new(io::stderr), None),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    match file_path {
        Some(path) => tracing::info!("codestl logging initialized at {}", path.display()),
        None => tracing::warn!("state dir unwritable, logging to stderr"),
    }
}
