//! Command-line/environment configuration and diagnostic logging setup.
//!
use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Parser, Debug, Clone)]
#[command(name = "user-admin-tui")]
#[command(about = "Add, edit and delete users through a REST backend")]
pub struct Cli {
    /// Backend base address
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds; requests wait indefinitely when unset
    #[arg(long, env = "API_TIMEOUT_SECS")]
    pub request_timeout: Option<u64>,

    /// Where diagnostics are written (the terminal belongs to the UI)
    #[arg(long, env = "USER_ADMIN_LOG", default_value = "user-admin-tui.log")]
    pub log_file: PathBuf,

    /// Keybinding overrides; ignored when the file does not exist
    #[arg(long, default_value = "keybinds.conf")]
    pub keybinds: PathBuf,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_secs)
    }
}

/// Install a global `fmt` subscriber appending to `path`.
///
/// Respects `RUST_LOG`; falls back to `info`.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}
