//! user-admin-tui binary entry point.
//!
//! Parses configuration, starts file logging, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use user_admin_tui::api::HttpApi;
use user_admin_tui::app::{self, AppState, keymap::Keymap};
use user_admin_tui::config::{self, Cli};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    config::init_logging(&cli.log_file)?;
    tracing::info!(api_url = %cli.api_url, "starting");

    let api = HttpApi::new(&cli.api_url, cli.timeout())
        .map_err(|e| anyhow::anyhow!("configure backend client: {e}"))?;
    let mut state = AppState::new(Box::new(api), Keymap::load(&cli.keybinds));

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = &res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    res
}
