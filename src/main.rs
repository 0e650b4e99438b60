//! prep-tui: Terminal companion for JEE preparation
//!
//! A keyboard-driven TUI for mock exams, AI tutoring, flashcards,
//! planning and syllabus tracking, backed by a generation endpoint.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::panic;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prep_tui::{App, AppConfig};

/// Setup the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    install_panic_hook();

    let config = AppConfig::load(None).unwrap_or_else(|e| {
        tracing::warn!("failed to load configuration, using defaults: {}", e);
        AppConfig::load_defaults()
    });

    tracing::info!("starting prep-tui, state in {:?}", config.storage_dir());

    let mut terminal = setup_terminal()?;

    // Run with Ctrl+C signal handling
    let result = {
        let mut app = App::new(config)?;

        tokio::select! {
            res = app.run(&mut terminal) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("received Ctrl+C, shutting down");
                Ok(())
            }
        }
    };

    // Restore terminal (always, even on error)
    restore_terminal(&mut terminal)?;

    result?;

    Ok(())
}
