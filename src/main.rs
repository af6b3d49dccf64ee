//! Lunch Glance - a terminal widget for your Lunch Money monthly summary
//!
//! One invocation resolves the API token, runs the aggregation pipeline
//! (serving a cached snapshot when it is under two hours old), and renders
//! the result until the user quits.

mod aggregate;
mod app;
mod cache;
mod cli;
mod credentials;
mod data;
mod ui;

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::UserDirs;
use ratatui::{backend::CrosstermBackend, Terminal};

use aggregate::Aggregator;
use app::{App, AppState};
use cache::CacheStore;
use cli::Cli;
use credentials::{CredentialStore, TerminalPrompt};
use data::LunchMoneyClient;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Resolves the snapshot cache location
///
/// The cache lives in the synced documents namespace when the platform has
/// one, so the snapshot follows the token across machines; otherwise it
/// falls back to the XDG cache directory.
fn resolve_cache_store() -> Option<CacheStore> {
    if let Some(dirs) = UserDirs::new() {
        if let Some(documents) = dirs.document_dir() {
            return Some(CacheStore::with_dir(documents.join("LunchGlance")));
        }
    }
    CacheStore::new()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Resolve the credential before touching terminal state; the prompt
    // writes to the normal screen on first run.
    let credential_store =
        CredentialStore::new().ok_or("could not determine a home directory")?;
    let mut prompt = TerminalPrompt;
    let token = credential_store.get(&mut prompt)?;

    let cache = resolve_cache_store().ok_or("could not determine a cache directory")?;
    let aggregator = Aggregator::new(LunchMoneyClient::new(token), cache);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    // Initial render to show loading state
    terminal.draw(|f| ui::render(f, &app))?;

    // Run the pipeline once; a fresh cached snapshot means no network calls
    let summary = aggregator.get_summary(cli.refresh).await;
    app.apply_summary(summary);

    // Main event loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.refresh_requested {
            app.refresh_requested = false;
            app.state = AppState::Loading;
            terminal.draw(|f| ui::render(f, &app))?;
            let summary = aggregator.get_summary(true).await;
            app.apply_summary(summary);
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
