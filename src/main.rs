//! postpeek - Fetch X post details from the terminal
//!
//! A terminal UI application that fetches a single X post's text, author,
//! engagement counts, and media through the X API, caches each result
//! locally, and tracks the monthly API call budget.

mod app;
mod cache;
mod cli;
mod config;
mod data;
mod export;
mod fetch;
mod quota;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppState};
use cache::PostCache;
use cli::{Cli, StartupConfig};
use config::Credentials;
use data::XApiClient;
use fetch::Fetcher;
use quota::QuotaTracker;

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

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match &app.state {
        AppState::Input => {
            ui::render_input(frame, app);
        }
        AppState::Fetching => {
            render_fetching(frame);
        }
        AppState::PostDetail(_) => {
            ui::render_post_detail(frame, app);
        }
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Renders a waiting message while the fetch (and any backoff) runs
fn render_fetching(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let text = Paragraph::new("Fetching post details... (waits out any rate limit)")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(text, chunks[1]);
}

/// Location of the persisted quota counter file
fn quota_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "postpeek")?;
    Some(project_dirs.cache_dir().join("quota.json"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let credentials = match Credentials::load() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    let bearer_token = match credentials.bearer_token() {
        Ok(token) => token.to_string(),
        Err(e) => {
            eprintln!("{}", e);
            if let Some(path) = Credentials::config_path() {
                eprintln!("Credentials file location: {}", path.display());
            }
            std::process::exit(1);
        }
    };

    let cache = PostCache::new().ok_or("Could not determine a cache directory")?;
    if startup.clear_cache {
        let removed = cache.clear()?;
        println!("Cache cleared: removed {} cached posts", removed);
    }

    let quota = QuotaTracker::new(quota_path().ok_or("Could not determine a cache directory")?);
    let fetcher = Fetcher::new(Box::new(XApiClient::new(bearer_token)), cache, quota);
    let mut app = App::with_startup_config(fetcher, &startup);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Run the queued fetch; blocks until it completes or fails
        if app.fetch_requested {
            app.fetch_requested = false;
            app.run_fetch().await;
            continue;
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
