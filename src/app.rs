//! Application state management for postpeek
//!
//! This module contains the main application state, handling keyboard
//! input, the single in-flight fetch request, and state transitions
//! between the input prompt and the post detail view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

use crate::data::PostRecord;
use crate::export;
use crate::fetch::Fetcher;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Link input prompt
    Input,
    /// A fetch is in flight (including any rate-limit backoff wait)
    Fetching,
    /// Detail view for the fetched post
    PostDetail(String),
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Text typed into the link prompt
    pub input: String,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag asking the main loop to run a fetch for the current input
    pub fetch_requested: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Error message shown under the prompt, if any
    pub error: Option<String>,
    /// Transient success notice (e.g. after an export)
    pub notice: Option<String>,
    /// The most recently fetched post
    pub current_post: Option<PostRecord>,
    /// Scroll offset for the post detail view
    pub detail_scroll_offset: u16,
    /// File the plain-text export appends to
    pub export_path: PathBuf,
    /// Fetch orchestrator (cache + quota + API client)
    fetcher: Fetcher,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            state: AppState::Input,
            input: String::new(),
            should_quit: false,
            fetch_requested: false,
            show_help: false,
            error: None,
            notice: None,
            current_post: None,
            detail_scroll_offset: 0,
            export_path: PathBuf::from(export::DEFAULT_EXPORT_FILE),
            fetcher,
        }
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// A link supplied on the command line is queued so the main loop
    /// fetches it before the first keypress.
    pub fn with_startup_config(fetcher: Fetcher, config: &crate::cli::StartupConfig) -> Self {
        let mut app = Self::new(fetcher);

        if let Some(link) = &config.initial_link {
            app.input = link.clone();
            app.fetch_requested = true;
            app.state = AppState::Fetching;
        }

        app
    }

    /// Number of posts in the local cache
    pub fn cached_posts(&self) -> usize {
        self.fetcher.cache().len()
    }

    /// API calls used this calendar month
    pub fn quota_used(&self) -> u32 {
        self.fetcher.quota().used()
    }

    /// Monthly API call budget
    pub fn quota_budget(&self) -> u32 {
        self.fetcher.quota().budget()
    }

    /// Days until the quota resets
    pub fn quota_days_until_reset(&self) -> i64 {
        self.fetcher.quota().days_until_reset()
    }

    /// Handles a keyboard event according to the current state
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits, even mid-typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match self.state {
            AppState::Input => self.handle_input_key(key),
            // Keys are ignored while a fetch is in flight
            AppState::Fetching => {}
            AppState::PostDetail(_) => self.handle_detail_key(key),
        }
    }

    /// Key handling for the link prompt
    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if !self.input.trim().is_empty() {
                    self.error = None;
                    self.notice = None;
                    self.fetch_requested = true;
                    self.state = AppState::Fetching;
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.error = None;
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    /// Key handling for the post detail view
    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('n') => {
                self.state = AppState::Input;
                self.input.clear();
                self.notice = None;
                self.detail_scroll_offset = 0;
            }
            KeyCode::Char('e') => {
                self.export_current();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail_scroll_offset = self.detail_scroll_offset.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Runs the fetch queued by `fetch_requested`
    ///
    /// Blocks the UI for the duration, including any rate-limit backoff;
    /// the application serves one interactive request at a time.
    pub async fn run_fetch(&mut self) {
        let input = self.input.clone();

        match self.fetcher.fetch(&input).await {
            Ok(record) => {
                let id = record.id.clone();
                self.current_post = Some(record);
                self.input.clear();
                self.detail_scroll_offset = 0;
                self.state = AppState::PostDetail(id);
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = AppState::Input;
            }
        }
    }

    /// Appends the current post to the plain-text export file
    fn export_current(&mut self) {
        let Some(record) = &self.current_post else {
            return;
        };

        match export::append_summary(record, &self.export_path) {
            Ok(()) => {
                self.notice = Some(format!("Saved to {}", self.export_path.display()));
            }
            Err(e) => {
                self.error = Some(format!("Export failed: {}", e));
            }
        }
    }
}
