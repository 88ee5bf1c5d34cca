//! Monthly API quota tracking
//!
//! The X API basic tier allows a fixed number of post lookups per calendar
//! month. This module persists a call counter alongside the period it was
//! counted in, and rolls the counter back to zero whenever the current
//! calendar month (year + month identity, not a rolling 30-day window)
//! differs from the stored period.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Monthly budget of post lookups
pub const MONTHLY_POST_BUDGET: u32 = 100;

/// Source of the current time
///
/// Injected into the tracker so tests can pin the calendar month instead of
/// depending on the wall clock.
pub trait Clock: Send + Sync {
    /// Returns the current time in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Persisted quota state: calls used and the period they were used in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct QuotaState {
    calls_used: u32,
    period_year: i32,
    period_month: u32,
}

/// Tracks API calls against the monthly budget, persisted to one JSON file
///
/// The tracker is consulted before every external call (`can_call`) and
/// updated after every successful one (`record_call`). A stored period from
/// an earlier month reads as zero calls used, so a call on the last day of
/// a month and one on the first day of the next land in different periods
/// regardless of elapsed wall-clock time.
pub struct QuotaTracker {
    /// File the quota state is persisted to
    path: PathBuf,
    /// Calls allowed per calendar month
    budget: u32,
    /// In-memory copy of the persisted state
    state: QuotaState,
    /// Time source for period checks
    clock: Box<dyn Clock>,
}

impl QuotaTracker {
    /// Creates a tracker persisted at the given path, using the system clock
    pub fn new(path: PathBuf) -> Self {
        Self::with_clock(path, Box::new(SystemClock))
    }

    /// Creates a tracker with an injected clock
    pub fn with_clock(path: PathBuf, clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        let state = load_state(&path).unwrap_or(QuotaState {
            calls_used: 0,
            period_year: now.year(),
            period_month: now.month(),
        });

        Self {
            path,
            budget: MONTHLY_POST_BUDGET,
            state,
            clock,
        }
    }

    /// Overrides the monthly budget
    #[cfg(test)]
    pub fn with_budget(mut self, budget: u32) -> Self {
        self.budget = budget;
        self
    }

    /// Returns the monthly budget
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Returns the calls used in the current calendar month
    ///
    /// A stored period older than the current month reads as zero without
    /// touching the persisted file; the file is rewritten on the next
    /// recorded call.
    pub fn used(&self) -> u32 {
        let now = self.clock.now();
        if self.state.period_year == now.year() && self.state.period_month == now.month() {
            self.state.calls_used
        } else {
            0
        }
    }

    /// Returns the calls remaining in the current calendar month
    pub fn remaining(&self) -> u32 {
        self.budget.saturating_sub(self.used())
    }

    /// Returns true if at least one call remains in the budget
    pub fn can_call(&self) -> bool {
        self.remaining() > 0
    }

    /// Records one completed API call and persists the new state
    ///
    /// Rolls the counter over to a fresh period first when the stored
    /// period is not the current calendar month.
    pub fn record_call(&mut self) -> std::io::Result<()> {
        let now = self.clock.now();
        if self.state.period_year != now.year() || self.state.period_month != now.month() {
            self.state = QuotaState {
                calls_used: 0,
                period_year: now.year(),
                period_month: now.month(),
            };
        }

        self.state.calls_used += 1;
        self.persist()
    }

    /// Days until the quota resets (first day of the next calendar month)
    pub fn days_until_reset(&self) -> i64 {
        let today = self.clock.now().date_naive();
        let (year, month) = if today.month() == 12 {
            (today.year() + 1, 1)
        } else {
            (today.year(), today.month() + 1)
        };

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|reset| (reset - today).num_days())
            .unwrap_or(0)
    }

    /// Writes the current state to disk
    fn persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&self.path, json)
    }
}

/// Loads persisted quota state, tolerating a missing or unreadable file
fn load_state(path: &Path) -> Option<QuotaState> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}
