//! # Rollover & Persistence Controller
//!
//! [`Tracker`] owns the single [`TrackerState`]: which day is active, that
//! day's [`DailyLedger`], and the full [`History`]. Nothing else mutates
//! them. Every entry point that may run after midnight goes through
//! [`Tracker::check_day`] first, so an observation is never recorded against
//! a stale day.
//!
//! ## Lifecycle
//!
//! ```text
//! load ──▶ Active(day) ──observe──▶ Active(day)
//!              │
//!              ├─ clock says day' ≠ day ──▶ flush(day) ──▶ Active(day')
//!              │
//!              └─ shutdown / manual flush ──▶ flush(day) ──▶ Active(day)
//! ```
//!
//! A flush commits the active ledger into the history and writes the whole
//! history through the [`Store`] in one `set` call. Detection is event
//! driven: a day with no observations never gets an entry.
//!
//! ## Failure policy
//!
//! - An unreadable blob at load is preserved through the store and replaced
//!   by an empty history. If it cannot be preserved, loading fails instead of
//!   risking the only copy.
//! - A failed write during an automatic rollover is logged and remembered;
//!   the observation is still recorded and the next flush retries. In-memory
//!   state stays authoritative until a write succeeds.

use crate::clock::{format_day, Clock};
use crate::error::{Result, TallyError};
use crate::ledger::DailyLedger;
use crate::model::{History, WordObservation};
use crate::store::Store;
use tracing::{debug, error, info, warn};

const EMPTY_STATE: &str = "{}";

/// Everything the controller tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerState {
    current_day: String,
    ledger: DailyLedger,
    history: History,
}

impl TrackerState {
    pub fn current_day(&self) -> &str {
        &self.current_day
    }

    /// The active day's ledger.
    pub fn ledger(&self) -> &DailyLedger {
        &self.ledger
    }

    /// History as of the last commit. The active day may be stale here.
    pub fn history(&self) -> &History {
        &self.history
    }
}

/// What happened while loading the persisted history.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Nothing was stored yet; an empty state was written.
    pub created: bool,
    /// The stored blob could not be parsed and was copied here.
    pub corrupt_backup: Option<String>,
    /// Number of days found in the history.
    pub days: usize,
}

/// A day boundary that was crossed and flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollover {
    pub from: String,
    pub to: String,
    /// Whether the flushed history reached the store.
    pub persisted: bool,
}

pub struct Tracker<S: Store, C: Clock> {
    store: S,
    clock: C,
    state: TrackerState,
    pending_persist: bool,
}

impl<S: Store, C: Clock> Tracker<S, C> {
    /// Read the history from `store` and activate the clock's current day.
    pub fn load(mut store: S, clock: C) -> Result<(Self, LoadReport)> {
        let mut report = LoadReport::default();
        let mut pending_persist = false;

        let history = match store.get() {
            Ok(None) => {
                report.created = true;
                match store.set(EMPTY_STATE) {
                    Ok(()) => info!(location = %store.location(), "created empty state"),
                    Err(err) => {
                        warn!(location = %store.location(), error = %err, "could not create state");
                        pending_persist = true;
                    }
                }
                History::new()
            }
            Ok(Some(raw)) => match History::from_json(&raw) {
                Ok(history) => history,
                Err(err) => recover_unreadable(&mut store, &raw, &err, &mut report)?,
            },
            Err(TallyError::InvalidUtf8 { lossy }) => {
                recover_unreadable(&mut store, &lossy, &"not valid UTF-8", &mut report)?
            }
            Err(err) => return Err(err),
        };

        let current_day = format_day(clock.today());
        let ledger = history.get(&current_day).cloned().unwrap_or_default();
        report.days = history.len();
        debug!(day = %current_day, days = report.days, files = ledger.len(), "tracker loaded");

        let tracker = Self {
            store,
            clock,
            state: TrackerState {
                current_day,
                ledger,
                history,
            },
            pending_persist,
        };
        Ok((tracker, report))
    }

    /// Record a new observation, rolling the day over first if needed.
    /// Returns the day's running total.
    pub fn observe(&mut self, observation: &WordObservation) -> i64 {
        self.check_day();

        let delta = self
            .state
            .ledger
            .record_observation(&observation.file_path, &observation.raw_text);
        let total = self.state.ledger.daily_total();
        debug!(
            file = %observation.file_path,
            pre = delta.pre,
            cur = delta.cur,
            total,
            "recorded observation"
        );
        total
    }

    /// Flush and switch ledgers if the clock moved to another day.
    pub fn check_day(&mut self) -> Option<Rollover> {
        let today = format_day(self.clock.today());
        if today == self.state.current_day {
            return None;
        }

        let from = self.state.current_day.clone();
        let persisted = match self.flush() {
            Ok(()) => true,
            Err(_) => {
                warn!(day = %from, "keeping day in memory until the next flush");
                false
            }
        };

        self.state.ledger = self.state.history.get(&today).cloned().unwrap_or_default();
        self.state.current_day = today.clone();
        info!(from = %from, to = %today, persisted, "day rolled over");

        Some(Rollover {
            from,
            to: today,
            persisted,
        })
    }

    /// Commit the active ledger and write the whole history.
    pub fn flush(&mut self) -> Result<()> {
        self.commit();
        self.persist()
    }

    /// Final flush before the process goes away.
    pub fn shutdown(&mut self) -> Result<()> {
        debug!(day = %self.state.current_day, "shutting down tracker");
        self.flush()
    }

    pub fn daily_total(&self) -> i64 {
        self.state.ledger.daily_total()
    }

    /// Text for the status surface.
    pub fn status_text(&self) -> String {
        format!("today: {}", self.daily_total())
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Ledger for `day`, looking at the active day first.
    pub fn ledger_for(&self, day: &str) -> Option<&DailyLedger> {
        if day == self.state.current_day {
            Some(&self.state.ledger)
        } else {
            self.state.history.get(day)
        }
    }

    /// History with the active ledger overlaid, without touching the store.
    pub fn history_snapshot(&self) -> History {
        let mut history = self.state.history.clone();
        if self.should_commit() {
            history.insert(self.state.current_day.clone(), self.state.ledger.clone());
        }
        history
    }

    /// A previous write failed and has not been retried successfully yet.
    pub fn pending_persist(&self) -> bool {
        self.pending_persist
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // An untouched day without a stored entry is not worth an empty `{}`.
    fn should_commit(&self) -> bool {
        !self.state.ledger.is_empty() || self.state.history.contains(&self.state.current_day)
    }

    fn commit(&mut self) {
        if self.should_commit() {
            self.state
                .history
                .insert(self.state.current_day.clone(), self.state.ledger.clone());
        }
    }

    fn persist(&mut self) -> Result<()> {
        let blob = self.state.history.to_json()?;
        match self.store.set(&blob) {
            Ok(()) => {
                if self.pending_persist {
                    info!(location = %self.store.location(), "persisted after earlier failure");
                }
                self.pending_persist = false;
                debug!(days = self.state.history.len(), "history persisted");
                Ok(())
            }
            Err(err) => {
                self.pending_persist = true;
                error!(location = %self.store.location(), error = %err, "failed to persist history");
                Err(err)
            }
        }
    }
}

/// Set an unparseable blob aside and start from an empty history.
fn recover_unreadable<S: Store>(
    store: &mut S,
    raw: &str,
    err: &dyn std::fmt::Display,
    report: &mut LoadReport,
) -> Result<History> {
    let backup = store.preserve_corrupt(raw)?;
    warn!(
        location = %store.location(),
        backup = %backup,
        error = %err,
        "stored history is unreadable; starting empty"
    );
    report.corrupt_backup = Some(backup);
    Ok(History::new())
}
