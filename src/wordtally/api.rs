//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every wordtally operation, whatever the UI.
//!
//! It dispatches to the command functions, owns the [`Tracker`] for the
//! lifetime of the client, and returns structured `Result<CmdResult>` values.
//! It does no printing and holds no business logic.
//!
//! ## Generic Over Store and Clock
//!
//! `TallyApi<S: Store, C: Clock>`:
//! - Production: `TallyApi<Box<dyn Store>, Box<dyn Clock>>`, backend picked
//!   from config at startup
//! - Testing: `TallyApi<InMemoryStore, FixedClock>`
//!
//! ## Lifecycle
//!
//! Clients must call [`TallyApi::close`] before exiting; it performs the
//! final flush.

use crate::clock::Clock;
use crate::commands;
use crate::controller::Tracker;
use crate::error::Result;
use crate::events::{self, EventSource, StatusSink};
use crate::store::Store;
use std::path::{Path, PathBuf};

pub struct TallyApi<S: Store, C: Clock> {
    tracker: Tracker<S, C>,
    paths: commands::TallyPaths,
}

impl<S: Store, C: Clock> TallyApi<S, C> {
    pub fn new(tracker: Tracker<S, C>, paths: commands::TallyPaths) -> Self {
        Self { tracker, paths }
    }

    pub fn observe_files(&mut self, root: &Path, files: &[PathBuf]) -> Result<commands::CmdResult> {
        commands::observe::run(&mut self.tracker, root, files)
    }

    pub fn today(&mut self) -> Result<commands::CmdResult> {
        commands::today::run(&mut self.tracker)
    }

    pub fn flush(&mut self) -> Result<commands::CmdResult> {
        commands::flush::run(&mut self.tracker)
    }

    pub fn history(&mut self, limit: Option<usize>) -> Result<commands::CmdResult> {
        commands::history::run(&mut self.tracker, limit)
    }

    pub fn show(&mut self, day: Option<&str>) -> Result<commands::CmdResult> {
        commands::show::run(&mut self.tracker, day)
    }

    /// Drive the tracker from `source` until it stops.
    pub fn watch<E, K>(&mut self, source: &mut E, sink: &mut K) -> Result<commands::CmdResult>
    where
        E: EventSource + ?Sized,
        K: StatusSink + ?Sized,
    {
        let processed = events::drive(&mut self.tracker, source, sink)?;
        let mut result = commands::CmdResult::default().with_status_line(self.tracker.status_text());
        result.add_message(commands::CmdMessage::info(format!(
            "Processed {} observation(s)",
            processed
        )));
        Ok(result)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn locations(&self) -> Result<commands::CmdResult> {
        commands::paths::run(&self.paths, &self.tracker)
    }

    /// Final flush. Call once before the client exits.
    pub fn close(&mut self) -> Result<()> {
        self.tracker.shutdown()
    }

    pub fn tracker(&self) -> &Tracker<S, C> {
        &self.tracker
    }

    pub fn paths(&self) -> &commands::TallyPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{
    CmdMessage, CmdResult, DaySummary, FileRow, MessageLevel, PathEntry, TallyPaths,
};
