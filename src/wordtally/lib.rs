//! # Wordtally Architecture
//!
//! Wordtally is a **UI-agnostic word tracking library**. It answers one
//! question, "how many words did I add today?", for whatever surface feeds it
//! edits: the bundled CLI and directory watcher, an editor plugin, or a test.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints results, owns exit codes        │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the Tracker              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation per module, returns structured CmdResult   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (controller.rs, ledger.rs, measure.rs)                │
//! │  - Day rollover, per-file {pre, cur} deltas, word counting  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Store trait: get/set of one JSON blob                    │
//! │  - FileStore, SettingsStore (production), InMemoryStore     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## How a Day is Tracked
//!
//! Every observation is a file path plus that file's full text. The first
//! time a file is seen on a given day its word count becomes the baseline
//! (`pre`); later observations only update `cur`. The daily total is the sum
//! of `cur - pre` over the day's files, so it goes down when text is deleted.
//!
//! When the clock reports a new day, the controller flushes the finished day
//! into the history and persists it before recording anything else. The
//! history is written in full on every flush.
//!
//! ## Capabilities
//!
//! The core depends only on small traits, so it runs without a real editor:
//!
//! - [`store::Store`]: where the history blob lives
//! - [`clock::Clock`]: what day it is
//! - [`events::EventSource`] / [`events::StatusSink`]: where edits come from
//!   and where the running total goes
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests with `InMemoryStore` and
//!    `FixedClock`, which can be moved across midnight at will.
//! 2. **Stores**: filesystem tests in temp directories.
//! 3. **CLI**: end-to-end tests in `tests/` driving the binary with
//!    `WORDTALLY_HOME` and `WORDTALLY_TODAY`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`controller`]: Tracker state, day rollover and flushing
//! - [`ledger`]: One day's per-file deltas
//! - [`measure`]: Text to word count
//! - [`model`]: Observations, deltas, history
//! - [`store`]: Storage abstraction and implementations
//! - [`clock`]: Calendar day source
//! - [`events`]: Event source and status sink capabilities
//! - [`watch`]: Directory watcher event source
//! - [`config`]: Configuration management
//! - [`init`]: Environment resolution and wiring
//! - [`error`]: Error types

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod init;
pub mod ledger;
pub mod measure;
pub mod model;
pub mod store;
pub mod watch;
