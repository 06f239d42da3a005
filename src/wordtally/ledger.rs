//! # Daily Ledger
//!
//! One calendar day's worth of per-file word counts. The first observation of
//! a file fixes its `pre` baseline; every later observation only moves `cur`.
//! The day's total is the sum of `cur - pre`, so deletions count against it.
//!
//! The ledger knows nothing about which day it is. The controller decides that
//! and swaps ledgers when the day changes.

use crate::measure::measure;
use crate::model::FileDelta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyLedger {
    files: BTreeMap<String, FileDelta>,
}

impl DailyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure `raw_text` and record it as the current state of `file_path`.
    pub fn record_observation(&mut self, file_path: &str, raw_text: &str) -> FileDelta {
        self.record_words(file_path, measure(raw_text))
    }

    /// Record an already measured count for `file_path`.
    pub fn record_words(&mut self, file_path: &str, words: u64) -> FileDelta {
        match self.files.get_mut(file_path) {
            Some(delta) => {
                delta.cur = words;
                *delta
            }
            None => {
                let delta = FileDelta::baseline(words);
                self.files.insert(file_path.to_string(), delta);
                delta
            }
        }
    }

    /// Net words added today across all files.
    pub fn daily_total(&self) -> i64 {
        self.files.values().map(FileDelta::net).sum()
    }

    pub fn get(&self, file_path: &str) -> Option<&FileDelta> {
        self.files.get(file_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileDelta)> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
