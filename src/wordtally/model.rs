use crate::ledger::DailyLedger;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A single "this file now contains this text" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordObservation {
    pub file_path: String,
    pub raw_text: String,
}

impl WordObservation {
    pub fn new(file_path: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Build an observation for a file on disk, keyed relative to `root`.
    pub fn from_path(root: &Path, path: &Path, raw_text: String) -> Self {
        Self {
            file_path: file_key(root, path),
            raw_text,
        }
    }
}

/// Ledger key for `path`: relative to `root` with `/` separators, or the
/// full path when it lives outside `root`.
pub fn file_key(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        _ => path.to_string_lossy().into_owned(),
    }
}

/// Word counts for one file on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDelta {
    /// Count at the first observation of the day. Never changes afterwards.
    pub pre: u64,
    /// Count at the latest observation of the day.
    pub cur: u64,
}

impl FileDelta {
    pub fn baseline(words: u64) -> Self {
        Self {
            pre: words,
            cur: words,
        }
    }

    pub fn net(&self) -> i64 {
        self.cur as i64 - self.pre as i64
    }
}

/// Every recorded day, keyed by `YYYY-MM-DD`.
///
/// Serializes to the persisted layout directly:
/// `{ "2024-01-01": { "notes.md": { "pre": 2, "cur": 3 } } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    days: BTreeMap<String, DailyLedger>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn get(&self, day: &str) -> Option<&DailyLedger> {
        self.days.get(day)
    }

    pub fn contains(&self, day: &str) -> bool {
        self.days.contains_key(day)
    }

    pub fn insert(&mut self, day: impl Into<String>, ledger: DailyLedger) {
        self.days.insert(day.into(), ledger);
    }

    /// Days in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&String, &DailyLedger)> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
