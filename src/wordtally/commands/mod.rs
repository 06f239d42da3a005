use crate::config::TallyConfig;
use crate::ledger::DailyLedger;
use std::path::PathBuf;

pub mod config;
pub mod flush;
pub mod history;
pub mod observe;
pub mod paths;
pub mod show;
pub mod today;

#[derive(Debug, Clone)]
pub struct TallyPaths {
    /// Directory holding the state file and config.json
    pub data_dir: PathBuf,
}

impl TallyPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One day in a history listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub day: String,
    pub files: usize,
    pub total: i64,
}

/// One file of a day's ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub path: String,
    pub pre: u64,
    pub cur: u64,
    pub net: i64,
}

/// A labelled location, for `paths`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub label: String,
    pub location: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub status_line: Option<String>,
    pub day_summaries: Vec<DaySummary>,
    pub file_rows: Vec<FileRow>,
    pub paths: Vec<PathEntry>,
    pub dump: Option<String>,
    pub config: Option<TallyConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_status_line(mut self, status: String) -> Self {
        self.status_line = Some(status);
        self
    }

    pub fn with_day_summaries(mut self, days: Vec<DaySummary>) -> Self {
        self.day_summaries = days;
        self
    }

    pub fn with_file_rows(mut self, rows: Vec<FileRow>) -> Self {
        self.file_rows = rows;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathEntry>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_dump(mut self, dump: String) -> Self {
        self.dump = Some(dump);
        self
    }

    pub fn with_config(mut self, config: TallyConfig) -> Self {
        self.config = Some(config);
        self
    }
}

pub(crate) fn file_rows(ledger: &DailyLedger) -> Vec<FileRow> {
    ledger
        .iter()
        .map(|(path, delta)| FileRow {
            path: path.clone(),
            pre: delta.pre,
            cur: delta.cur,
            net: delta.net(),
        })
        .collect()
}
