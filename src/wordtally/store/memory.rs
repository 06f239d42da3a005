use super::Store;
use crate::error::{Result, TallyError};

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    blob: Option<String>,
    preserved: Vec<String>,
    writes: usize,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `blob` already stored.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            ..Self::default()
        }
    }

    /// Make every following `set` fail until turned off again.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Blobs handed to `preserve_corrupt`, oldest first.
    pub fn preserved(&self) -> &[String] {
        &self.preserved
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Store for InMemoryStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn set(&mut self, blob: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(TallyError::Store("Simulated write error".to_string()));
        }
        self.blob = Some(blob.to_string());
        self.writes += 1;
        Ok(())
    }

    fn preserve_corrupt(&mut self, raw: &str) -> Result<String> {
        self.preserved.push(raw.to_string());
        Ok(format!("memory://corrupt/{}", self.preserved.len()))
    }

    fn location(&self) -> String {
        "memory://daily-stats".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::ledger::DailyLedger;
    use crate::model::History;

    /// Builds a store pre-loaded with history.
    #[derive(Default)]
    pub struct StoreFixture {
        history: History,
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add `day` with `(file, pre, cur)` entries.
        pub fn with_day(mut self, day: &str, files: &[(&str, u64, u64)]) -> Self {
            let mut ledger = DailyLedger::new();
            for (file, pre, cur) in files {
                ledger.record_words(file, *pre);
                ledger.record_words(file, *cur);
            }
            self.history.insert(day, ledger);
            self
        }

        pub fn history(&self) -> &History {
            &self.history
        }

        pub fn build(self) -> InMemoryStore {
            InMemoryStore::with_blob(self.history.to_json().unwrap())
        }
    }
}
