use super::{preserve_file, read_text, write_atomic, Store};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STATE_FILENAME: &str = "daily-stats.json";

/// Stores the history as `daily-stats.json` inside a data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(STATE_FILENAME)
    }
}

impl Store for FileStore {
    fn get(&self) -> Result<Option<String>> {
        read_text(&self.path())
    }

    fn set(&mut self, blob: &str) -> Result<()> {
        let path = self.path();
        write_atomic(&path, blob)?;
        debug!(path = %path.display(), bytes = blob.len(), "wrote state file");
        Ok(())
    }

    fn preserve_corrupt(&mut self, raw: &str) -> Result<String> {
        // Copy the file itself so bytes that were not UTF-8 survive as is.
        let backup = preserve_file(&self.path(), raw)?;
        Ok(backup.display().to_string())
    }

    fn location(&self) -> String {
        self.path().display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        store.set("{}").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("{}"));

        store.set(r#"{"2024-01-01":{}}"#).unwrap();
        assert_eq!(
            store.get().unwrap().as_deref(),
            Some(r#"{"2024-01-01":{}}"#)
        );
    }

    #[test]
    fn set_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("nested").join("dir"));

        store.set("{}").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn set_leaves_no_tmp_files() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        store.set("{}").unwrap();
        store.set("{}").unwrap();

        for entry in fs::read_dir(temp.path()).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn preserve_corrupt_keeps_raw_content() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        let location = store.preserve_corrupt("{not json").unwrap();

        assert!(location.contains("daily-stats.json.corrupt-"));
        assert_eq!(fs::read_to_string(&location).unwrap(), "{not json");
    }

    #[test]
    fn preserve_corrupt_copies_raw_bytes() {
        let temp = TempDir::new().unwrap();
        let bytes = [0xff, 0xfe, b'{', b'}'];
        fs::write(temp.path().join(STATE_FILENAME), bytes).unwrap();
        let mut store = FileStore::new(temp.path());

        assert!(store.get().is_err());
        let location = store.preserve_corrupt("\u{fffd}\u{fffd}{}").unwrap();

        assert_eq!(fs::read(&location).unwrap(), bytes);
    }
}
