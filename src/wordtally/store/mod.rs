//! # Storage Layer
//!
//! The whole history is persisted as a single JSON blob. The [`Store`] trait
//! is the only thing the controller knows about persistence: read the blob,
//! overwrite the blob, and set aside a blob that could not be parsed.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: dedicated `daily-stats.json` file (default)
//! - [`settings::SettingsStore`]: the history lives under the `counts` key of
//!   a shared `data.json` settings file, next to any other settings
//! - [`memory::InMemoryStore`]: no persistence, for tests
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── daily-stats.json                  # FileStore blob
//! ├── daily-stats.json.corrupt-<stamp>  # preserved unreadable blob, if any
//! ├── data.json                         # SettingsStore blob ({"counts": ...})
//! └── config.json                       # TallyConfig
//! ```
//!
//! File backends never write in place: content goes to a temporary file in
//! the same directory which is then renamed over the target, so a crash mid
//! write leaves the previous blob intact.

use crate::error::{Result, TallyError};
use chrono::Local;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod fs;
pub mod memory;
pub mod settings;

/// Durable home of the serialized history.
pub trait Store {
    /// Read the blob. `Ok(None)` means nothing has been stored yet.
    fn get(&self) -> Result<Option<String>>;

    /// Replace the blob wholesale.
    fn set(&mut self, blob: &str) -> Result<()>;

    /// Keep a copy of an unreadable blob before it gets overwritten.
    /// Returns where the copy went.
    fn preserve_corrupt(&mut self, raw: &str) -> Result<String>;

    /// Human readable location, for logs and `paths`.
    fn location(&self) -> String;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self) -> Result<Option<String>> {
        (**self).get()
    }

    fn set(&mut self, blob: &str) -> Result<()> {
        (**self).set(blob)
    }

    fn preserve_corrupt(&mut self, raw: &str) -> Result<String> {
        (**self).preserve_corrupt(raw)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Write `content` to `target` through a temp file + rename in the same dir.
fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    ensure_dir(dir)?;

    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "blob".to_string());
    let tmp_file = dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
    std::fs::write(&tmp_file, content)?;
    if let Err(e) = std::fs::rename(&tmp_file, target) {
        let _ = std::fs::remove_file(&tmp_file);
        return Err(e.into());
    }
    Ok(())
}

/// Read `path` as text. `Ok(None)` if it does not exist; bytes that are not
/// UTF-8 come back as [`TallyError::InvalidUtf8`].
fn read_text(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map(Some).map_err(|e| TallyError::InvalidUtf8 {
        lossy: String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// `<target>.corrupt-<local timestamp>`, with a `-N` suffix when a backup
/// from the same second already exists.
fn corrupt_backup_path(target: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%dT%H%M%S");
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "blob".to_string());

    let base = format!("{}.corrupt-{}", name, stamp);
    let mut candidate = target.with_file_name(&base);
    let mut n = 1;
    while candidate.exists() {
        candidate = target.with_file_name(format!("{}-{}", base, n));
        n += 1;
    }
    candidate
}

/// Copy the file at `target` (or `raw`, if it is gone) to a fresh backup path.
fn preserve_file(target: &Path, raw: &str) -> Result<PathBuf> {
    let backup = corrupt_backup_path(target);
    if target.exists() {
        std::fs::copy(target, &backup)?;
    } else {
        std::fs::write(&backup, raw)?;
    }
    Ok(backup)
}
