use super::{preserve_file, read_text, write_atomic, Store};
use crate::error::{Result, TallyError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const SETTINGS_FILENAME: &str = "data.json";

/// Key under which the history is kept inside the settings object.
pub const COUNTS_KEY: &str = "counts";

/// Keeps the history inside a shared settings object:
/// `{"counts": <history>, ...}`.
///
/// Other keys in the object are left alone on write.
pub struct SettingsStore {
    root: PathBuf,
}

impl SettingsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILENAME)
    }

    /// The settings object to write into. A file that is not a JSON object
    /// is copied aside first, then replaced by an empty object.
    fn load_settings(&self) -> Result<Map<String, Value>> {
        let path = self.path();
        let (raw, parsed) = match read_text(&path) {
            Ok(None) => return Ok(Map::new()),
            Ok(Some(raw)) => {
                let parsed = serde_json::from_str::<Value>(&raw).ok();
                (raw, parsed)
            }
            Err(TallyError::InvalidUtf8 { lossy }) => (lossy, None),
            Err(e) => return Err(e),
        };
        if let Some(Value::Object(map)) = parsed {
            return Ok(map);
        }

        let backup = preserve_file(&path, &raw)?;
        warn!(
            path = %path.display(),
            backup = %backup.display(),
            "settings file is not a JSON object; replacing it"
        );
        Ok(Map::new())
    }
}

impl Store for SettingsStore {
    fn get(&self) -> Result<Option<String>> {
        let Some(raw) = read_text(&self.path())? else {
            return Ok(None);
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map.get(COUNTS_KEY).map(Value::to_string)),
            // Hand the raw text back so the controller sees it as corrupt.
            _ => Ok(Some(raw)),
        }
    }

    fn set(&mut self, blob: &str) -> Result<()> {
        let counts: Value = serde_json::from_str(blob)?;
        let mut settings = self.load_settings()?;
        settings.insert(COUNTS_KEY.to_string(), counts);

        let content = serde_json::to_string_pretty(&Value::Object(settings))?;
        let path = self.path();
        write_atomic(&path, &content)?;
        debug!(path = %path.display(), bytes = content.len(), "wrote settings file");
        Ok(())
    }

    fn preserve_corrupt(&mut self, raw: &str) -> Result<String> {
        // Keep the whole settings file, not only the counts fragment.
        let backup = preserve_file(&self.path(), raw)?;
        Ok(backup.display().to_string())
    }

    fn location(&self) -> String {
        format!("{} (key \"{}\")", self.path().display(), COUNTS_KEY)
    }
}
