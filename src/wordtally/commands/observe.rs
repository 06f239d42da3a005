use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::controller::Tracker;
use crate::error::Result;
use crate::model::WordObservation;
use crate::store::Store;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Record the current contents of `files`, keyed relative to `root`.
pub fn run<S: Store, C: Clock>(
    tracker: &mut Tracker<S, C>,
    root: &Path,
    files: &[PathBuf],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for file in files {
        let text = match fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %file.display(), error = %e, "could not read file");
                result.add_message(CmdMessage::warning(format!(
                    "Could not read {}: {}",
                    file.display(),
                    e
                )));
                continue;
            }
        };

        let observation = WordObservation::from_path(root, file, text);
        let total = tracker.observe(&observation);
        if let Some(delta) = tracker.state().ledger().get(&observation.file_path) {
            result.add_message(CmdMessage::info(format!(
                "{}: {} -> {} ({:+}), today: {}",
                observation.file_path,
                delta.pre,
                delta.cur,
                delta.net(),
                total
            )));
        }
    }

    Ok(result.with_status_line(tracker.status_text()))
}
