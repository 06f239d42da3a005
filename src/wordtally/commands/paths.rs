use crate::clock::Clock;
use crate::commands::{CmdResult, PathEntry, TallyPaths};
use crate::controller::Tracker;
use crate::error::Result;
use crate::store::Store;

pub fn run<S: Store, C: Clock>(paths: &TallyPaths, tracker: &Tracker<S, C>) -> Result<CmdResult> {
    let entries = vec![
        PathEntry {
            label: "data".to_string(),
            location: paths.data_dir.display().to_string(),
        },
        PathEntry {
            label: "config".to_string(),
            location: paths.data_dir.join("config.json").display().to_string(),
        },
        PathEntry {
            label: "state".to_string(),
            location: tracker.store().location(),
        },
    ];
    Ok(CmdResult::default().with_paths(entries))
}
