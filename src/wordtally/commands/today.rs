use crate::clock::Clock;
use crate::commands::{file_rows, CmdResult};
use crate::controller::Tracker;
use crate::error::Result;
use crate::store::Store;

pub fn run<S: Store, C: Clock>(tracker: &mut Tracker<S, C>) -> Result<CmdResult> {
    tracker.check_day();
    let rows = file_rows(tracker.state().ledger());
    Ok(CmdResult::default()
        .with_file_rows(rows)
        .with_status_line(tracker.status_text()))
}
