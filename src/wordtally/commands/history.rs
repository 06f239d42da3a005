use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult, DaySummary};
use crate::controller::Tracker;
use crate::error::Result;
use crate::store::Store;

/// Per-day totals, most recent first, including the unflushed active day.
pub fn run<S: Store, C: Clock>(
    tracker: &mut Tracker<S, C>,
    limit: Option<usize>,
) -> Result<CmdResult> {
    tracker.check_day();
    let snapshot = tracker.history_snapshot();

    let days: Vec<DaySummary> = snapshot
        .iter()
        .rev()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(day, ledger)| DaySummary {
            day: day.clone(),
            files: ledger.len(),
            total: ledger.daily_total(),
        })
        .collect();

    let mut result = CmdResult::default();
    if days.is_empty() {
        result.add_message(CmdMessage::info("No days recorded yet."));
    }
    Ok(result.with_day_summaries(days))
}
