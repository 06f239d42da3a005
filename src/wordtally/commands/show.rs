use crate::clock::{format_day, parse_day, Clock};
use crate::commands::{file_rows, CmdMessage, CmdResult};
use crate::controller::Tracker;
use crate::error::Result;
use crate::store::Store;

/// Per-file breakdown of one day, defaulting to the active day.
pub fn run<S: Store, C: Clock>(tracker: &mut Tracker<S, C>, day: Option<&str>) -> Result<CmdResult> {
    tracker.check_day();
    let requested = day.unwrap_or(tracker.state().current_day()).to_string();

    let mut result = CmdResult::default();
    let day = match parse_day(&requested) {
        Ok(date) => format_day(date),
        Err(e) => {
            result.add_message(CmdMessage::error(e.to_string()));
            return Ok(result);
        }
    };

    match tracker.ledger_for(&day) {
        Some(ledger) if !ledger.is_empty() => {
            let total = ledger.daily_total();
            Ok(result
                .with_file_rows(file_rows(ledger))
                .with_status_line(format!("{}: {}", day, total)))
        }
        _ => {
            result.add_message(CmdMessage::info(format!("No entries for {}", day)));
            Ok(result)
        }
    }
}
