use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::controller::Tracker;
use crate::error::Result;
use crate::store::Store;
use tracing::info;

/// Manual trigger: persist now and hand back the whole history.
pub fn run<S: Store, C: Clock>(tracker: &mut Tracker<S, C>) -> Result<CmdResult> {
    tracker.check_day();
    tracker.flush()?;

    let history = tracker.state().history();
    let dump = history.to_json_pretty()?;
    let compact = history.to_json()?;
    info!(days = history.len(), history = %compact, "manual flush");

    let mut result = CmdResult::default().with_dump(dump);
    result.add_message(CmdMessage::success(format!(
        "Flushed {} day(s) to {}",
        history.len(),
        tracker.store().location()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::{History, WordObservation};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn persists_and_dumps_history() {
        let clock = FixedClock::from_day("2024-01-01").unwrap();
        let (mut tracker, _) = Tracker::load(InMemoryStore::new(), clock).unwrap();
        tracker.observe(&WordObservation::new("notes.md", "hello world"));
        tracker.observe(&WordObservation::new("notes.md", "hello world again"));

        let result = run(&mut tracker).unwrap();

        let dumped = History::from_json(result.dump.as_deref().unwrap()).unwrap();
        let stored = History::from_json(tracker.store().blob().unwrap()).unwrap();
        assert_eq!(dumped, stored);
        assert_eq!(stored.get("2024-01-01").unwrap().daily_total(), 1);
    }

    #[test]
    fn surfaces_write_failures() {
        let clock = FixedClock::from_day("2024-01-01").unwrap();
        let (mut tracker, _) = Tracker::load(InMemoryStore::new(), clock).unwrap();
        tracker.observe(&WordObservation::new("notes.md", "hello"));
        tracker.store_mut().set_simulate_write_error(true);

        assert!(run(&mut tracker).is_err());
    }
}
