//! Capabilities the tracker is driven by: something that emits observations,
//! and something that shows the running total.

use crate::clock::Clock;
use crate::controller::Tracker;
use crate::error::Result;
use crate::model::WordObservation;
use crate::store::Store;
use std::collections::VecDeque;

/// Emits observations while documents are edited.
pub trait EventSource {
    /// Call `handler` for every observation until the source is done.
    fn on_text_observed(&mut self, handler: &mut dyn FnMut(WordObservation)) -> Result<()>;
}

/// One-way display of the status line.
pub trait StatusSink {
    fn set_text(&mut self, text: &str);
}

impl StatusSink for Vec<String> {
    fn set_text(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Replays a fixed list of observations.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    pending: VecDeque<WordObservation>,
}

impl ScriptedSource {
    pub fn new(observations: impl IntoIterator<Item = WordObservation>) -> Self {
        Self {
            pending: observations.into_iter().collect(),
        }
    }

    pub fn push(&mut self, observation: WordObservation) {
        self.pending.push_back(observation);
    }
}

impl EventSource for ScriptedSource {
    fn on_text_observed(&mut self, handler: &mut dyn FnMut(WordObservation)) -> Result<()> {
        while let Some(observation) = self.pending.pop_front() {
            handler(observation);
        }
        Ok(())
    }
}

/// Feed every observation from `source` into `tracker`, updating `sink`
/// after each one. Returns how many observations were processed.
pub fn drive<S, C, E, K>(tracker: &mut Tracker<S, C>, source: &mut E, sink: &mut K) -> Result<usize>
where
    S: Store,
    C: Clock,
    E: EventSource + ?Sized,
    K: StatusSink + ?Sized,
{
    let mut processed = 0;
    source.on_text_observed(&mut |observation| {
        tracker.observe(&observation);
        sink.set_text(&tracker.status_text());
        processed += 1;
    })?;
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn drive_updates_status_after_each_observation() {
        let clock = FixedClock::from_day("2024-01-01").unwrap();
        let (mut tracker, _) = Tracker::load(InMemoryStore::new(), clock).unwrap();
        let mut source = ScriptedSource::new([
            WordObservation::new("notes.md", "hello world"),
            WordObservation::new("notes.md", "hello world again"),
            WordObservation::new("todo.md", "buy milk"),
        ]);
        let mut status: Vec<String> = Vec::new();

        let processed = drive(&mut tracker, &mut source, &mut status).unwrap();

        assert_eq!(processed, 3);
        assert_eq!(status, ["today: 0", "today: 1", "today: 1"]);
    }

    #[test]
    fn drive_crosses_midnight_between_events() {
        let clock = FixedClock::from_day("2024-01-01").unwrap();
        let (mut tracker, _) = Tracker::load(InMemoryStore::new(), clock.clone()).unwrap();
        let mut status: Vec<String> = Vec::new();

        let mut source = ScriptedSource::new([
            WordObservation::new("a.md", "one"),
            WordObservation::new("a.md", "one two three"),
        ]);
        drive(&mut tracker, &mut source, &mut status).unwrap();

        clock.set_day("2024-01-02").unwrap();
        source.push(WordObservation::new("a.md", "one two three four"));
        drive(&mut tracker, &mut source, &mut status).unwrap();

        assert_eq!(status.last().map(String::as_str), Some("today: 0"));
        let stored = tracker.store().blob().unwrap();
        assert!(stored.contains("2024-01-01"));
    }
}
