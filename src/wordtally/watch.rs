//! Filesystem-backed [`EventSource`]: every save of a tracked file under a
//! root directory becomes an observation of that file's full text.
//!
//! Raw `notify` events arrive on the watcher's own thread and are only queued
//! there. Reading files and calling the handler happen on the thread that
//! called [`EventSource::on_text_observed`], so the tracker is never touched
//! concurrently. SIGINT/SIGTERM end the loop so the caller can flush.

use crate::error::Result;
use crate::events::EventSource;
use crate::model::WordObservation;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use tracing::{debug, error, info, trace, warn};

#[derive(Debug)]
enum WatchMessage {
    Changed(PathBuf),
    Shutdown,
}

pub struct DirectoryWatcher {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectoryWatcher {
    /// `extensions` are matched case-insensitively, with or without a dot.
    pub fn new(root: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self {
            root: root.into(),
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether changes to `path` should be observed.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }

    /// Read `path` into an observation. Unreadable files are logged and skipped.
    fn read_observation(&self, path: &Path) -> Option<WordObservation> {
        match fs::read_to_string(path) {
            Ok(text) => Some(WordObservation::from_path(&self.root, path, text)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                None
            }
        }
    }

    fn pump<I>(&self, messages: I, handler: &mut dyn FnMut(WordObservation)) -> usize
    where
        I: IntoIterator<Item = WatchMessage>,
    {
        let mut delivered = 0;
        for message in messages {
            match message {
                WatchMessage::Changed(path) => {
                    if path.is_dir() || !self.accepts(&path) {
                        trace!(path = %path.display(), "ignoring change");
                        continue;
                    }
                    if let Some(observation) = self.read_observation(&path) {
                        debug!(file = %observation.file_path, "file changed");
                        handler(observation);
                        delivered += 1;
                    }
                }
                WatchMessage::Shutdown => {
                    info!("shutdown requested, stopping watcher");
                    break;
                }
            }
        }
        delivered
    }
}

impl EventSource for DirectoryWatcher {
    fn on_text_observed(&mut self, handler: &mut dyn FnMut(WordObservation)) -> Result<()> {
        let (tx, rx) = mpsc::channel();

        let event_tx = tx.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| forward_event(res, &event_tx),
            Config::default(),
        )?;
        watcher.watch(&self.root, RecursiveMode::Recursive)?;
        spawn_signal_listener(tx)?;

        info!(root = %self.root.display(), extensions = ?self.extensions, "watching for changes");
        let delivered = self.pump(rx, handler);
        debug!(delivered, "watcher stopped");

        drop(watcher);
        Ok(())
    }
}

fn forward_event(res: notify::Result<Event>, tx: &Sender<WatchMessage>) {
    let event = match res {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "file watcher error");
            return;
        }
    };

    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return;
    }
    for path in event.paths {
        let _ = tx.send(WatchMessage::Changed(path));
    }
}

#[cfg(unix)]
fn spawn_signal_listener(tx: Sender<WatchMessage>) -> Result<()> {
    use crate::error::TallyError;
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])
        .map_err(|e| TallyError::Watch(format!("failed to register signal handlers: {e}")))?;
    std::thread::spawn(move || {
        if signals.forever().next().is_some() {
            let _ = tx.send(WatchMessage::Shutdown);
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn spawn_signal_listener(_tx: Sender<WatchMessage>) -> Result<()> {
    Ok(())
}
