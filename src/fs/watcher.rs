use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::event::Event;

/// Default debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Watches the directories currently on screen (non-recursively) and reports
/// which of them changed.
pub struct FsWatcher {
    /// Whether the watcher is currently forwarding events.
    active: Arc<AtomicBool>,
    watched: Vec<PathBuf>,
    debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
}

impl FsWatcher {
    /// Create a watcher with nothing watched yet. Changes are debounced by
    /// `debounce_duration` and sent via `event_tx` as `Event::FsChange`.
    pub fn new(
        debounce_duration: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> notify::Result<Self> {
        let active = Arc::new(AtomicBool::new(true));
        let active_clone = active.clone();

        let debouncer = new_debouncer(
            debounce_duration,
            move |result: Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>| {
                if !active_clone.load(Ordering::Relaxed) {
                    return;
                }

                match result {
                    Ok(events) => {
                        let paths: Vec<PathBuf> = events
                            .iter()
                            .filter(|e| e.kind == DebouncedEventKind::Any)
                            .map(|e| e.path.clone())
                            .collect();
                        let dirs = changed_dirs(&paths);
                        if !dirs.is_empty() {
                            let _ = event_tx.send(Event::FsChange(dirs));
                        }
                    }
                    Err(err) => warn!(error = %err, "filesystem watcher error"),
                }
            },
        )?;

        Ok(Self {
            active,
            watched: Vec::new(),
            debouncer,
        })
    }

    /// Watch exactly `dirs`, dropping watches that are no longer needed.
    /// Directories that cannot be watched are skipped.
    pub fn watch_dirs(&mut self, dirs: &[PathBuf]) {
        let stale: Vec<PathBuf> = self
            .watched
            .iter()
            .filter(|dir| !dirs.contains(dir))
            .cloned()
            .collect();
        for dir in stale {
            let _ = self.debouncer.watcher().unwatch(&dir);
            self.watched.retain(|d| *d != dir);
        }

        for dir in dirs {
            if self.watched.contains(dir) {
                continue;
            }
            match self
                .debouncer
                .watcher()
                .watch(dir, RecursiveMode::NonRecursive)
            {
                Ok(()) => self.watched.push(dir.clone()),
                Err(err) => debug!(path = %dir.display(), error = %err, "cannot watch"),
            }
        }
    }

    pub fn watched(&self) -> &[PathBuf] {
        &self.watched
    }

    /// Pause event forwarding (watches stay registered).
    pub fn pause(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    /// Resume event forwarding.
    pub fn resume(&self) {
        self.active.store(true, Ordering::Relaxed);
    }

    /// Check if the watcher is currently active (forwarding events).
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

/// Paths whose listing may be affected by changes to `paths`: each path
/// itself (a watched directory was touched) and its parent (an entry inside
/// it was). Deduplicated, so a burst of changes in one directory names that
/// directory once. Paths that are not on screen are ignored by the caller.
pub fn changed_dirs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs = BTreeSet::new();
    for path in paths {
        dirs.insert(path.clone());
        if let Some(parent) = path.parent().filter(|p| *p != Path::new("")) {
            dirs.insert(parent.to_path_buf());
        }
    }
    dirs.into_iter().collect()
}
