use std::fs;
use std::path::{Path, PathBuf};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::ProviderError;
use crate::event::Event;
use crate::nav::{DirectoryProvider, Dispatch, Entry, Listing, ListingRequest};

/// What a directory scan returns and in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    pub show_hidden: bool,
    pub dirs_first: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            dirs_first: true,
        }
    }
}

/// Lists real directories on tokio's blocking pool and reports back through
/// the event channel.
pub struct FsProvider {
    runtime: Handle,
    event_tx: mpsc::UnboundedSender<Event>,
    options: ListingOptions,
}

impl FsProvider {
    /// Must be called from within a tokio runtime.
    pub fn new(event_tx: mpsc::UnboundedSender<Event>, options: ListingOptions) -> Self {
        Self {
            runtime: Handle::current(),
            event_tx,
            options,
        }
    }

    pub fn options(&self) -> ListingOptions {
        self.options
    }

    /// Flip dot-file visibility for subsequent scans. Returns the new setting.
    pub fn toggle_hidden(&mut self) -> bool {
        self.options.show_hidden = !self.options.show_hidden;
        self.options.show_hidden
    }
}

impl DirectoryProvider for FsProvider {
    fn request_listing(&mut self, request: ListingRequest) -> Dispatch {
        let tx = self.event_tx.clone();
        let options = self.options;
        self.runtime.spawn_blocking(move || {
            let ListingRequest { id, path } = request;
            let result = read_directory(&path, options)
                .map(|entries| Listing::new(path.clone(), entries, id));
            debug!(%id, path = %path.display(), ok = result.is_ok(), "scan finished");
            // The receiver is gone only during shutdown.
            let _ = tx.send(Event::ListingCompleted { id, result });
        });
        Dispatch::Pending
    }

    fn parent_of(&self, path: &Path) -> Option<PathBuf> {
        path.parent().map(Path::to_path_buf)
    }

    fn home_path(&self) -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
    }
}

/// Enumerate `path`. Unreadable entries are skipped; symlinks to directories
/// count as directories.
pub fn read_directory(path: &Path, options: ListingOptions) -> Result<Vec<Entry>, ProviderError> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(path)? {
        let Ok(entry) = entry else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if !options.show_hidden && name.starts_with('.') {
            continue;
        }
        let is_directory = match entry.file_type() {
            Ok(ft) if ft.is_symlink() => fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false),
            Ok(ft) => ft.is_dir(),
            Err(_) => continue,
        };
        entries.push(Entry { name, is_directory });
    }

    sort_entries(&mut entries, options.dirs_first);
    Ok(entries)
}

/// Case-insensitive name order, optionally with directories first.
fn sort_entries(entries: &mut [Entry], dirs_first: bool) {
    entries.sort_by(|a, b| {
        let mut cmp = std::cmp::Ordering::Equal;
        if dirs_first {
            cmp = b.is_directory.cmp(&a.is_directory);
        }
        cmp.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}
