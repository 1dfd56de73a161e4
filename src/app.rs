use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use crate::error::ProviderError;
use crate::fs::provider::FsProvider;
use crate::fs::watcher::FsWatcher;
use crate::nav::{Completion, DirectoryProvider, KeyInput, Listing, Navigator, RequestId};
use crate::theme::ThemeColors;

/// How long a status message stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// A transient message for the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

/// Main application state.
pub struct App {
    pub navigator: Navigator<FsProvider>,
    pub theme: ThemeColors,
    pub pane_ratios: [u16; 3],
    pub should_quit: bool,
    /// Absent when disabled by config or when it could not be started.
    pub watcher: Option<FsWatcher>,
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(navigator: Navigator<FsProvider>, theme: ThemeColors, pane_ratios: [u16; 3]) -> Self {
        Self {
            navigator,
            theme,
            pane_ratios,
            should_quit: false,
            watcher: None,
            status_message: None,
        }
    }

    /// Pass a navigation key to the navigator.
    pub fn handle_navigation(&mut self, input: KeyInput) {
        self.navigator.handle_key(input);
    }

    /// Apply a finished scan. Failures for the directory in the center pane
    /// are reported in the status bar.
    pub fn handle_listing_completed(
        &mut self,
        id: RequestId,
        result: Result<Listing, ProviderError>,
    ) {
        if let Completion::Failed(path, err) = self.navigator.on_listing_completed(id, result) {
            if path == self.navigator.current_path() {
                self.set_error_message(format!("{}: {}", path.display(), err));
            }
        }
    }

    /// Reload every on-screen directory touched by a filesystem change.
    pub fn handle_fs_change(&mut self, dirs: Vec<PathBuf>) {
        let unique: BTreeSet<PathBuf> = dirs.into_iter().collect();
        for dir in unique {
            self.navigator.refresh(&dir);
        }
    }

    /// Housekeeping after each event.
    pub fn sync(&mut self) {
        self.navigator.ensure_preview_listing();
        self.sync_watcher();
        self.clear_expired_status();
    }

    /// Point the watcher at whatever is on screen now.
    fn sync_watcher(&mut self) {
        if let Some(watcher) = self.watcher.as_mut() {
            let visible = self.navigator.visible_dirs();
            if watcher.watched() != visible.as_slice() {
                watcher.watch_dirs(&visible);
            }
        }
    }

    /// Pause or resume auto-refresh.
    pub fn toggle_watcher(&mut self) {
        let Some(watcher) = self.watcher.as_ref() else {
            self.set_error_message("Auto-refresh is disabled".to_string());
            return;
        };
        if watcher.is_active() {
            watcher.pause();
            self.set_status_message("Auto-refresh paused".to_string());
        } else {
            watcher.resume();
            // Changes made while paused were never reported.
            self.navigator.refresh_all();
            self.set_status_message("Auto-refresh resumed".to_string());
        }
        info!(active = self.watcher_active(), "watcher toggled");
    }

    pub fn watcher_active(&self) -> bool {
        self.watcher.as_ref().is_some_and(FsWatcher::is_active)
    }

    pub fn go_home(&mut self) {
        let home = self.navigator.provider().home_path();
        self.navigator.go_to(home);
    }

    pub fn refresh(&mut self) {
        self.navigator.refresh_all();
        self.set_status_message("Reloaded".to_string());
    }

    /// Toggle hidden file visibility and reload what is on screen.
    pub fn toggle_hidden(&mut self) {
        let shown = self.navigator.provider_mut().toggle_hidden();
        info!(shown, "hidden files toggled");
        self.navigator.refresh_all();
        let msg = if shown {
            "Hidden files shown"
        } else {
            "Hidden files hidden"
        };
        self.set_status_message(msg.to_string());
    }

    /// Text for the status bar position field, e.g. `3/12`.
    pub fn position_label(&self) -> String {
        let path = self.navigator.current_path();
        match self.navigator.listing(path) {
            Some(listing) => {
                let pos = self.navigator.cursor().map_or(0, |i| i + 1);
                format!("{}/{}", pos, listing.len())
            }
            None => String::new(),
        }
    }

    pub fn set_status_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: false,
            created: Instant::now(),
        });
    }

    pub fn set_error_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: true,
            created: Instant::now(),
        });
    }

    /// Clear the status message once it has been displayed long enough.
    pub fn clear_expired_status(&mut self) {
        if let Some(msg) = &self.status_message {
            if msg.created.elapsed() > STATUS_TTL {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
