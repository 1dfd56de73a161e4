use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::cache::{Completion, ListingCache};
use super::listing::{Entry, Listing, RequestId};
use super::panes::{synchronize, PaneInputs, Panes};
use super::provider::{DirectoryProvider, Dispatch, ListingRequest};
use crate::error::ProviderError;

/// Navigation input. Anything that is not a move is `Other` and ignored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Other,
}

/// Owns the navigation state (current directory + cursor) and keeps the three
/// panes in sync with it as keys and listing completions arrive.
pub struct Navigator<P> {
    provider: P,
    cache: ListingCache,
    current_path: PathBuf,
    cursor: Option<usize>,
    panes: Panes,
}

impl<P: DirectoryProvider> Navigator<P> {
    /// Start in the provider's home directory.
    pub fn new(provider: P) -> Self {
        let home = provider.home_path();
        Self::with_start(provider, home)
    }

    pub fn with_start(provider: P, start: PathBuf) -> Self {
        let mut nav = Self {
            provider,
            cache: ListingCache::new(),
            current_path: start,
            cursor: None,
            panes: Panes::default(),
        };
        nav.recompute();
        nav.load_around_current();
        nav
    }

    pub fn handle_key(&mut self, input: KeyInput) {
        match input {
            KeyInput::MoveLeft => self.move_to_parent(),
            KeyInput::MoveRight => self.enter_selected(),
            KeyInput::MoveUp => self.move_cursor_up(),
            KeyInput::MoveDown => self.move_cursor_down(),
            KeyInput::Other => {}
        }
    }

    /// Feed back the result of a listing request.
    pub fn on_listing_completed(
        &mut self,
        id: RequestId,
        result: Result<Listing, ProviderError>,
    ) -> Completion {
        let outcome = self.cache.complete(id, result);
        match &outcome {
            Completion::Stale => return outcome,
            Completion::Accepted(path) => {
                debug!(%id, path = %path.display(), "listing accepted");
            }
            Completion::Failed(path, err) => {
                warn!(%id, path = %path.display(), error = %err, "listing unavailable");
            }
        }
        self.revalidate_cursor();
        self.recompute();
        outcome
    }

    pub fn current_panes(&self) -> &Panes {
        &self.panes
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn listing(&self, path: &Path) -> Option<&Listing> {
        self.cache.get(path)
    }

    pub fn failure(&self, path: &Path) -> Option<&ProviderError> {
        self.cache.failure(path)
    }

    pub fn is_pending(&self, path: &Path) -> bool {
        self.cache.is_pending(path)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Entry under the cursor in the current directory.
    pub fn selected_entry(&self) -> Option<&Entry> {
        let index = self.cursor?;
        self.cache.get(&self.current_path)?.get(index)
    }

    /// Jump straight to `path`.
    pub fn go_to(&mut self, path: PathBuf) {
        if path != self.current_path {
            self.change_dir(path);
        }
    }

    pub fn select_first(&mut self) {
        if self.current_len() > 0 {
            self.set_cursor(0);
        }
    }

    pub fn select_last(&mut self) {
        let len = self.current_len();
        if len > 0 {
            self.set_cursor(len - 1);
        }
    }

    /// Directories currently shown in any pane.
    pub fn visible_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::with_capacity(3);
        for pane in [&self.panes.parent, &self.panes.current, &self.panes.preview] {
            if let Some(root) = &pane.root {
                if !dirs.contains(root) {
                    dirs.push(root.clone());
                }
            }
        }
        dirs
    }

    /// Re-request `path` if it is on screen. The old listing stays visible
    /// until the new one arrives.
    pub fn refresh(&mut self, path: &Path) -> bool {
        if !self.visible_dirs().iter().any(|dir| dir == path) {
            return false;
        }
        self.request(path.to_path_buf());
        true
    }

    pub fn refresh_all(&mut self) {
        for dir in self.visible_dirs() {
            self.request(dir);
        }
    }

    /// Load the preview directory if nothing is cached, pending or failed for it.
    pub fn ensure_preview_listing(&mut self) {
        let Some(root) = self.panes.preview.root.clone() else {
            return;
        };
        if self.cache.get(&root).is_none()
            && !self.cache.is_pending(&root)
            && self.cache.failure(&root).is_none()
        {
            self.request(root);
        }
    }

    fn move_to_parent(&mut self) {
        match self.provider.parent_of(&self.current_path) {
            Some(parent) => self.change_dir(parent),
            None => debug!("already at filesystem root"),
        }
    }

    fn enter_selected(&mut self) {
        let target = match self.selected_entry() {
            Some(entry) if entry.is_directory => self.current_path.join(&entry.name),
            _ => return,
        };
        self.change_dir(target);
    }

    fn move_cursor_up(&mut self) {
        if let Some(index) = self.cursor {
            if index > 0 && index - 1 < self.current_len() {
                self.set_cursor(index - 1);
            }
        }
    }

    fn move_cursor_down(&mut self) {
        let next = self.cursor.map_or(0, |index| index + 1);
        if next < self.current_len() {
            self.set_cursor(next);
        }
    }

    fn set_cursor(&mut self, index: usize) {
        self.cursor = Some(index);
        self.recompute();
    }

    fn change_dir(&mut self, path: PathBuf) {
        debug!(from = %self.current_path.display(), to = %path.display(), "changing directory");
        self.current_path = path;
        self.cursor = None;
        self.recompute();
        self.load_around_current();
    }

    /// Request the current directory and its parent unless already cached.
    fn load_around_current(&mut self) {
        if self.cache.get(&self.current_path).is_none() {
            self.request(self.current_path.clone());
        }
        if let Some(parent) = self.provider.parent_of(&self.current_path) {
            if self.cache.get(&parent).is_none() {
                self.request(parent);
            }
        }
    }

    fn request(&mut self, path: PathBuf) {
        let id = self.cache.begin_request(&path);
        debug!(%id, path = %path.display(), "requesting listing");
        let request = ListingRequest {
            id,
            path: path.clone(),
        };
        if let Dispatch::Ready(result) = self.provider.request_listing(request) {
            let result = result.map(|entries| Listing::new(path, entries, id));
            self.on_listing_completed(id, result);
        }
    }

    fn current_len(&self) -> usize {
        self.cache.get(&self.current_path).map_or(0, Listing::len)
    }

    fn revalidate_cursor(&mut self) {
        if let Some(index) = self.cursor {
            if index >= self.current_len() {
                debug!(index, "cursor out of range after reload");
                self.cursor = None;
            }
        }
    }

    fn recompute(&mut self) {
        let parent_path = self.provider.parent_of(&self.current_path);
        let inputs = PaneInputs {
            current_path: &self.current_path,
            parent_path: parent_path.as_deref(),
            cursor: self.cursor,
            current_listing: self.cache.get(&self.current_path),
            parent_listing: parent_path.as_deref().and_then(|p| self.cache.get(p)),
        };
        self.panes = synchronize(&inputs);
        // Off-screen directories are not watched, so their listings would go
        // stale; they are fetched again when they come back into view.
        let visible = self.visible_dirs();
        self.cache.retain_only(&visible);
    }
}
