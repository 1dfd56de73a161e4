//! Most-recent listing per directory, guarded against stale completions.
//!
//! Every request gets a fresh [`RequestId`]. Only the latest id issued for a
//! path may complete; anything older (or unknown, or already completed) is
//! dropped. This is what keeps a slow scan of a directory the user already
//! left from overwriting newer data.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::listing::{Listing, RequestId};
use crate::error::ProviderError;

/// Outcome of feeding a completion into the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The listing replaced the cached entry for its path.
    Accepted(PathBuf),
    /// The latest request for the path failed; the path has no listing now.
    Failed(PathBuf, ProviderError),
    /// Superseded or unknown request; nothing changed.
    Stale,
}

#[derive(Debug, Default)]
pub struct ListingCache {
    next_id: u64,
    listings: HashMap<PathBuf, Listing>,
    failures: HashMap<PathBuf, ProviderError>,
    /// Latest outstanding request per path.
    latest: HashMap<PathBuf, RequestId>,
    /// Path of every outstanding request, including superseded ones.
    in_flight: HashMap<RequestId, PathBuf>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new id and make it the latest outstanding request for `path`.
    pub fn begin_request(&mut self, path: &Path) -> RequestId {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        if let Some(previous) = self.latest.insert(path.to_path_buf(), id) {
            debug!(%previous, %id, path = %path.display(), "request superseded");
        }
        self.in_flight.insert(id, path.to_path_buf());
        id
    }

    /// Apply the result of request `id`.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<Listing, ProviderError>,
    ) -> Completion {
        let Some(path) = self.in_flight.remove(&id) else {
            debug!(%id, "dropping completion for unknown request");
            return Completion::Stale;
        };
        if self.latest.get(&path) != Some(&id) {
            debug!(%id, path = %path.display(), "dropping stale completion");
            return Completion::Stale;
        }
        self.latest.remove(&path);

        match result {
            Ok(mut listing) => {
                listing.path = path.clone();
                listing.request_id = id;
                self.failures.remove(&path);
                self.listings.insert(path.clone(), listing);
                Completion::Accepted(path)
            }
            Err(err) => {
                self.listings.remove(&path);
                self.failures.insert(path.clone(), err.clone());
                Completion::Failed(path, err)
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<&Listing> {
        self.listings.get(path)
    }

    /// The error of the most recent completed request for `path`, if it failed.
    pub fn failure(&self, path: &Path) -> Option<&ProviderError> {
        self.failures.get(path)
    }

    pub fn is_pending(&self, path: &Path) -> bool {
        self.latest.contains_key(path)
    }

    /// Forget listings and failures for every path not in `keep`. Outstanding
    /// requests are left alone.
    pub fn retain_only(&mut self, keep: &[PathBuf]) {
        let before = self.listings.len() + self.failures.len();
        self.listings.retain(|path, _| keep.contains(path));
        self.failures.retain(|path, _| keep.contains(path));
        let evicted = before - self.listings.len() - self.failures.len();
        if evicted > 0 {
            debug!(evicted, "dropped off-screen listings");
        }
    }
}
