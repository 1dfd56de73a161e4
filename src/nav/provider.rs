use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use super::listing::{Entry, RequestId};
use crate::error::ProviderError;

/// A listing the navigator wants. `id` must be echoed back on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub id: RequestId,
    pub path: PathBuf,
}

/// How a provider answered a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The result will be delivered later through
    /// [`Navigator::on_listing_completed`](super::Navigator::on_listing_completed).
    Pending,
    /// The backend answered immediately.
    Ready(Result<Vec<Entry>, ProviderError>),
}

/// Source of directory listings and path relationships.
#[cfg_attr(test, automock)]
pub trait DirectoryProvider {
    /// Start enumerating `request.path`. Several requests for the same path may
    /// be outstanding at once.
    fn request_listing(&mut self, request: ListingRequest) -> Dispatch;

    /// Parent directory, or `None` at the filesystem root.
    fn parent_of(&self, path: &Path) -> Option<PathBuf>;

    fn home_path(&self) -> PathBuf;
}
