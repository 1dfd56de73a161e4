//! Three-pane navigation core: parent / current / preview.
//!
//! [`Navigator`] owns the current directory and cursor, asks a
//! [`DirectoryProvider`] for listings, and re-derives the three [`PaneView`]s
//! through [`panes::synchronize`] after every change.

pub mod cache;
pub mod controller;
pub mod listing;
pub mod panes;
pub mod provider;

pub use cache::Completion;
pub use controller::{KeyInput, Navigator};
pub use listing::{Entry, Listing, RequestId};
pub use panes::PaneView;
pub use provider::{DirectoryProvider, Dispatch, ListingRequest};
