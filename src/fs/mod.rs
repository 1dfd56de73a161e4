pub mod provider;
pub mod watcher;
