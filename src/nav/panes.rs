use std::path::{Path, PathBuf};

use super::listing::{dir_name, Listing};

/// What one pane should display. Derived from navigation state on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneView {
    /// Directory shown in the pane; `None` when the pane is cleared.
    pub root: Option<PathBuf>,
    /// Highlighted row in `root`'s listing.
    pub highlighted: Option<usize>,
}

impl PaneView {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn showing(root: impl Into<PathBuf>, highlighted: Option<usize>) -> Self {
        Self {
            root: Some(root.into()),
            highlighted,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.root.is_none()
    }
}

/// The three panes, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panes {
    pub parent: PaneView,
    pub current: PaneView,
    pub preview: PaneView,
}

/// Everything the pane projection depends on.
#[derive(Debug, Clone, Copy)]
pub struct PaneInputs<'a> {
    pub current_path: &'a Path,
    pub parent_path: Option<&'a Path>,
    pub cursor: Option<usize>,
    pub current_listing: Option<&'a Listing>,
    pub parent_listing: Option<&'a Listing>,
}

/// Compute all three panes from scratch.
pub fn synchronize(inputs: &PaneInputs<'_>) -> Panes {
    Panes {
        parent: parent_pane(inputs),
        current: current_pane(inputs),
        preview: preview_pane(inputs),
    }
}

fn parent_pane(inputs: &PaneInputs<'_>) -> PaneView {
    let Some(parent) = inputs.parent_path else {
        return PaneView::cleared();
    };
    let name = dir_name(inputs.current_path);
    let highlighted = inputs
        .parent_listing
        .and_then(|listing| listing.position_of(&name));
    PaneView::showing(parent, highlighted)
}

fn current_pane(inputs: &PaneInputs<'_>) -> PaneView {
    PaneView::showing(inputs.current_path, valid_cursor(inputs))
}

fn preview_pane(inputs: &PaneInputs<'_>) -> PaneView {
    let entry = valid_cursor(inputs)
        .and_then(|index| inputs.current_listing.and_then(|l| l.get(index)));
    match entry {
        Some(entry) if entry.is_directory => {
            PaneView::showing(inputs.current_path.join(&entry.name), None)
        }
        _ => PaneView::cleared(),
    }
}

fn valid_cursor(inputs: &PaneInputs<'_>) -> Option<usize> {
    let len = inputs.current_listing.map_or(0, Listing::len);
    inputs.cursor.filter(|&index| index < len)
}
