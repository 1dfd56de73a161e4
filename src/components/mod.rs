pub mod pane;
pub mod status_bar;
