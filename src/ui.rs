use std::path::Path;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::pane::PaneWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::nav::listing::dir_name;
use crate::nav::PaneView;

/// Render the three panes and the status bar.
pub fn render(app: &App, frame: &mut Frame) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(column_constraints(app.pane_ratios))
        .split(rows[0]);

    let panes = app.navigator.current_panes();
    for (index, view) in [&panes.parent, &panes.current, &panes.preview]
        .into_iter()
        .enumerate()
    {
        let focused = index == 1;
        frame.render_widget(pane_widget(app, view, focused), columns[index]);
    }

    let path_str = app.navigator.current_path().display().to_string();
    let position = app.position_label();
    let mut status = StatusBarWidget::new(&path_str, &position, &app.theme);
    if let Some(msg) = &app.status_message {
        status = status.status_message(&msg.text, msg.is_error);
    }
    frame.render_widget(status, rows[1]);
}

/// Column widths from the configured ratios, summed wide enough that any
/// `u16` ratios fit.
fn column_constraints(ratios: [u16; 3]) -> [Constraint; 3] {
    let total: u32 = ratios.iter().copied().map(u32::from).sum();
    ratios.map(|ratio| Constraint::Ratio(ratio.into(), total))
}

fn pane_widget<'a>(app: &'a App, view: &'a PaneView, focused: bool) -> PaneWidget<'a> {
    let border_color = if focused {
        app.theme.border_focused_fg
    } else {
        app.theme.border_fg
    };
    let mut title_style = Style::default().fg(border_color);
    if focused {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    let title = view.root.as_deref().map(pane_title).unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, title_style));

    let mut widget = PaneWidget::new(view, &app.theme).block(block);
    if let Some(root) = view.root.as_deref() {
        widget = widget
            .listing(app.navigator.listing(root))
            .failure(app.navigator.failure(root))
            .pending(app.navigator.is_pending(root));
    }
    widget
}

fn pane_title(root: &Path) -> String {
    let name = dir_name(root);
    if name.is_empty() {
        format!(" {} ", root.display())
    } else {
        format!(" {name} ")
    }
}
