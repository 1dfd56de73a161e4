use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::error::ProviderError;
use crate::nav::{Entry, Listing, PaneView};
use crate::theme::ThemeColors;

/// One column of the navigator: the listing of the pane's root with its
/// highlighted row.
pub struct PaneWidget<'a> {
    view: &'a PaneView,
    listing: Option<&'a Listing>,
    failure: Option<&'a ProviderError>,
    pending: bool,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> PaneWidget<'a> {
    pub fn new(view: &'a PaneView, theme: &'a ThemeColors) -> Self {
        Self {
            view,
            listing: None,
            failure: None,
            pending: false,
            theme,
            block: None,
        }
    }

    pub fn listing(mut self, listing: Option<&'a Listing>) -> Self {
        self.listing = listing;
        self
    }

    pub fn failure(mut self, failure: Option<&'a ProviderError>) -> Self {
        self.failure = failure;
        self
    }

    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn entry_style(&self, entry: &Entry, selected: bool) -> Style {
        if selected {
            Style::default()
                .bg(self.theme.selected_bg)
                .fg(self.theme.selected_fg)
                .add_modifier(Modifier::BOLD)
        } else if entry.is_hidden() {
            Style::default().fg(self.theme.hidden_fg)
        } else if entry.is_directory {
            Style::default()
                .fg(self.theme.dir_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.file_fg)
        }
    }

    fn render_notice(&self, area: Rect, buf: &mut Buffer, text: String, style: Style) {
        let line = Line::from(Span::styled(text, style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// First visible row so that `highlighted` stays on screen.
pub fn scroll_offset(highlighted: Option<usize>, height: usize) -> usize {
    match highlighted {
        Some(index) if height > 0 && index >= height => index + 1 - height,
        _ => 0,
    }
}

impl<'a> Widget for PaneWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        buf.set_style(inner, Style::default().fg(self.theme.pane_fg));
        if inner.height == 0 || inner.width == 0 || self.view.is_cleared() {
            return;
        }

        let Some(listing) = self.listing else {
            if let Some(err) = self.failure {
                let style = Style::default().fg(self.theme.error_fg);
                self.render_notice(inner, buf, format!("({err})"), style);
            } else if self.pending {
                let style = Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::ITALIC);
                self.render_notice(inner, buf, "loading…".to_string(), style);
            }
            return;
        };

        if listing.is_empty() {
            let style = Style::default()
                .fg(self.theme.dim_fg)
                .add_modifier(Modifier::ITALIC);
            self.render_notice(inner, buf, "(empty)".to_string(), style);
            return;
        }

        let height = inner.height as usize;
        let scroll = scroll_offset(self.view.highlighted, height);
        let rows = listing.entries.iter().enumerate().skip(scroll).take(height);

        for (row, (index, entry)) in rows.enumerate() {
            let selected = self.view.highlighted == Some(index);
            let suffix = if entry.is_directory { "/" } else { "" };
            let text = format!(" {}{}", entry.name, suffix);
            let style = self.entry_style(entry, selected);

            let y = inner.y + row as u16;
            if selected {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
            }
            let line = Line::from(Span::styled(text, style));
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::RequestId;
    use crate::theme;

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    fn sample() -> Listing {
        Listing::new(
            "/home/user",
            vec![Entry::dir("docs"), Entry::file("notes.txt"), Entry::file(".profile")],
            RequestId(1),
        )
    }

    #[test]
    fn renders_entries_with_directory_suffix() {
        let tc = theme::dark_theme();
        let view = PaneView::showing("/home/user", None);
        let listing = sample();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        PaneWidget::new(&view, &tc)
            .listing(Some(&listing))
            .render(area, &mut buf);

        assert!(row_text(&buf, 0, 20).contains("docs/"));
        assert!(row_text(&buf, 1, 20).contains("notes.txt"));
        assert_eq!(buf.cell((1, 0)).unwrap().fg, tc.dir_fg);
        assert_eq!(buf.cell((1, 2)).unwrap().fg, tc.hidden_fg);
    }

    #[test]
    fn highlighted_row_uses_selection_style() {
        let tc = theme::dark_theme();
        let view = PaneView::showing("/home/user", Some(1));
        let listing = sample();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        PaneWidget::new(&view, &tc)
            .listing(Some(&listing))
            .render(area, &mut buf);

        assert_eq!(buf.cell((1, 1)).unwrap().bg, tc.selected_bg);
        // Selection fills the whole row.
        assert_eq!(buf.cell((19, 1)).unwrap().bg, tc.selected_bg);
        assert_ne!(buf.cell((1, 0)).unwrap().bg, tc.selected_bg);
    }

    #[test]
    fn cleared_pane_renders_nothing() {
        let tc = theme::dark_theme();
        let view = PaneView::cleared();
        let listing = sample();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        PaneWidget::new(&view, &tc)
            .listing(Some(&listing))
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 0, 20).trim(), "");
    }

    #[test]
    fn pane_background_text_uses_pane_color() {
        let tc = theme::dark_theme();
        let view = PaneView::showing("/home/user", None);
        let listing = Listing::new("/home/user", vec![Entry::file("a")], RequestId(1));
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        PaneWidget::new(&view, &tc)
            .listing(Some(&listing))
            .render(area, &mut buf);
        assert_eq!(buf.cell((19, 0)).unwrap().fg, tc.pane_fg);
        assert_eq!(buf.cell((0, 1)).unwrap().fg, tc.pane_fg);
    }

    #[test]
    fn pending_pane_shows_loading() {
        let tc = theme::dark_theme();
        let view = PaneView::showing("/slow", None);
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        PaneWidget::new(&view, &tc).pending(true).render(area, &mut buf);
        assert!(row_text(&buf, 0, 20).contains("loading"));
    }

    #[test]
    fn failed_pane_shows_reason() {
        let tc = theme::dark_theme();
        let view = PaneView::showing("/root", None);
        let err = ProviderError::PermissionDenied;
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        PaneWidget::new(&view, &tc)
            .failure(Some(&err))
            .render(area, &mut buf);
        assert!(row_text(&buf, 0, 30).contains("permission denied"));
        assert_eq!(buf.cell((0, 0)).unwrap().fg, tc.error_fg);
    }

    #[test]
    fn scrolls_to_keep_highlight_visible() {
        assert_eq!(scroll_offset(None, 5), 0);
        assert_eq!(scroll_offset(Some(4), 5), 0);
        assert_eq!(scroll_offset(Some(5), 5), 1);
        assert_eq!(scroll_offset(Some(20), 5), 16);
        assert_eq!(scroll_offset(Some(3), 0), 0);

        let tc = theme::dark_theme();
        let entries = (0..10).map(|i| Entry::file(format!("f{i}"))).collect();
        let listing = Listing::new("/many", entries, RequestId(1));
        let view = PaneView::showing("/many", Some(9));
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        PaneWidget::new(&view, &tc)
            .listing(Some(&listing))
            .render(area, &mut buf);
        assert!(row_text(&buf, 2, 10).contains("f9"));
        assert!(row_text(&buf, 0, 10).contains("f7"));
    }

    #[test]
    fn zero_area_does_not_panic() {
        let tc = theme::dark_theme();
        let view = PaneView::showing("/x", Some(0));
        let listing = sample();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        PaneWidget::new(&view, &tc)
            .listing(Some(&listing))
            .render(area, &mut buf);
    }
}
