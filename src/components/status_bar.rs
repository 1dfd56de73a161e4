use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " ←↓↑→/hjkl move  ~ home  . hidden  r reload  w watch  q quit ";

/// Bottom bar: current path and cursor position, or a transient message.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    position: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, position: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            path_str,
            position,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

/// Keep the tail of `s` so it fits in `budget` columns, marking the cut.
fn truncate_left(s: &str, budget: usize) -> String {
    let len = s.chars().count();
    if len <= budget {
        return s.to_string();
    }
    if budget <= 1 {
        return s.chars().skip(len - budget).collect();
    }
    let tail: String = s.chars().skip(len - (budget - 1)).collect();
    format!("…{tail}")
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let base = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        buf.set_style(area, base);

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                base.fg(self.theme.error_fg).add_modifier(Modifier::BOLD)
            } else {
                base.fg(self.theme.info_fg)
            };
            let line = Line::from(Span::styled(format!(" {msg}"), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // [path] [position] ... [key hints]
        let hints_len = KEY_HINTS.chars().count();
        let show_hints = width > hints_len + 20;
        let remaining = if show_hints {
            width - hints_len
        } else {
            width
        };
        let position = format!("  {}", self.position);
        let path_budget = remaining.saturating_sub(position.chars().count() + 1);
        let path_display = format!(" {}", truncate_left(self.path_str, path_budget));

        let mut spans = vec![
            Span::styled(path_display, base.add_modifier(Modifier::BOLD)),
            Span::styled(position, base.fg(self.theme.dim_fg)),
        ];

        if show_hints {
            let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let pad = width.saturating_sub(used + hints_len);
            spans.push(Span::styled(" ".repeat(pad), base));
            spans.push(Span::styled(
                KEY_HINTS,
                base.fg(self.theme.dim_fg).add_modifier(Modifier::DIM),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
