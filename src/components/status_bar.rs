use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar widget that displays the root name, selection summary,
/// mode indicators, key hints, or a transient status message.
pub struct StatusBarWidget<'a> {
    root_name: &'a str,
    summary: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    mode_info: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(root_name: &'a str, summary: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            root_name,
            summary,
            theme,
            status_message: None,
            is_error: false,
            mode_info: None,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    /// Mode/selectable indicator, e.g. `"multi · leaf"`.
    pub fn mode_info(mut self, info: &'a str) -> Self {
        self.mode_info = Some(info);
        self
    }
}

/// Take the first `budget` chars. Never slices by byte index: the summary and
/// mode strings carry multi-byte separators.
fn take_chars(s: &str, budget: usize) -> String {
    s.chars().take(budget).collect()
}

/// Truncate from the left with a `...` prefix when the text doesn't fit.
fn truncate_left(s: &str, budget: usize) -> String {
    let len = s.chars().count();
    if len <= budget {
        return s.to_string();
    }
    if budget > 3 {
        let tail: String = s.chars().skip(len - (budget - 3)).collect();
        format!("...{tail}")
    } else {
        take_chars(s, budget)
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default().fg(self.theme.success_fg)
            };

            // Pad or truncate message to fill full width
            let display: String = if msg.chars().count() >= width {
                take_chars(msg, width)
            } else {
                format!("{:<width$}", msg, width = width)
            };

            let line = Line::from(Span::styled(display, style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // Normal bar: [root_name] [summary] [mode] [key_hints]
        let key_hints = " s:select  space:toggle  c:clear  q:quit ";
        let hints_len = key_hints.chars().count();

        // Mode info width (plus its leading space) is reserved up front so the
        // hints never get pushed off the right edge.
        let mode_display = self.mode_info.unwrap_or("");
        let mode_len = if mode_display.is_empty() {
            0
        } else {
            mode_display.chars().count() + 1
        };

        let remaining = width.saturating_sub(hints_len).saturating_sub(mode_len);

        // The root name keeps a minimum share so a long name still shows its
        // tail even when the summary alone would eat the whole budget.
        let summary_len = self.summary.chars().count();
        let name_budget = remaining
            .saturating_sub(summary_len)
            .saturating_sub(1)
            .max(remaining.min(12));
        let name_display = truncate_left(self.root_name, name_budget);
        let name_len = name_display.chars().count();

        let summary_budget = remaining.saturating_sub(name_len).saturating_sub(1);
        let summary_display = take_chars(self.summary, summary_budget);
        let summary_shown = summary_display.chars().count();

        // Gap between the root name and the summary pushes the summary
        // toward center-right.
        let gap = remaining.saturating_sub(name_len).saturating_sub(summary_shown);

        let name_style = Style::default().fg(self.theme.status_fg);
        let summary_style = Style::default().fg(self.theme.info_fg);
        let hints_style = Style::default()
            .fg(self.theme.dim_fg)
            .add_modifier(Modifier::DIM);

        let mut spans = vec![
            Span::styled(name_display, name_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(summary_display, summary_style),
        ];

        if mode_len > 0 {
            let mode_style = Style::default()
                .fg(self.theme.accent_fg)
                .add_modifier(Modifier::BOLD);
            spans.push(Span::raw(" "));
            spans.push(Span::styled(mode_display.to_string(), mode_style));
        }

        // Pad to fill remaining width if needed, then add hints
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let pad = width.saturating_sub(used).saturating_sub(hints_len);
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        spans.push(Span::styled(key_hints, hints_style));

        let line = Line::from(spans).style(Style::default().bg(self.theme.status_bg));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
