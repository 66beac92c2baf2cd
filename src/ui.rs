use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;
use crate::theme::ThemeColors;

/// Render the application UI: the tree panel above a one-line status bar.
pub fn render(app: &mut App, frame: &mut Frame, theme: &ThemeColors, use_icons: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    // Keep the cursor row visible inside the bordered tree panel.
    let visible_height = chunks[0].height.saturating_sub(2) as usize;
    app.update_scroll(visible_height);

    let block = Block::default()
        .title(format!(" {} ", app.tree.root().name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg))
        .style(Style::default().bg(theme.tree_bg).fg(theme.tree_fg));

    let tree_widget = TreeWidget::new(
        &app.flat_items,
        app.cursor_index,
        app.scroll_offset,
        theme,
        use_icons,
    )
    .block(block);
    frame.render_widget(tree_widget, chunks[0]);

    let summary = app.selection_summary();
    let mode_info = format!(
        "{} · {}",
        app.selection.mode().label(),
        app.selection.selectable().label()
    );
    let mut status_bar = StatusBarWidget::new(&app.tree.root().name, &summary, theme)
        .mode_info(&mode_info);
    if let Some((msg, _)) = &app.status_message {
        status_bar = status_bar.status_message(msg, false);
    }
    frame.render_widget(status_bar, chunks[1]);
}
