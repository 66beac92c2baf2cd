use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Cursor movement
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('g') | KeyCode::Home => app.cursor_first(),
        KeyCode::Char('G') | KeyCode::End => app.cursor_last(),

        // Selection
        KeyCode::Enter | KeyCode::Char('s') => app.select_under_cursor(),
        KeyCode::Char(' ') => app.toggle_under_cursor(),
        KeyCode::Char('c') => app.clear_selection(),

        // Expand / collapse
        KeyCode::Char('l') | KeyCode::Right => app.expand_under_cursor(),
        KeyCode::Char('h') | KeyCode::Left => app.collapse_under_cursor(),

        _ => {}
    }
}

/// Handle a mouse event.
///
/// The tree panel occupies the whole frame above the status line, with a
/// one-cell border, so the flat row under a click is
/// `scroll_offset + (row - 1)`.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = row_to_index(app, mouse.row) {
                app.cursor_index = index;
                app.select_under_cursor();
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if let Some(index) = row_to_index(app, mouse.row) {
                app.cursor_index = index;
                app.toggle_under_cursor();
            }
        }
        MouseEventKind::ScrollDown => app.cursor_down(),
        MouseEventKind::ScrollUp => app.cursor_up(),
        _ => {}
    }
}

/// Map a terminal row to a visible flat item index, if it lands on one.
///
/// Rows outside the window the tree panel showed on the last render (the top
/// and bottom borders, the status line) map to nothing, even when
/// `scroll_offset + row - 1` would name a real node.
fn row_to_index(app: &App, row: u16) -> Option<usize> {
    let row = row as usize;
    if row == 0 || row > app.visible_height {
        return None;
    }
    let index = app.scroll_offset + (row - 1);
    if index < app.flat_items.len() {
        Some(index)
    } else {
        None
    }
}
