use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::FlatItem;
use crate::theme::ThemeColors;

/// Tree widget that renders the flattened node rows with box-drawing
/// characters and the selected/marked/opened flags the selection core
/// exposes.
pub struct TreeWidget<'a> {
    items: &'a [FlatItem],
    cursor_index: usize,
    scroll_offset: usize,
    theme: &'a ThemeColors,
    use_icons: bool,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(
        items: &'a [FlatItem],
        cursor_index: usize,
        scroll_offset: usize,
        theme: &'a ThemeColors,
        use_icons: bool,
    ) -> Self {
        Self {
            items,
            cursor_index,
            scroll_offset,
            theme,
            use_icons,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    /// Build the prefix string for tree indentation using box-drawing characters.
    ///
    /// We need to know the ancestor chain to draw continuation lines correctly.
    fn build_prefix(item: &FlatItem, items: &[FlatItem], item_index: usize) -> String {
        if item.depth == 0 {
            return String::new();
        }

        // Build prefix from left to right for each depth level
        let mut parts: Vec<&str> = Vec::new();

        // For each ancestor level (1..depth), determine if it's the last sibling
        // at that level by walking backwards through the rows above.
        for d in 1..item.depth {
            let mut ancestor_is_last = false;
            for j in (0..item_index).rev() {
                if items[j].depth == d {
                    ancestor_is_last = items[j].is_last_sibling;
                    break;
                }
                if items[j].depth < d {
                    break;
                }
            }
            if ancestor_is_last {
                parts.push("   ");
            } else {
                parts.push("│  ");
            }
        }

        // The connector for this item
        if item.is_last_sibling {
            parts.push("└──");
        } else {
            parts.push("├──");
        }

        parts.join("")
    }

    /// Expand/collapse affordance. Leaves get none — toggling them is a no-op.
    fn toggle_glyph(&self, item: &FlatItem) -> &'static str {
        if !item.has_children {
            return "  ";
        }
        match (self.use_icons, item.opened) {
            (true, true) => "▾ ",
            (true, false) => "▸ ",
            (false, true) => "- ",
            (false, false) => "+ ",
        }
    }

    /// Node icon from its (opaque) icon name, with branch/leaf fallbacks.
    fn item_indicator(&self, item: &FlatItem) -> &'static str {
        if self.use_icons {
            match item.icon.as_deref() {
                Some("folder") if item.opened => " ",
                Some("folder") => " ",
                Some("image") => " ",
                Some("file") => " ",
                Some(_) => "• ",
                None if item.has_children => " ",
                None => " ",
            }
        } else {
            match item.icon.as_deref() {
                _ if item.has_children => "[B] ",
                Some("image") => "[I] ",
                _ => "[L] ",
            }
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let visible_height = inner_area.height as usize;
        if self.items.is_empty() || visible_height == 0 {
            return;
        }

        let visible_items = self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height);

        for (i, (idx, item)) in visible_items.enumerate() {
            let y = inner_area.y + i as u16;
            if y >= inner_area.y + inner_area.height {
                break;
            }

            let prefix = Self::build_prefix(item, self.items, idx);
            let toggle = self.toggle_glyph(item);
            let indicator = self.item_indicator(item);

            let is_cursor = idx == self.cursor_index;

            let style = if is_cursor {
                Style::default()
                    .bg(self.theme.cursor_bg)
                    .fg(self.theme.cursor_fg)
                    .add_modifier(Modifier::BOLD)
            } else if item.selected {
                Style::default()
                    .fg(self.theme.selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else if item.marked {
                Style::default().fg(self.theme.marked_fg)
            } else if item.has_children {
                Style::default()
                    .fg(self.theme.branch_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.leaf_fg)
            };

            let marker = if item.selected {
                "● "
            } else if item.marked {
                "◌ "
            } else {
                ""
            };
            let line_content = format!("{}{}{}{}{}", prefix, toggle, marker, indicator, item.name);
            let span = Span::styled(line_content, style);
            let line = Line::from(span);

            let line_area = Rect::new(inner_area.x, y, inner_area.width, 1);
            buf.set_line(line_area.x, line_area.y, &line, line_area.width);
        }
    }
}
