//! Call stack pane rendering
//!
//! Displays the current snapshot's call stack, most recent call first.
//! Frame labels come straight from the trace; depth numbers count from the
//! bottom of the stack so a frame keeps its number while calls above it
//! come and go.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Data needed to render the stack pane
pub struct StackRenderData<'a> {
    /// Frame labels in call order; last = most recent call
    pub call_stack: &'a [String],
}

/// Render the call stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    data: StackRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Call Stack ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items: Vec<ListItem> = Vec::new();

    if data.call_stack.is_empty() {
        all_items.push(ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)));
    } else {
        // Top of stack first
        for (depth, label) in data.call_stack.iter().enumerate().rev() {
            let marker = if depth + 1 == data.call_stack.len() {
                "▸ "
            } else {
                "  "
            };
            let label_style = if depth + 1 == data.call_stack.len() {
                Style::default()
                    .fg(DEFAULT_THEME.function)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.function)
            };
            let item = Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("[{}] ", depth),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(label.as_str(), label_style),
            ]);
            all_items.push(ListItem::new(item));
        }
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
