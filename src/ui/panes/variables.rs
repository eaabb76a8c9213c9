//! Variables pane rendering
//!
//! Displays the current snapshot's variable bindings, one row per entry,
//! sorted by name for stable ordering between steps. Values are styled by
//! kind using the same palette as the source highlighting.

use crate::trace::value::Value;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use rustc_hash::FxHashMap;

/// Data needed to render the variables pane
pub struct VariablesRenderData<'a> {
    pub variables: &'a FxHashMap<String, Value>,
}

fn value_style(value: &Value) -> Style {
    match value {
        Value::Str(_) => Style::default().fg(DEFAULT_THEME.string),
        Value::Number(_) => Style::default().fg(DEFAULT_THEME.number),
        Value::Bool(_) | Value::Null => Style::default().fg(DEFAULT_THEME.keyword),
        Value::Array(_) | Value::Object(_) => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the variables pane
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    data: VariablesRenderData,
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
        .title(" Variables ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items: Vec<ListItem> = Vec::new();

    if data.variables.is_empty() {
        all_items.push(
            ListItem::new("(no variables)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    } else {
        let mut names: Vec<&String> = data.variables.keys().collect();
        names.sort();

        for name in names {
            let value = &data.variables[name];
            let row = Line::from(vec![
                Span::styled(
                    name.as_str(),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(value.to_string(), value_style(value)),
            ]);
            all_items.push(ListItem::new(row));
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
