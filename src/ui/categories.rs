use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Focus};

/// Render the category pane.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Categories;

    let items: Vec<ListItem> = if app.categories.is_empty() {
        let placeholder = if app.loading_categories {
            "Loading..."
        } else {
            "No categories"
        };
        vec![ListItem::new(placeholder)]
    } else {
        app.categories
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let active = app.active_category.as_deref() == Some(name.as_str());
                let style = if i == app.selected_category {
                    Style::default().bg(Color::DarkGray).fg(Color::White)
                } else if active {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(name.as_str()).style(style)
            })
            .collect()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Categories"),
    );

    let mut state = ListState::default().with_selected(Some(app.selected_category));
    f.render_stateful_widget(list, area, &mut state);
}
