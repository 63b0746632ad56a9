use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Focus};
use crate::util::truncate_to_width;

/// Render the posts pane: one row per post of the committed category,
/// labeled with the post's title.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Posts;

    let items: Vec<ListItem> = if app.posts.is_empty() {
        let placeholder = if app.loading_posts {
            "Loading..."
        } else if app.active_category.is_some() {
            "No posts in this category"
        } else {
            "Select a category"
        };
        vec![ListItem::new(placeholder)]
    } else {
        // Leave room for the borders
        let max_width = area.width.saturating_sub(4) as usize;
        app.posts
            .iter()
            .enumerate()
            .map(|(i, post)| {
                let style = if i == app.selected_post {
                    Style::default().bg(Color::DarkGray).fg(Color::White)
                } else {
                    Style::default()
                };
                let title = truncate_to_width(&post.title, max_width).into_owned();
                ListItem::new(title).style(style)
            })
            .collect()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = match &app.active_category {
        Some(name) => format!("Posts - {}", name),
        None => "Posts".to_string(),
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    let mut state = ListState::default().with_selected(Some(app.selected_post));
    f.render_stateful_widget(list, area, &mut state);
}
