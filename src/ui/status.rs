use std::borrow::Cow;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Render the status bar.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocating for the static hint line and borrows live
    // status messages instead of cloning them.
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.loading_categories {
        Cow::Borrowed("Loading categories...")
    } else if app.loading_posts {
        Cow::Borrowed("Loading posts...")
    } else {
        Cow::Borrowed("[Enter]select/open [Tab]switch pane [r]eload [q]uit")
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
