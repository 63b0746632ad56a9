//! Keyboard input handling for the browse view.

use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{App, AppEvent, Focus};

use super::Action;

/// Handle a key press and return what the event loop should do next.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Ctrl+C always quits, whatever has focus
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Categories => Focus::Posts,
                Focus::Posts => Focus::Categories,
            };
            Action::Continue
        }

        KeyCode::Left | KeyCode::Char('h') => {
            app.focus = Focus::Categories;
            Action::Continue
        }

        KeyCode::Right | KeyCode::Char('l') => {
            app.focus = Focus::Posts;
            Action::Continue
        }

        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor_up();
            Action::Continue
        }

        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor_down();
            Action::Continue
        }

        KeyCode::Char('r') => {
            let _ = app.spawn_load_categories(event_tx);
            app.set_status("Reloading categories...");
            Action::Continue
        }

        KeyCode::Enter => match app.focus {
            Focus::Categories => {
                // Committing a selection is what triggers the posts load;
                // with an empty pane there is nothing to commit and the
                // posts pane stays untouched.
                if app.commit_selection() {
                    app.spawn_load_posts(event_tx);
                }
                Action::Continue
            }
            Focus::Posts => {
                if app.request_open() {
                    Action::Navigate
                } else {
                    Action::Continue
                }
            }
        },

        _ => Action::Continue,
    }
}
