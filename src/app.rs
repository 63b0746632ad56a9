//! Application state and the selection-and-navigation flow.
//!
//! The flow has three steps, each driven by a discrete user event:
//!
//! 1. Startup fetches the category map and fills the categories pane.
//! 2. Committing a category re-fetches the map and fills the posts pane.
//! 3. Activating a post hands its trimmed URL to the host surface.
//!
//! Fetches run as spawned tasks that report back over an mpsc channel;
//! all state mutation happens on the UI loop task through [`App::apply`].

use std::borrow::Cow;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::api::{ApiClient, CategoryMap, Post};
use crate::host::{Host, HostError, LinkOptions};
use crate::util;

/// Which pane has focus in the browse view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Posts,
}

/// Events sent back by background fetch tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// Category map fetched at startup or on manual reload.
    CategoriesLoaded(Result<CategoryMap, String>),
    /// Posts for a committed category selection.
    PostsLoaded {
        /// The category this response was requested for, captured when the
        /// task was spawned. The user may have moved on since.
        category: String,
        /// Request tag; responses with a stale tag are dropped.
        generation: u64,
        result: Result<Vec<Post>, String>,
    },
}

/// Application state.
pub struct App {
    client: ApiClient,
    host: Box<dyn Host>,

    /// Category names in backend document order.
    pub categories: Vec<String>,
    /// Cursor position in the categories pane.
    pub selected_category: usize,
    /// The committed selection. This is the selection control's value:
    /// `None` until the user picks a category, then the picked name
    /// verbatim, even if a later re-fetch no longer contains it.
    pub active_category: Option<String>,

    /// Posts of the committed category, in backend order.
    pub posts: Vec<Post>,
    /// Cursor position in the posts pane.
    pub selected_post: usize,

    pub focus: Focus,
    pub needs_redraw: bool,
    pub loading_categories: bool,
    pub loading_posts: bool,
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Instant-view hint passed with every opened link.
    instant_view: bool,
    /// Tags posts requests so a stale slower response cannot overwrite a
    /// newer selection's list.
    posts_generation: u64,
    /// Trimmed URL of the activated post, waiting for the UI to tear down.
    pending_open: Option<String>,
}

impl App {
    pub fn new(client: ApiClient, host: Box<dyn Host>, instant_view: bool) -> Self {
        Self {
            client,
            host,
            categories: Vec::new(),
            selected_category: 0,
            active_category: None,
            posts: Vec::new(),
            selected_post: 0,
            focus: Focus::Categories,
            needs_redraw: true,
            loading_categories: false,
            loading_posts: false,
            status_message: None,
            instant_view,
            posts_generation: 0,
            pending_open: None,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message if expired (older than 3 seconds).
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Category name under the cursor, if any.
    pub fn cursor_category(&self) -> Option<&str> {
        self.categories.get(self.selected_category).map(String::as_str)
    }

    /// Commits the category under the cursor as the active selection.
    /// Returns false when the pane is empty and nothing was committed.
    pub fn commit_selection(&mut self) -> bool {
        match self.cursor_category() {
            Some(name) => {
                self.active_category = Some(name.to_owned());
                true
            }
            None => false,
        }
    }

    /// Move the cursor of the focused pane up one row.
    pub fn cursor_up(&mut self) {
        match self.focus {
            Focus::Categories => {
                self.selected_category = self.selected_category.saturating_sub(1);
            }
            Focus::Posts => {
                self.selected_post = self.selected_post.saturating_sub(1);
            }
        }
    }

    /// Move the cursor of the focused pane down one row.
    pub fn cursor_down(&mut self) {
        match self.focus {
            Focus::Categories => {
                if self.selected_category + 1 < self.categories.len() {
                    self.selected_category += 1;
                }
            }
            Focus::Posts => {
                if self.selected_post + 1 < self.posts.len() {
                    self.selected_post += 1;
                }
            }
        }
    }

    /// Fetch the category map in the background and report back as
    /// [`AppEvent::CategoriesLoaded`].
    pub fn spawn_load_categories(
        &mut self,
        event_tx: &mpsc::Sender<AppEvent>,
    ) -> JoinHandle<()> {
        self.loading_categories = true;
        let client = self.client.clone();
        let tx = event_tx.clone();
        tokio::spawn(async move {
            let result = client.categories().await.map_err(|e| e.to_string());
            if tx.send(AppEvent::CategoriesLoaded(result)).await.is_err() {
                tracing::warn!("Category load result dropped (receiver closed)");
            }
        })
    }

    /// Fetch the active category's posts in the background.
    ///
    /// A no-op without a committed selection: returns `None` and leaves the
    /// posts pane untouched. Otherwise re-fetches the full category map and
    /// looks the category up in the response; an absent key yields an empty
    /// list. The spawned task owns its copy of the category name, so every
    /// response carries the category it was requested for.
    pub fn spawn_load_posts(
        &mut self,
        event_tx: &mpsc::Sender<AppEvent>,
    ) -> Option<JoinHandle<()>> {
        let category = self.active_category.clone()?;

        self.posts_generation += 1;
        let generation = self.posts_generation;
        self.loading_posts = true;

        let client = self.client.clone();
        let tx = event_tx.clone();
        Some(tokio::spawn(async move {
            let result = client
                .categories()
                .await
                .map(|map| map.posts(&category).to_vec())
                .map_err(|e| e.to_string());
            let event = AppEvent::PostsLoaded {
                category,
                generation,
                result,
            };
            if tx.send(event).await.is_err() {
                tracing::warn!("Posts load result dropped (receiver closed)");
            }
        }))
    }

    /// Apply a background event to the app state.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::CategoriesLoaded(Ok(map)) => {
                self.loading_categories = false;
                self.categories = map.names().map(str::to_owned).collect();
                if self.selected_category >= self.categories.len() {
                    self.selected_category = self.categories.len().saturating_sub(1);
                }
                tracing::debug!(categories = self.categories.len(), "Categories loaded");
            }
            AppEvent::CategoriesLoaded(Err(e)) => {
                self.loading_categories = false;
                tracing::warn!(error = %e, "Category load failed");
                self.set_status(format!("Failed to load categories: {}", e));
            }
            AppEvent::PostsLoaded { generation, category, .. }
                if generation != self.posts_generation =>
            {
                tracing::debug!(generation, category = %category, "Dropping stale posts response");
            }
            AppEvent::PostsLoaded {
                category,
                result: Ok(posts),
                ..
            } => {
                self.loading_posts = false;
                tracing::debug!(category = %category, posts = posts.len(), "Posts loaded");
                self.posts = posts;
                self.selected_post = 0;
                if !self.posts.is_empty() {
                    self.focus = Focus::Posts;
                }
            }
            AppEvent::PostsLoaded {
                result: Err(e), ..
            } => {
                self.loading_posts = false;
                tracing::warn!(error = %e, "Posts load failed");
                self.set_status(format!("Failed to load posts: {}", e));
            }
        }
    }

    /// Records the trimmed URL of the post under the cursor for navigation.
    /// Returns false when the posts pane is empty.
    ///
    /// The URL is read from the activated row's own entry, never from a
    /// shared "current" variable, so rapid list changes cannot alias one
    /// row's activation to another row's target.
    pub fn request_open(&mut self) -> bool {
        match self.posts.get(self.selected_post) {
            Some(post) => {
                self.pending_open = Some(util::clean_url(&post.url).to_owned());
                true
            }
            None => false,
        }
    }

    /// The URL waiting to be opened, if a post was activated.
    pub fn pending_navigation(&self) -> Option<&str> {
        self.pending_open.as_deref()
    }

    /// Completes a requested navigation: asks the host to close the
    /// navigator surface, then to open the link with the instant-view
    /// hint. A no-op when nothing was activated.
    ///
    /// Runs after the terminal has been restored, so a minimal host's
    /// stdout fallback lands on the normal screen.
    pub fn finish_navigation(&mut self) -> Result<(), HostError> {
        let Some(url) = self.pending_open.take() else {
            return Ok(());
        };
        self.host.close();
        self.host.open_link(
            &url,
            LinkOptions {
                instant_view: self.instant_view,
            },
        )
    }
}
