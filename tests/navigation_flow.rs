//! Integration tests for the selection-and-navigation flow.
//!
//! Each test runs the real fetch path against a wiremock backend and
//! drives the app through its public surface: load categories, commit a
//! selection, load posts, activate a post. Host interaction is observed
//! through a recording double.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use channelnav::api::{ApiClient, Post};
use channelnav::app::{App, AppEvent, Focus};
use channelnav::host::{self, Host, HostError, LinkOptions, OpenMode};

const DOC: &str = r#"{
    "News": [
        {"title": "A", "url": " http://x/a "},
        {"title": "B", "url": "http://x/b"}
    ],
    "Sports": []
}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostCall {
    Ready,
    Close,
    Open(String, bool),
}

/// Host double recording every call in order.
struct RecordingHost(Arc<Mutex<Vec<HostCall>>>);

impl Host for RecordingHost {
    fn name(&self) -> &'static str {
        "recording"
    }
    fn ready(&self) {
        self.0.lock().unwrap().push(HostCall::Ready);
    }
    fn close(&self) {
        self.0.lock().unwrap().push(HostCall::Close);
    }
    fn open_link(&self, url: &str, options: LinkOptions) -> Result<(), HostError> {
        self.0
            .lock()
            .unwrap()
            .push(HostCall::Open(url.to_owned(), options.instant_view));
        Ok(())
    }
}

async fn mount_doc(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("Content-Type", "application/json"),
        )
        .mount(server)
        .await;
}

fn test_app(server: &MockServer) -> (App, Arc<Mutex<Vec<HostCall>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let host = RecordingHost(Arc::clone(&calls));
    let client = ApiClient::new(
        Url::parse(&server.uri()).unwrap(),
        Duration::from_secs(5),
    )
    .unwrap();
    (App::new(client, Box::new(host), true), calls)
}

/// Run the startup category load to completion and apply the result.
async fn load_categories(app: &mut App) {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(8);
    app.spawn_load_categories(&tx).await.unwrap();
    let event = rx.recv().await.unwrap();
    app.apply(event);
}

/// Commit the category under the cursor and run the posts load to
/// completion.
async fn commit_and_load_posts(app: &mut App) {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(8);
    assert!(app.commit_selection());
    app.spawn_load_posts(&tx).unwrap().await.unwrap();
    let event = rx.recv().await.unwrap();
    app.apply(event);
}

#[tokio::test]
async fn categories_appear_once_each_in_document_order() {
    let server = MockServer::start().await;
    mount_doc(&server, DOC).await;
    let (mut app, _) = test_app(&server);

    load_categories(&mut app).await;

    assert_eq!(app.categories, vec!["News", "Sports"]);
}

#[tokio::test]
async fn empty_map_yields_no_categories_and_load_posts_stays_noop() {
    let server = MockServer::start().await;
    mount_doc(&server, "{}").await;
    let (mut app, _) = test_app(&server);

    load_categories(&mut app).await;
    assert!(app.categories.is_empty());

    // Nothing to commit, so loading posts never spawns a request and the
    // posts pane is untouched.
    let (tx, _rx) = mpsc::channel::<AppEvent>(8);
    assert!(!app.commit_selection());
    assert!(app.spawn_load_posts(&tx).is_none());
    assert!(app.posts.is_empty());
}

#[tokio::test]
async fn load_posts_without_selection_leaves_posts_untouched() {
    let server = MockServer::start().await;
    mount_doc(&server, DOC).await;
    let (mut app, _) = test_app(&server);

    // Pre-seed the pane to prove a no-op leaves existing content alone.
    app.posts = vec![Post {
        title: "sentinel".into(),
        url: "http://sentinel".into(),
    }];

    let (tx, _rx) = mpsc::channel::<AppEvent>(8);
    assert!(app.spawn_load_posts(&tx).is_none());
    assert_eq!(app.posts.len(), 1);
    assert_eq!(app.posts[0].title, "sentinel");
}

#[tokio::test]
async fn committed_category_renders_one_row_per_post_in_order() {
    let server = MockServer::start().await;
    mount_doc(&server, DOC).await;
    let (mut app, _) = test_app(&server);

    load_categories(&mut app).await;
    app.selected_category = 0; // "News"
    commit_and_load_posts(&mut app).await;

    let titles: Vec<&str> = app.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert_eq!(app.focus, Focus::Posts);
}

#[tokio::test]
async fn empty_category_renders_empty_list_not_error() {
    let server = MockServer::start().await;
    mount_doc(&server, DOC).await;
    let (mut app, _) = test_app(&server);

    load_categories(&mut app).await;
    app.selected_category = 1; // "Sports"
    commit_and_load_posts(&mut app).await;

    assert!(app.posts.is_empty());
    assert!(app.status_message.is_none());
}

#[tokio::test]
async fn stale_committed_category_renders_empty_list() {
    let server = MockServer::start().await;
    mount_doc(&server, DOC).await;
    let (mut app, _) = test_app(&server);

    // A selection the backend no longer knows about must degrade to an
    // empty list, never an error.
    app.active_category = Some("Archived".to_string());
    let (tx, mut rx) = mpsc::channel::<AppEvent>(8);
    app.spawn_load_posts(&tx).unwrap().await.unwrap();
    app.apply(rx.recv().await.unwrap());

    assert!(app.posts.is_empty());
    assert!(app.status_message.is_none());
}

#[tokio::test]
async fn activating_a_row_navigates_with_that_rows_trimmed_url() {
    let server = MockServer::start().await;
    mount_doc(&server, DOC).await;
    let (mut app, calls) = test_app(&server);

    load_categories(&mut app).await;
    app.selected_category = 0;
    commit_and_load_posts(&mut app).await;

    // Activate the first row: its URL is " http://x/a ", which must reach
    // the host trimmed, and must not be row two's URL.
    app.selected_post = 0;
    assert!(app.request_open());
    app.finish_navigation().unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            HostCall::Close,
            HostCall::Open("http://x/a".to_owned(), true),
        ]
    );
}

#[tokio::test]
async fn each_row_keeps_its_own_url() {
    let server = MockServer::start().await;
    mount_doc(&server, DOC).await;
    let (mut app, calls) = test_app(&server);

    load_categories(&mut app).await;
    app.selected_category = 0;
    commit_and_load_posts(&mut app).await;

    app.selected_post = 1;
    assert!(app.request_open());
    app.finish_navigation().unwrap();

    // Row two's URL, not the last-seen or first row's.
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            HostCall::Close,
            HostCall::Open("http://x/b".to_owned(), true),
        ]
    );
}

#[tokio::test]
async fn stale_posts_response_cannot_overwrite_newer_selection() {
    let server = MockServer::start().await;
    mount_doc(
        &server,
        r#"{
            "News": [{"title": "N1", "url": "http://x/n1"}],
            "Sports": [{"title": "S1", "url": "http://x/s1"}]
        }"#,
    )
    .await;
    let (mut app, _) = test_app(&server);

    load_categories(&mut app).await;
    let (tx, mut rx) = mpsc::channel::<AppEvent>(8);

    // First request: News.
    app.selected_category = 0;
    assert!(app.commit_selection());
    app.spawn_load_posts(&tx).unwrap().await.unwrap();
    let news_event = rx.recv().await.unwrap();

    // Second request: Sports, spawned before the News response is applied.
    app.selected_category = 1;
    assert!(app.commit_selection());
    app.spawn_load_posts(&tx).unwrap().await.unwrap();
    let sports_event = rx.recv().await.unwrap();

    // The slow first response arrives last; it must be dropped.
    app.apply(sports_event);
    app.apply(news_event);

    let titles: Vec<&str> = app.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["S1"], "stale News list overwrote Sports");
}

#[tokio::test]
async fn backend_failure_surfaces_status_and_leaves_panes_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (mut app, _) = test_app(&server);

    load_categories(&mut app).await;

    assert!(app.categories.is_empty());
    let (msg, _) = app.status_message.as_ref().expect("status message");
    assert!(msg.contains("Failed to load categories"));
}

#[test]
fn host_selection_prefers_rich_when_forced_and_minimal_otherwise() {
    assert_eq!(host::select(OpenMode::Browser, None).name(), "desktop");
    assert_eq!(host::select(OpenMode::Print, None).name(), "tty");
}
