//! Livelist Web Server
//!
//! Axum server exposing the shared list as HTML form actions and a small JSON
//! API, with a WebSocket that pulses every viewer after each mutation.

pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use livelist_core::ListStore;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/items", get(routes::api::list_items))
        .route("/items/{id}", get(routes::api::get_item))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/showrename", get(routes::pages::show_rename))
        .route("/add", post(routes::actions::add))
        .route("/toggle", patch(routes::actions::toggle))
        .route("/delete", delete(routes::actions::delete))
        .route("/rename", patch(routes::actions::rename))
        .route("/clear", post(routes::actions::clear))
        .route("/clearcompleted", post(routes::actions::clear_completed))
        .route("/assets/app.js", get(routes::assets::app_js))
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .route("/internal/notify", post(routes::internal::notify))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(store: Arc<dyn ListStore>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use livelist_core::{Item, ItemId, ListResult, MemoryStore, Pulse};
    use std::time::{Duration, Instant};
    use tower::ServiceExt;

    fn app() -> (Router, AppState) {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        (create_router(state.clone()), state)
    }

    fn form(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_add_redirects_and_pulses() {
        let (app, state) = app();
        let mut sub = state.notifier.subscribe();

        let res = app.oneshot(form("POST", "/add", "title=Buy+milk")).await.unwrap();

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/");
        assert_eq!(state.store.list().unwrap(), vec![Item::new(1, "Buy milk")]);
        assert_eq!(sub.recv().await, Some(Pulse));
    }

    #[tokio::test]
    async fn test_full_item_lifecycle() {
        let (app, state) = app();

        app.clone().oneshot(form("POST", "/add", "title=Buy+milk")).await.unwrap();

        let res = app.clone().oneshot(form("PATCH", "/toggle", "id=1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert!(state.store.list().unwrap()[0].done);

        let res = app
            .clone()
            .oneshot(form("PATCH", "/rename", "id=1&title=Buy+oat+milk"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(state.store.list().unwrap()[0].title, "Buy oat milk");

        let res = app.oneshot(form("DELETE", "/delete", "id=1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert!(state.store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_id_is_rejected() {
        let (app, _state) = app();
        let res = app.oneshot(form("PATCH", "/toggle", "id=abc")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_id_is_a_no_op() {
        let (app, state) = app();
        state.store.create("stays").unwrap();

        let res = app.oneshot(form("DELETE", "/delete", "id=42")).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.store.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_show_rename() {
        let (app, state) = app();
        state.store.create("Walk <dog>").unwrap();

        let res = app.clone().oneshot(get("/showrename")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app.clone().oneshot(get("/showrename?id=99")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app.oneshot(get("/showrename?id=1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("Walk &lt;dog&gt;"));
    }

    #[tokio::test]
    async fn test_index_lists_newest_first() {
        let (app, state) = app();
        state.store.create("older").unwrap();
        let newer = state.store.create("newer").unwrap();
        state.store.toggle(newer.id).unwrap();

        let res = app.oneshot(get("/")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;

        let newer_at = html.find(&format!("id=\"item-{}\"", newer.id)).unwrap();
        let older_at = html.find("id=\"item-1\"").unwrap();
        assert!(newer_at < older_at);
        assert!(html.contains("1 open, 1 completed"));
    }

    #[tokio::test]
    async fn test_clear_completed_and_clear() {
        let (app, state) = app();
        let a = state.store.create("a").unwrap();
        state.store.create("b").unwrap();
        state.store.toggle(a.id).unwrap();

        let res = app.clone().oneshot(form("POST", "/clearcompleted", "")).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.store.list().unwrap().len(), 1);

        app.oneshot(form("POST", "/clear", "")).await.unwrap();
        assert!(state.store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_items() {
        let (app, state) = app();
        state.store.create("json").unwrap();

        let res = app.clone().oneshot(get("/api/items")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let items: Vec<Item> = serde_json::from_str(&body_text(res).await).unwrap();
        assert_eq!(items, vec![Item::new(1, "json")]);

        let res = app.clone().oneshot(get("/api/items/1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app.oneshot(get("/api/items/2")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_internal_notify_pulses_observers() {
        let (app, state) = app();
        let mut first = state.notifier.subscribe();
        let mut second = state.notifier.subscribe();

        let res = app.oneshot(form("POST", "/internal/notify", "")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(first.recv().await, Some(Pulse));
        assert_eq!(second.recv().await, Some(Pulse));
    }

    /// Store whose reads block the calling thread, like SQLite waiting out a
    /// busy timeout.
    struct SlowStore {
        inner: MemoryStore,
        delay: std::time::Duration,
    }

    impl ListStore for SlowStore {
        fn create(&self, title: &str) -> ListResult<Item> {
            self.inner.create(title)
        }
        fn list(&self) -> ListResult<Vec<Item>> {
            std::thread::sleep(self.delay);
            self.inner.list()
        }
        fn find(&self, id: ItemId) -> ListResult<Item> {
            self.inner.find(id)
        }
        fn toggle(&self, id: ItemId) -> ListResult<()> {
            self.inner.toggle(id)
        }
        fn rename(&self, id: ItemId, title: &str) -> ListResult<()> {
            self.inner.rename(id, title)
        }
        fn delete(&self, id: ItemId) -> ListResult<()> {
            self.inner.delete(id)
        }
        fn clear(&self) -> ListResult<()> {
            self.inner.clear()
        }
        fn clear_completed(&self) -> ListResult<()> {
            self.inner.clear_completed()
        }
        fn open_items(&self) -> ListResult<Vec<Item>> {
            self.inner.open_items()
        }
        fn completed_items(&self) -> ListResult<Vec<Item>> {
            self.inner.completed_items()
        }
    }

    // Single-threaded runtime: if a handler ran the store call inline, the
    // timer below could not fire until the slow read finished.
    #[tokio::test(flavor = "current_thread")]
    async fn test_blocking_store_does_not_stall_runtime() {
        let delay = Duration::from_millis(400);
        let state = AppState::new(Arc::new(SlowStore {
            inner: MemoryStore::new(),
            delay,
        }));
        let app = create_router(state);

        let started = Instant::now();
        let request = tokio::spawn(app.oneshot(get("/")));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(started.elapsed() < delay / 2);
        assert!(!request.is_finished());

        let res = request.await.unwrap().unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(started.elapsed() >= delay);
    }

    #[tokio::test]
    async fn test_app_js_is_served() {
        let (app, _state) = app();
        let res = app.oneshot(get("/assets/app.js")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/javascript"));
        assert!(body_text(res).await.contains("/ws"));
    }
}
