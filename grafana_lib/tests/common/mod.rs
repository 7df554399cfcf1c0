//! In-process Grafana stand-in for integration tests.
//!
//! Serves an axum router on a random local port and records the method,
//! URI, and relevant headers of every request it receives.

#![allow(dead_code)]

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub org_id: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Default)]
pub struct Recorder {
    seen: Mutex<Vec<Seen>>,
}

impl Recorder {
    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

/// Start `router` on 127.0.0.1 and return its base URL.
pub async fn serve(router: Router) -> (String, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let app = router.layer(middleware::from_fn_with_state(recorder.clone(), record));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), recorder)
}

async fn record(State(recorder): State<Arc<Recorder>>, req: Request, next: Next) -> Response {
    let seen = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        Seen {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(String::from),
            authorization: header("authorization"),
            org_id: header("x-grafana-org-id"),
            content_type: header("content-type"),
            user_agent: header("user-agent"),
        }
    };
    recorder.seen.lock().unwrap().push(seen);
    next.run(req).await
}

/// A base URL nothing listens on.
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
