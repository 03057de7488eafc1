//! In-process stand-in for the notes store, recording every request.

use axum::Router;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use notes_types::{Note, NoteKey, ServerNote};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Path prefix the mock serves under, like an API gateway stage
const STAGE: &str = "/prod";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct Inner {
    requests: Vec<Recorded>,
    notes: Vec<ServerNote>,
    created_at: Option<String>,
    list_reply: Option<(StatusCode, String)>,
    create_reply: Option<(StatusCode, String)>,
    delay: Option<Duration>,
}

#[derive(Clone)]
pub struct MockStore {
    pub base_url: String,
    inner: Arc<Mutex<Inner>>,
}

impl MockStore {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store = Self {
            base_url: format!("http://{}{}", addr, STAGE),
            inner: Arc::new(Mutex::new(Inner::default())),
        };

        let app = Router::new().fallback(handle).with_state(store.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        store
    }

    pub fn seed(&self, notes: Vec<ServerNote>) {
        self.inner.lock().notes = notes;
    }

    /// Stamp created notes with this date so they carry a key
    pub fn stamp_created_at(&self, date: &str) {
        self.inner.lock().created_at = Some(date.to_string());
    }

    /// Answer `GET /notes` with a fixed reply
    pub fn fail_list(&self, status: StatusCode, body: &str) {
        self.inner.lock().list_reply = Some((status, body.to_string()));
    }

    /// Answer `POST /notes` with a fixed reply, storing nothing
    pub fn fail_create(&self, status: StatusCode, body: &str) {
        self.inner.lock().create_reply = Some((status, body.to_string()));
    }

    /// Hold every reply back for `delay`
    pub fn delay_replies(&self, delay: Duration) {
        self.inner.lock().delay = Some(delay);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().requests.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn notes(&self) -> Vec<ServerNote> {
        self.inner.lock().notes.clone()
    }
}

/// Base URL of a port nothing listens on
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, STAGE)
}

fn json_reply(status: StatusCode, body: String) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn handle(
    State(store): State<MockStore>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let delay = store.inner.lock().delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let path = uri.path().strip_prefix(STAGE).unwrap_or(uri.path()).to_string();
    let mut inner = store.inner.lock();
    inner.requests.push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    match (method.as_str(), path.as_str()) {
        ("POST", "/notes") => {
            if let Some((status, reply)) = inner.create_reply.clone() {
                return json_reply(status, reply);
            }
            let Ok(note) = serde_json::from_str::<Note>(&body) else {
                return json_reply(StatusCode::BAD_REQUEST, r#"{"error":"bad note"}"#.into());
            };
            let created_at = inner.created_at.clone();
            inner.notes.push(ServerNote {
                name: note.name,
                content: note.content,
                note_id: None,
                created_at,
                updated_at: None,
            });
            json_reply(StatusCode::OK, r#"{"message":"Note saved successfully"}"#.into())
        }
        ("GET", "/notes") => {
            if let Some((status, reply)) = inner.list_reply.clone() {
                return json_reply(status, reply);
            }
            json_reply(StatusCode::OK, serde_json::to_string(&inner.notes).unwrap())
        }
        ("GET" | "DELETE", "/notes/item") => {
            let Ok(Query(key)) = Query::<NoteKey>::try_from_uri(&uri) else {
                return json_reply(StatusCode::BAD_REQUEST, r#"{"error":"bad key"}"#.into());
            };
            let pos = inner
                .notes
                .iter()
                .position(|n| n.key().as_ref() == Some(&key));
            match (pos, method == Method::GET) {
                (None, _) => json_reply(StatusCode::NOT_FOUND, r#"{"error":"Item not found"}"#.into()),
                (Some(i), true) => {
                    let reply = serde_json::json!({ "message": "Item found", "item": inner.notes[i] });
                    json_reply(StatusCode::OK, reply.to_string())
                }
                (Some(i), false) => {
                    inner.notes.remove(i);
                    json_reply(StatusCode::OK, r#"{"message":"Item deleted"}"#.into())
                }
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
