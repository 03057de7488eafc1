//! Axum route handlers for the notes page.

use crate::board::NoteBoard;
use crate::render::{FormState, Templates};
use axum::Router;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use notes_types::NoteKey;
use serde::Deserialize;
use std::sync::Arc;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
    pub board: NoteBoard,
    pub templates: Templates,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/notes", post(save))
        .route("/notes/delete", post(delete))
        .route("/notes/view", get(view))
        .route("/api/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    created_at: String,
    name: String,
}

fn page(state: &AppState, form: &FormState, prompt: Option<&str>) -> Result<String, tera::Error> {
    let notices = state.board.take_notices();
    state.templates.page(form, prompt, &notices, &state.board.view())
}

fn respond(status: StatusCode, rendered: Result<String, tera::Error>) -> Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            log::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    // Failures are already handled by the board's read policy
    let _ = state.board.load_notes().await;
    respond(StatusCode::OK, page(&state, &FormState::default(), None))
}

// POST /notes
pub async fn save(State(state): State<Arc<AppState>>, Form(form): Form<SaveForm>) -> Response {
    match state.board.save_note(&form.title, &form.content) {
        Ok(handle) => {
            handle.finished().await;
            respond(StatusCode::OK, page(&state, &FormState::default(), None))
        }
        Err(e) => {
            let entered = FormState {
                title: form.title,
                content: form.content,
            };
            let prompt = e.to_string();
            respond(
                StatusCode::UNPROCESSABLE_ENTITY,
                page(&state, &entered, Some(&prompt)),
            )
        }
    }
}

// POST /notes/delete
pub async fn delete(State(state): State<Arc<AppState>>, Form(form): Form<DeleteForm>) -> Response {
    let key = NoteKey {
        created_at: form.created_at,
        name: form.name,
    };
    let _ = state.board.delete_note(&key).await;
    respond(StatusCode::OK, page(&state, &FormState::default(), None))
}

// GET /notes/view
pub async fn view(State(state): State<Arc<AppState>>, Query(key): Query<NoteKey>) -> Response {
    match state.board.open_note(&key).await {
        Ok(Some(note)) => respond(StatusCode::OK, state.templates.detail(&note)),
        Ok(None) => respond(StatusCode::NOT_FOUND, state.templates.message("Note not found")),
        Err(_) => respond(
            StatusCode::BAD_GATEWAY,
            state.templates.message("Could not load the note"),
        ),
    }
}

// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": VERSION
    }))
}
