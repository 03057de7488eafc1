//! Notes front-end service.
//!
//! Serves a single page with a note form and the list of stored notes. The
//! notes themselves live in a remote store reached over HTTP.
//!
//! Default: http://127.0.0.1:9104/

mod board;
mod config;
mod note_client;
mod render;
mod routes;

#[cfg(test)]
mod test_support;

use board::NoteBoard;
use config::Config;
use note_client::NoteClient;
use render::Templates;
use routes::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let client = match NoteClient::new(&config.api_url, config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Using notes store at {} (timeout {}s, write errors: {}, read errors: {})",
        client.base_url(),
        config.http_timeout.as_secs(),
        config.error_policy.write,
        config.error_policy.read,
    );

    let templates = match Templates::new() {
        Ok(templates) => templates,
        Err(e) => {
            log::error!("Failed to load page templates: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        board: NoteBoard::new(client, config.error_policy),
        templates,
    });

    let cors = tower_http::cors::CorsLayer::permissive();
    let app = routes::router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    log::info!("Notes front-end listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
