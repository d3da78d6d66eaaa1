use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use otguard_common::{read_findings, read_raw_findings, Config};

mod templates;
use templates::render_dashboard;

// --- App State ---

struct AppState {
    store_path: PathBuf,
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("otguard_web=info".parse()?))
        .init();

    let config = Config::web_from_env();

    let state = Arc::new(AppState {
        store_path: config.store_path.clone(),
    });

    let app = Router::new()
        .route("/", get(dashboard_page))
        .route("/api/findings", get(api_findings))
        .with_state(state)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!(store = %config.store_path.display(), "OT Guard dashboard starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

// The findings file is re-read on every request: the watcher is the sole
// writer and replaces the file atomically, so the worst case here is
// serving the previous complete state.

async fn dashboard_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let findings = read_findings(&state.store_path);
    Html(render_dashboard(&findings))
}

async fn api_findings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(read_raw_findings(&state.store_path))
}
