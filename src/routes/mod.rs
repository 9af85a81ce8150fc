//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the REST API, the dashboard websocket feed, and the static frontend
//! under a single Axum router. Role checks live in the handlers via
//! `AuthUser::require`; this module only wires paths to handlers.

pub mod auth;
pub mod finance;
pub mod floorplans;
pub mod materials;
pub mod projects;
pub mod ws;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/{id}",
            get(projects::get).patch(projects::update).delete(projects::delete),
        )
        .route("/api/materials", get(materials::list).post(materials::create))
        .route(
            "/api/materials/{id}",
            axum::routing::patch(materials::update).delete(materials::delete),
        )
        .route("/api/finance", get(finance::list).post(finance::create))
        .route("/api/finance/forecast", get(finance::forecast))
        .route("/api/floorplans", get(floorplans::list).post(floorplans::save))
        .route("/api/floorplans/{id}", get(floorplans::load))
        .route("/api/recognize", post(floorplans::recognize))
        .route("/api/ws", get(ws::handle_ws))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the static frontend directory.
fn frontend_dir() -> PathBuf {
    std::env::var("FRONTEND_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("frontend"))
}

/// Full application: API routes plus the static dashboard frontend.
#[must_use]
pub fn app(state: AppState) -> Router {
    let frontend = ServeDir::new(frontend_dir()).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(frontend)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
