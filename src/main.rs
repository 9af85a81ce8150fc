mod db;
mod roles;
mod routes;
mod services;
mod state;
mod update;

use std::sync::Arc;

use services::recognition::{OcrClient, OcrConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Initialize OCR client (non-fatal: recognition falls back to line work only).
    let ocr = match OcrConfig::from_env() {
        Some(config) => match OcrClient::new(&config) {
            Ok(client) => {
                tracing::info!(base_url = %config.base_url, "OCR client initialized");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::warn!(error = %e, "OCR client build failed — measurements disabled");
                None
            }
        },
        None => {
            tracing::warn!("OCR_SERVICE_URL not set — measurements disabled");
            None
        }
    };

    let state = state::AppState::new(pool, ocr);

    // Spawn background floor plan persistence task.
    let _persistence = services::persistence::spawn_persistence_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "sitedesk listening");
    axum::serve(listener, app).await.expect("server failed");
}
