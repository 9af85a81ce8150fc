//! WebSocket handler — role-scoped dashboard update feed.
//!
//! DESIGN
//! ======
//! On upgrade, registers the client in the shared state and enters a
//! `select!` loop:
//! - Updates broadcast by REST handlers → forwarded if the client's role
//!   observes the update kind (filtering happens at broadcast time).
//! - Inbound client messages → a small command set; anything else is ignored.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade (session cookie auth) → send an initial `dashboard-update`
//! 2. REST writes fan out through `AppState::broadcast`
//! 3. Close → deregister client

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::services::dashboard;
use crate::state::{AppState, DashboardClient};
use crate::update::Update;

pub async fn handle_ws(State(state): State<AppState>, auth: AuthUser, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state, auth))
}

async fn run_ws(mut socket: WebSocket, state: AppState, auth: AuthUser) {
    let client_id = Uuid::new_v4();
    let role = auth.user.role;

    let (tx, mut rx) = mpsc::channel::<Update>(256);
    state.clients.write().await.insert(client_id, DashboardClient { role, tx });
    info!(%client_id, role = role.as_str(), "ws: dashboard connected");

    // Initial snapshot so the dashboard renders before any write happens.
    let welcome = Update::dashboard(dashboard::snapshot(&state.pool).await);
    if send_update(&mut socket, &welcome).await.is_err() {
        state.clients.write().await.remove(&client_id);
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        if let Some(reply) = handle_command(&state, text.as_str()).await {
                            if send_update(&mut socket, &reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(update) = rx.recv() => {
                if send_update(&mut socket, &update).await.is_err() {
                    break;
                }
            }
        }
    }

    state.clients.write().await.remove(&client_id);
    info!(%client_id, "ws: dashboard disconnected");
}

/// Inbound command set. `refresh` re-sends the aggregated snapshot; unknown
/// input is ignored rather than answered, the feed is write-mostly.
async fn handle_command(state: &AppState, text: &str) -> Option<Update> {
    let command = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| v.get("type").and_then(|t| t.as_str()).map(str::to_owned))?;
    match command.as_str() {
        "refresh" => Some(Update::dashboard(dashboard::snapshot(&state.pool).await)),
        _ => None,
    }
}

async fn send_update(socket: &mut WebSocket, update: &Update) -> Result<(), ()> {
    let json = match serde_json::to_string(update) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize update");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
