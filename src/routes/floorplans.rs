//! Floor plan routes — save/load canvas plans and run recognition.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use canvas::plan::PlanStore;
use serde::Deserialize;
use uuid::Uuid;

use crate::roles::Capability;
use crate::routes::auth::AuthUser;
use crate::services::recognition::{self, RecognizeError};
use crate::services::persistence;
use crate::state::{AppState, PlanState};

/// `GET /api/floorplans` — saved plans for the current user.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<Json<serde_json::Value>, StatusCode> {
    auth.require(Capability::EditFloorPlans)?;
    let rows = persistence::list_plans(&state.pool, auth.user.id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let plans: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|(id, name)| serde_json::json!({ "id": id, "name": name }))
        .collect();
    Ok(Json(serde_json::json!({ "plans": plans })))
}

#[derive(Deserialize)]
pub struct SaveBody {
    name: String,
    plan: PlanStore,
    #[serde(default)]
    id: Option<Uuid>,
}

/// `POST /api/floorplans` — stage a plan in memory; the persistence task
/// flushes it to Postgres.
pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    auth.require(Capability::EditFloorPlans)?;
    if body.name.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let plan_id = body.id.unwrap_or_else(Uuid::new_v4);

    // EDGE: flushed plans are retired from memory, so resaving an existing
    // id re-checks ownership against the saved row.
    if body.id.is_some() && !state.plans.read().await.contains_key(&plan_id) {
        let row = persistence::load_plan(&state.pool, plan_id)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        if let Some((owner_id, _, _, _)) = row {
            if owner_id != auth.user.id {
                return Err(StatusCode::FORBIDDEN);
            }
        }
    }

    {
        let mut plans = state.plans.write().await;
        let entry = plans.entry(plan_id).or_insert_with(|| PlanState::new(auth.user.id, body.name.clone()));
        if entry.owner_id != auth.user.id {
            return Err(StatusCode::FORBIDDEN);
        }
        entry.name = body.name;
        entry.plan = body.plan;
        entry.touch();
    }
    Ok(Json(serde_json::json!({ "id": plan_id })))
}

/// `GET /api/floorplans/{id}` — prefer the in-memory copy, fall back to
/// the saved row.
pub async fn load(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    auth.require(Capability::EditFloorPlans)?;

    {
        let plans = state.plans.read().await;
        if let Some(entry) = plans.get(&id) {
            if entry.owner_id != auth.user.id {
                return Err(StatusCode::FORBIDDEN);
            }
            let plan = serde_json::to_value(&entry.plan).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
            return Ok(Json(serde_json::json!({ "id": id, "name": entry.name, "plan": plan })));
        }
    }

    let row = persistence::load_plan(&state.pool, id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    let (owner_id, name, plan, _version) = row;
    if owner_id != auth.user.id {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(serde_json::json!({ "id": id, "name": name, "plan": plan })))
}

// =============================================================================
// RECOGNIZE
// =============================================================================

#[derive(Deserialize)]
pub struct RecognizeBody {
    filename: String,
    /// Base64-encoded source image.
    image: String,
    canvas_width: f64,
    canvas_height: f64,
}

/// `POST /api/recognize` — run the edge pipeline and OCR over an uploaded
/// floor plan photo; returns processed line work and measurement labels.
pub async fn recognize(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<RecognizeBody>,
) -> Response {
    if auth.require(Capability::EditFloorPlans).is_err() {
        return StatusCode::FORBIDDEN.into_response();
    }

    let Ok(bytes) = BASE64.decode(body.image.as_bytes()) else {
        return (StatusCode::BAD_REQUEST, "image must be base64 encoded").into_response();
    };

    let ocr = state.ocr.as_deref();
    match recognition::recognize(ocr, &body.filename, &bytes, body.canvas_width, body.canvas_height).await {
        Ok(output) => {
            let png = BASE64.encode(&output.png);
            Json(serde_json::json!({ "image": png, "measurements": output.measurements })).into_response()
        }
        Err(RecognizeError::UnsupportedFile(_)) => {
            (StatusCode::BAD_REQUEST, "Please upload an image file (.png, .jpg, .jpeg)").into_response()
        }
        Err(RecognizeError::Decode(e)) => {
            tracing::warn!(error = %e, "recognize: image decode failed");
            (StatusCode::BAD_REQUEST, "image could not be decoded").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "recognize failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
#[path = "floorplans_test.rs"]
mod tests;
