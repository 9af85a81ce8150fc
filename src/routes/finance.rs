//! Finance routes — records, monthly totals, and forecast projections.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::roles::Capability;
use crate::routes::auth::AuthUser;
use crate::services::finance::{self, FinanceError, FinanceRecord, NewRecord};
use crate::state::AppState;

fn status_for(e: &FinanceError) -> StatusCode {
    match e {
        FinanceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    project_id: Option<Uuid>,
}

/// `GET /api/finance?project_id=`
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<FinanceRecord>>, StatusCode> {
    auth.require(Capability::ViewFinance)?;
    let rows = finance::list_records(&state.pool, query.project_id)
        .await
        .map_err(|e| status_for(&e))?;
    Ok(Json(rows))
}

/// `POST /api/finance`
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewRecord>,
) -> Result<(StatusCode, Json<FinanceRecord>), StatusCode> {
    auth.require(Capability::ViewFinance)?;
    if !(body.amount > 0.0) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let row = finance::create_record(&state.pool, &body).await.map_err(|e| status_for(&e))?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /api/finance/forecast` — monthly history plus model projections.
pub async fn forecast(State(state): State<AppState>, auth: AuthUser) -> Result<Json<serde_json::Value>, StatusCode> {
    auth.require(Capability::ViewFinance)?;
    let months = finance::monthly_totals(&state.pool).await.map_err(|e| status_for(&e))?;
    let projections = finance::forecast(&months);
    Ok(Json(serde_json::json!({ "months": months, "projections": projections })))
}
