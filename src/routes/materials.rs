//! Material routes — stock CRUD with dashboard fan-out.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::roles::Capability;
use crate::routes::auth::AuthUser;
use crate::services::material::{self, MaterialError, MaterialPatch, MaterialRow, NewMaterial};
use crate::state::AppState;
use crate::update::Update;

fn status_for(e: &MaterialError) -> StatusCode {
    match e {
        MaterialError::NotFound(_) => StatusCode::NOT_FOUND,
        MaterialError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn row_update(row: &MaterialRow) -> Update {
    Update::material(crate::update::Data::new())
        .with_data("id", row.id.to_string())
        .with_data("name", row.name.clone())
        .with_data("quantity", row.quantity)
        .with_data("status", row.status.clone())
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    project_id: Option<Uuid>,
}

/// `GET /api/materials?project_id=`
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MaterialRow>>, StatusCode> {
    auth.require(Capability::ViewDashboard)?;
    let rows = material::list_materials(&state.pool, query.project_id)
        .await
        .map_err(|e| status_for(&e))?;
    Ok(Json(rows))
}

/// `POST /api/materials`
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewMaterial>,
) -> Result<(StatusCode, Json<MaterialRow>), StatusCode> {
    auth.require(Capability::ManageMaterials)?;
    if body.name.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let row = material::create_material(&state.pool, &body).await.map_err(|e| status_for(&e))?;
    state.broadcast(&row_update(&row)).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `PATCH /api/materials/{id}`
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MaterialPatch>,
) -> Result<Json<MaterialRow>, StatusCode> {
    auth.require(Capability::ManageMaterials)?;
    let row = material::update_material(&state.pool, id, &body).await.map_err(|e| status_for(&e))?;
    state.broadcast(&row_update(&row)).await;
    Ok(Json(row))
}

/// `DELETE /api/materials/{id}`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    auth.require(Capability::ManageMaterials)?;
    material::delete_material(&state.pool, id).await.map_err(|e| status_for(&e))?;
    let update = Update::material(crate::update::Data::new())
        .with_data("id", id.to_string())
        .with_data("deleted", true);
    state.broadcast(&update).await;
    Ok(StatusCode::NO_CONTENT)
}
