//! Project routes — CRUD with dashboard fan-out.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::roles::Capability;
use crate::routes::auth::AuthUser;
use crate::services::project::{self, NewProject, ProjectError, ProjectPatch, ProjectRow};
use crate::state::AppState;
use crate::update::Update;

fn status_for(e: &ProjectError) -> StatusCode {
    match e {
        ProjectError::NotFound(_) => StatusCode::NOT_FOUND,
        ProjectError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn row_update(row: &ProjectRow) -> Update {
    Update::project(crate::update::Data::new())
        .with_data("id", row.id.to_string())
        .with_data("name", row.name.clone())
        .with_data("status", row.status.clone())
        .with_data("progress", row.progress)
}

/// `GET /api/projects`
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<ProjectRow>>, StatusCode> {
    auth.require(Capability::ViewDashboard)?;
    let rows = project::list_projects(&state.pool).await.map_err(|e| status_for(&e))?;
    Ok(Json(rows))
}

/// `GET /api/projects/{id}`
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectRow>, StatusCode> {
    auth.require(Capability::ViewDashboard)?;
    let row = project::get_project(&state.pool, id).await.map_err(|e| status_for(&e))?;
    Ok(Json(row))
}

/// `POST /api/projects`
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewProject>,
) -> Result<(StatusCode, Json<ProjectRow>), StatusCode> {
    auth.require(Capability::ManageProjects)?;
    if body.name.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let row = project::create_project(&state.pool, &body).await.map_err(|e| status_for(&e))?;
    state.broadcast(&row_update(&row)).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `PATCH /api/projects/{id}`
///
/// Progress or status changes additionally fan out as milestone updates so
/// customer dashboards move without a materials feed.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<ProjectPatch>,
) -> Result<Json<ProjectRow>, StatusCode> {
    auth.require(Capability::ManageProjects)?;
    if body.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let milestone = body.touches_progress();
    let row = project::update_project(&state.pool, id, &body).await.map_err(|e| status_for(&e))?;

    state.broadcast(&row_update(&row)).await;
    if milestone {
        let update = Update::milestone(crate::update::Data::new())
            .with_data("project_id", row.id.to_string())
            .with_data("progress", row.progress)
            .with_data("status", row.status.clone());
        state.broadcast(&update).await;
    }
    Ok(Json(row))
}

/// `DELETE /api/projects/{id}`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    auth.require(Capability::ManageProjects)?;
    project::delete_project(&state.pool, id).await.map_err(|e| status_for(&e))?;
    let update = Update::project(crate::update::Data::new())
        .with_data("id", id.to_string())
        .with_data("deleted", true);
    state.broadcast(&update).await;
    Ok(StatusCode::NO_CONTENT)
}
