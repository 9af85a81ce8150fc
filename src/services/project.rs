//! Project service — CRUD over construction projects.
//!
//! DESIGN
//! ======
//! Projects are the spine of every dashboard: progress, budget and spend
//! roll up from here. Updates are partial; only the provided fields change
//! and `updated_at` is bumped on any write.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from project queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub progress: i32,
    pub budget: f64,
    pub spent: f64,
    pub manager: String,
}

/// Fields accepted when creating a project.
#[derive(Debug, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub manager: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub status: Option<String>,
    pub progress: Option<i32>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub manager: Option<String>,
}

impl ProjectPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.progress.is_none()
            && self.budget.is_none()
            && self.spent.is_none()
            && self.manager.is_none()
    }

    /// Whether this patch moves the milestone needle rather than metadata.
    #[must_use]
    pub fn touches_progress(&self) -> bool {
        self.progress.is_some() || self.status.is_some()
    }
}

/// List all projects, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_projects(pool: &PgPool) -> Result<Vec<ProjectRow>, ProjectError> {
    let rows = sqlx::query_as::<_, ProjectRow>(
        "SELECT id, name, status, progress, budget, spent, manager
         FROM projects ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch one project.
///
/// # Errors
///
/// Returns `NotFound` if no such project exists.
pub async fn get_project(pool: &PgPool, id: Uuid) -> Result<ProjectRow, ProjectError> {
    sqlx::query_as::<_, ProjectRow>(
        "SELECT id, name, status, progress, budget, spent, manager FROM projects WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(ProjectError::NotFound(id))
}

/// Create a new project.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_project(pool: &PgPool, new: &NewProject) -> Result<ProjectRow, ProjectError> {
    let row = sqlx::query_as::<_, ProjectRow>(
        "INSERT INTO projects (name, status, budget, manager)
         VALUES ($1, COALESCE($2, 'planning'), COALESCE($3, 0), COALESCE($4, ''))
         RETURNING id, name, status, progress, budget, spent, manager",
    )
    .bind(&new.name)
    .bind(new.status.as_deref())
    .bind(new.budget)
    .bind(new.manager.as_deref())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update and return the fresh row.
///
/// # Errors
///
/// Returns `NotFound` if no such project exists.
pub async fn update_project(pool: &PgPool, id: Uuid, patch: &ProjectPatch) -> Result<ProjectRow, ProjectError> {
    let row = sqlx::query_as::<_, ProjectRow>(
        "UPDATE projects SET
             name = COALESCE($2, name),
             status = COALESCE($3, status),
             progress = COALESCE($4, progress),
             budget = COALESCE($5, budget),
             spent = COALESCE($6, spent),
             manager = COALESCE($7, manager),
             updated_at = now()
         WHERE id = $1
         RETURNING id, name, status, progress, budget, spent, manager",
    )
    .bind(id)
    .bind(patch.name.as_deref())
    .bind(patch.status.as_deref())
    .bind(patch.progress)
    .bind(patch.budget)
    .bind(patch.spent)
    .bind(patch.manager.as_deref())
    .fetch_optional(pool)
    .await?;
    row.ok_or(ProjectError::NotFound(id))
}

/// Delete a project.
///
/// # Errors
///
/// Returns `NotFound` if no rows were affected.
pub async fn delete_project(pool: &PgPool, id: Uuid) -> Result<(), ProjectError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(ProjectError::NotFound(id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
