//! Material service — stock CRUD and status derivation.
//!
//! Status is derived from quantity on every write so a stock level and its
//! label can never disagree.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Quantity at or below which a material counts as low stock.
pub const LOW_STOCK_THRESHOLD: f64 = 10.0;

#[derive(Debug, thiserror::Error)]
pub enum MaterialError {
    #[error("material not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from material queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MaterialRow {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct NewMaterial {
    pub name: String,
    #[serde(default)]
    pub project_id: Option<Uuid>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub unit_cost: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub unit_cost: Option<f64>,
    pub project_id: Option<Uuid>,
}

/// Derive the stored status label from a quantity.
#[must_use]
pub fn status_for_quantity(quantity: f64) -> &'static str {
    if quantity <= 0.0 {
        "out-of-stock"
    } else if quantity <= LOW_STOCK_THRESHOLD {
        "low-stock"
    } else {
        "in-stock"
    }
}

/// List materials, optionally scoped to one project.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_materials(pool: &PgPool, project_id: Option<Uuid>) -> Result<Vec<MaterialRow>, MaterialError> {
    let rows = sqlx::query_as::<_, MaterialRow>(
        "SELECT id, project_id, name, category, quantity, unit, unit_cost, status
         FROM materials
         WHERE $1::uuid IS NULL OR project_id = $1
         ORDER BY name ASC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a material row with a derived status.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_material(pool: &PgPool, new: &NewMaterial) -> Result<MaterialRow, MaterialError> {
    let quantity = new.quantity.unwrap_or(0.0);
    let row = sqlx::query_as::<_, MaterialRow>(
        "INSERT INTO materials (project_id, name, category, quantity, unit, unit_cost, status)
         VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, ''), COALESCE($6, 0), $7)
         RETURNING id, project_id, name, category, quantity, unit, unit_cost, status",
    )
    .bind(new.project_id)
    .bind(&new.name)
    .bind(new.category.as_deref())
    .bind(quantity)
    .bind(new.unit.as_deref())
    .bind(new.unit_cost)
    .bind(status_for_quantity(quantity))
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update; status is re-derived when quantity changes.
///
/// # Errors
///
/// Returns `NotFound` if no such material exists.
pub async fn update_material(pool: &PgPool, id: Uuid, patch: &MaterialPatch) -> Result<MaterialRow, MaterialError> {
    let status = patch.quantity.map(status_for_quantity);
    let row = sqlx::query_as::<_, MaterialRow>(
        "UPDATE materials SET
             name = COALESCE($2, name),
             category = COALESCE($3, category),
             quantity = COALESCE($4, quantity),
             unit = COALESCE($5, unit),
             unit_cost = COALESCE($6, unit_cost),
             project_id = COALESCE($7, project_id),
             status = COALESCE($8, status),
             updated_at = now()
         WHERE id = $1
         RETURNING id, project_id, name, category, quantity, unit, unit_cost, status",
    )
    .bind(id)
    .bind(patch.name.as_deref())
    .bind(patch.category.as_deref())
    .bind(patch.quantity)
    .bind(patch.unit.as_deref())
    .bind(patch.unit_cost)
    .bind(patch.project_id)
    .bind(status)
    .fetch_optional(pool)
    .await?;
    row.ok_or(MaterialError::NotFound(id))
}

/// Delete a material.
///
/// # Errors
///
/// Returns `NotFound` if no rows were affected.
pub async fn delete_material(pool: &PgPool, id: Uuid) -> Result<(), MaterialError> {
    let result = sqlx::query("DELETE FROM materials WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(MaterialError::NotFound(id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "material_test.rs"]
mod tests;
