//! Dashboard service — aggregated snapshot with a sample-data fallback.
//!
//! DESIGN
//! ======
//! The dashboard always renders. If any aggregate query fails (cold start,
//! missing schema, unreachable database) the caller gets a canned sample
//! snapshot instead of an error page, with `"sample": true` set so the UI
//! can badge it.

use serde_json::{Value, json};
use sqlx::{PgPool, Row};
use tracing::warn;

use crate::services::finance;

/// Build the aggregated dashboard snapshot, falling back to sample data on
/// any query error.
pub async fn snapshot(pool: &PgPool) -> Value {
    match live_snapshot(pool).await {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "dashboard aggregate failed; serving sample data");
            sample_snapshot()
        }
    }
}

async fn live_snapshot(pool: &PgPool) -> Result<Value, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'in-progress') AS active,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COALESCE(AVG(progress), 0)::float8 AS avg_progress,
                COALESCE(SUM(budget), 0)::float8 AS total_budget,
                COALESCE(SUM(spent), 0)::float8 AS total_spent
         FROM projects",
    )
    .fetch_one(pool)
    .await?;

    let low_stock: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM materials WHERE status IN ('low-stock', 'out-of-stock')",
    )
    .fetch_one(pool)
    .await?;

    let months = finance::monthly_totals(pool).await.map_err(|e| match e {
        finance::FinanceError::Database(e) => e,
    })?;
    let projections = finance::forecast(&months);

    Ok(json!({
        "sample": false,
        "projects": {
            "total": row.get::<i64, _>("total"),
            "active": row.get::<i64, _>("active"),
            "completed": row.get::<i64, _>("completed"),
            "avg_progress": row.get::<f64, _>("avg_progress"),
            "total_budget": row.get::<f64, _>("total_budget"),
            "total_spent": row.get::<f64, _>("total_spent"),
        },
        "materials": { "attention": low_stock },
        "finance": { "months": months, "projections": projections },
    }))
}

/// Canned snapshot shown when aggregates are unavailable.
#[must_use]
pub fn sample_snapshot() -> Value {
    json!({
        "sample": true,
        "projects": {
            "total": 4,
            "active": 2,
            "completed": 1,
            "avg_progress": 46.5,
            "total_budget": 1_850_000.0,
            "total_spent": 740_000.0,
        },
        "materials": { "attention": 3 },
        "finance": {
            "months": [
                { "month": "2026-06", "income": 220_000.0, "expense": 180_000.0 },
                { "month": "2026-07", "income": 260_000.0, "expense": 205_000.0 },
                { "month": "2026-08", "income": 240_000.0, "expense": 190_000.0 },
            ],
            "projections": [],
        },
    })
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
