//! Persistence service — background flush for dirty floor plans.
//!
//! DESIGN
//! ======
//! Editing mutates plans in memory only; a background task snapshots dirty
//! plans, upserts them to Postgres, then sleeps before the next cycle. The
//! editor never blocks on database I/O. A flushed plan is dropped from the
//! in-memory map, so the map only holds plans with unflushed edits and
//! stays bounded; loads fall back to the saved row.
//!
//! ERROR HANDLING
//! ==============
//! A plan leaves memory only after a successful write, and only when the
//! flushed version is still current. Repeated upserts are acceptable, silent
//! loss of edits is not.

use std::time::Duration;

use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::state::AppState;

const DEFAULT_PLAN_FLUSH_INTERVAL_MS: u64 = 500;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Spawn the background persistence task. Returns a handle for shutdown.
pub fn spawn_persistence_task(state: AppState) -> JoinHandle<()> {
    let flush_interval_ms = env_parse("PLAN_FLUSH_INTERVAL_MS", DEFAULT_PLAN_FLUSH_INTERVAL_MS);
    info!(flush_interval_ms, "floor plan persistence flush configured");
    tokio::spawn(async move {
        loop {
            flush_all_dirty(&state).await;
            tokio::time::sleep(Duration::from_millis(flush_interval_ms)).await;
        }
    })
}

#[derive(Debug)]
struct DirtyPlanSnapshot {
    plan_id: Uuid,
    owner_id: Uuid,
    name: String,
    plan_json: serde_json::Value,
    version: i64,
}

async fn flush_all_dirty(state: &AppState) {
    // PHASE: SNAPSHOT DIRTY PLANS
    // WHY: collect serialized clones under lock, then perform I/O lock-free.
    let snapshots = {
        let plans = state.plans.read().await;
        let mut collected = Vec::new();
        for (plan_id, plan_state) in plans.iter() {
            if !plan_state.dirty {
                continue;
            }
            let Ok(plan_json) = serde_json::to_value(&plan_state.plan) else {
                error!(%plan_id, "plan failed to serialize; skipping flush");
                continue;
            };
            collected.push(DirtyPlanSnapshot {
                plan_id: *plan_id,
                owner_id: plan_state.owner_id,
                name: plan_state.name.clone(),
                plan_json,
                version: plan_state.version,
            });
        }
        collected
    };

    // PHASE: FLUSH + RETIRE
    // WHY: on failure the dirty flag stays set and the next cycle retries.
    for snapshot in snapshots {
        match upsert_plan(&state.pool, &snapshot).await {
            Ok(()) => retire_flushed_plan(state, snapshot.plan_id, snapshot.version).await,
            Err(e) => {
                error!(error = %e, plan_id = %snapshot.plan_id, "plan flush failed");
            }
        }
    }
}

#[cfg(test)]
pub(crate) async fn flush_all_dirty_for_tests(state: &AppState) {
    flush_all_dirty(state).await;
}

#[cfg(test)]
pub(crate) async fn retire_flushed_plan_for_tests(
    state: &AppState,
    plan_id: Uuid,
    flushed_version: i64,
) {
    retire_flushed_plan(state, plan_id, flushed_version).await;
}

/// Drop a successfully flushed plan from memory. The saved row is now
/// authoritative and loads fall back to it.
async fn retire_flushed_plan(state: &AppState, plan_id: Uuid, flushed_version: i64) {
    let mut plans = state.plans.write().await;
    let Some(plan_state) = plans.get(&plan_id) else {
        return;
    };
    // EDGE: keep the entry dirty if the plan was edited again after snapshot.
    if plan_state.version == flushed_version {
        plans.remove(&plan_id);
    }
}

async fn upsert_plan(pool: &PgPool, snapshot: &DirtyPlanSnapshot) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO floor_plans (id, owner_id, name, plan, version, updated_at)
         VALUES ($1, $2, $3, $4, $5, now())
         ON CONFLICT (id) DO UPDATE SET
             name = EXCLUDED.name,
             plan = EXCLUDED.plan,
             version = EXCLUDED.version,
             updated_at = now()",
    )
    .bind(snapshot.plan_id)
    .bind(snapshot.owner_id)
    .bind(&snapshot.name)
    .bind(&snapshot.plan_json)
    .bind(snapshot.version)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load a saved plan row: `(owner_id, name, plan, version)`.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn load_plan(
    pool: &PgPool,
    plan_id: Uuid,
) -> Result<Option<(Uuid, String, serde_json::Value, i64)>, sqlx::Error> {
    sqlx::query_as("SELECT owner_id, name, plan, version FROM floor_plans WHERE id = $1")
        .bind(plan_id)
        .fetch_optional(pool)
        .await
}

/// List saved plans for one owner: `(id, name)`, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_plans(pool: &PgPool, owner_id: Uuid) -> Result<Vec<(Uuid, String)>, sqlx::Error> {
    sqlx::query_as("SELECT id, name FROM floor_plans WHERE owner_id = $1 ORDER BY updated_at DESC")
        .bind(owner_id)
        .fetch_all(pool)
        .await
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
