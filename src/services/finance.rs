//! Finance service — income/expense records and spend forecasting.
//!
//! DESIGN
//! ======
//! Records aggregate into monthly totals in SQL; forecasting runs over the
//! aggregated series in memory. The three forecast models are deterministic
//! simulations over the same history, so the endpoint is reproducible and
//! unit-testable without any model runtime.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Months of history the forecast models look back over.
const FORECAST_WINDOW: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Record direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Row returned from finance queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FinanceRecord {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub kind: String,
    pub category: String,
    pub amount: f64,
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct NewRecord {
    pub kind: RecordKind,
    pub amount: f64,
    #[serde(default)]
    pub project_id: Option<Uuid>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// One month of aggregated income and expense.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MonthlyTotal {
    /// `YYYY-MM`, ascending.
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

/// One model's next-month projection.
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub model: &'static str,
    pub predicted_expense: f64,
    pub predicted_income: f64,
}

/// List records, newest first, optionally scoped to one project.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_records(pool: &PgPool, project_id: Option<Uuid>) -> Result<Vec<FinanceRecord>, FinanceError> {
    let rows = sqlx::query_as::<_, FinanceRecord>(
        "SELECT id, project_id, kind, category, amount, note
         FROM finance_records
         WHERE $1::uuid IS NULL OR project_id = $1
         ORDER BY recorded_at DESC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a record.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_record(pool: &PgPool, new: &NewRecord) -> Result<FinanceRecord, FinanceError> {
    let row = sqlx::query_as::<_, FinanceRecord>(
        "INSERT INTO finance_records (project_id, kind, category, amount, note)
         VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, ''))
         RETURNING id, project_id, kind, category, amount, note",
    )
    .bind(new.project_id)
    .bind(new.kind.as_str())
    .bind(new.category.as_deref())
    .bind(new.amount)
    .bind(new.note.as_deref())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Aggregate records into per-month totals, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn monthly_totals(pool: &PgPool) -> Result<Vec<MonthlyTotal>, FinanceError> {
    let rows = sqlx::query_as::<_, MonthlyTotal>(
        "SELECT to_char(recorded_at, 'YYYY-MM') AS month,
                COALESCE(SUM(amount) FILTER (WHERE kind = 'income'), 0) AS income,
                COALESCE(SUM(amount) FILTER (WHERE kind = 'expense'), 0) AS expense
         FROM finance_records
         GROUP BY month
         ORDER BY month ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

// =============================================================================
// FORECAST MODELS
// =============================================================================

/// Run all forecast models over a monthly history.
///
/// An empty history yields an empty forecast rather than zeros, so the
/// dashboard can distinguish "no data" from "flat projection".
#[must_use]
pub fn forecast(history: &[MonthlyTotal]) -> Vec<Projection> {
    if history.is_empty() {
        return Vec::new();
    }
    vec![
        Projection {
            model: "nearest-months",
            predicted_expense: window_mean(history, |m| m.expense),
            predicted_income: window_mean(history, |m| m.income),
        },
        Projection {
            model: "trend-split",
            predicted_expense: trend_next(history, |m| m.expense),
            predicted_income: trend_next(history, |m| m.income),
        },
        Projection {
            model: "recency-weighted",
            predicted_expense: weighted_mean(history, |m| m.expense),
            predicted_income: weighted_mean(history, |m| m.income),
        },
    ]
}

/// Mean of the last `FORECAST_WINDOW` months.
fn window_mean(history: &[MonthlyTotal], field: impl Fn(&MonthlyTotal) -> f64) -> f64 {
    let window = &history[history.len().saturating_sub(FORECAST_WINDOW)..];
    let sum: f64 = window.iter().map(&field).sum();
    sum / window.len() as f64
}

/// Extrapolate the last month by the last month-over-month delta.
/// Clamped at zero; spend cannot project negative.
fn trend_next(history: &[MonthlyTotal], field: impl Fn(&MonthlyTotal) -> f64) -> f64 {
    let last = field(&history[history.len() - 1]);
    if history.len() < 2 {
        return last;
    }
    let prev = field(&history[history.len() - 2]);
    (last + (last - prev)).max(0.0)
}

/// Linearly recency-weighted mean over the full history.
fn weighted_mean(history: &[MonthlyTotal], field: impl Fn(&MonthlyTotal) -> f64) -> f64 {
    let mut weight_sum = 0.0;
    let mut total = 0.0;
    for (i, month) in history.iter().enumerate() {
        let weight = (i + 1) as f64;
        weight_sum += weight;
        total += weight * field(month);
    }
    total / weight_sum
}

#[cfg(test)]
#[path = "finance_test.rs"]
mod tests;
