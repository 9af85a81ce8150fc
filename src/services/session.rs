//! Session management.
//!
//! ARCHITECTURE
//! ============
//! HTTP auth uses long-lived cookie sessions. Only a SHA-256 digest of the
//! token is stored; a leaked `sessions` table cannot be replayed as cookies.
//! Passwords are stored as SHA-256 digests and compared by digest.

use std::fmt::Write;

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::roles::Role;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// SHA-256 digest of a token or password, as lowercase hex.
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    bytes_to_hex(&digest)
}

/// User row returned from session validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Parsed role.
    pub role: Role,
}

/// Verify username/password and return the user on success.
///
/// # Errors
///
/// Returns a database error if the lookup fails. A wrong password or an
/// unparseable stored role both yield `Ok(None)`.
pub async fn authenticate(pool: &PgPool, username: &str, password: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query("SELECT id, username, name, role, password_sha256 FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let stored: String = row.get("password_sha256");
    if stored != sha256_hex(password) {
        return Ok(None);
    }
    let Some(role) = Role::parse(&row.get::<String, _>("role")) else {
        return Ok(None);
    };
    Ok(Some(SessionUser { id: row.get("id"), username: row.get("username"), name: row.get("name"), role }))
}

/// Create a session for the given user, returning the raw token for the cookie.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token_sha256, user_id) VALUES ($1, $2)")
        .bind(sha256_hex(&token))
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a raw session token and return the associated user.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.username, u.name, u.role
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token_sha256 = $1 AND s.expires_at > now()",
    )
    .bind(sha256_hex(token))
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    // EDGE: a row with an unknown role string is treated as no session.
    let Some(role) = Role::parse(&row.get::<String, _>("role")) else {
        return Ok(None);
    };
    Ok(Some(SessionUser { id: row.get("id"), username: row.get("username"), name: row.get("name"), role }))
}

/// Delete a session by raw token.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token_sha256 = $1")
        .bind(sha256_hex(token))
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
