//! Business logic services.
//!
//! Routes stay thin; everything that touches Postgres or an external
//! service lives here.

pub mod dashboard;
pub mod finance;
pub mod material;
pub mod persistence;
pub mod project;
pub mod recognition;
pub mod session;
