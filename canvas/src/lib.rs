//! Floor-plan canvas editor core for Sitedesk.
//!
//! This crate owns the full editing lifecycle of a floor plan: translating
//! pointer input into wall create/move/resize operations, maintaining camera
//! state for pan/zoom/rotation, hit-testing walls and their handles,
//! building the retained display list for rendering, and running the
//! smart-recognition pipeline over uploaded raster plans. The host shell is
//! responsible only for wiring input events to the engine and acting on the
//! returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level editor engine ([`engine::EngineCore`]) |
//! | [`plan`] | Wall/room model and the in-memory plan store |
//! | [`camera`] | Pan/zoom/rotation camera and coordinate conversions |
//! | [`input`] | Gesture state machine and UI flags |
//! | [`hit`] | Priority-ordered hit-testing against walls |
//! | [`render`] | Retained display-list builder |
//! | [`template`] | Static room-template catalog |
//! | [`recognition`] | Edge-detection pipeline and OCR measurement extraction |
//! | [`consts`] | Shared numeric constants (zoom limits, thresholds, etc.) |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod plan;
pub mod recognition;
pub mod render;
pub mod template;
