//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Lower zoom clamp.
pub const ZOOM_MIN: f64 = 0.1;

/// Upper zoom clamp.
pub const ZOOM_MAX: f64 = 2.0;

/// Wheel step applied when scrolling in.
pub const ZOOM_STEP_IN: f64 = 1.1;

/// Wheel step applied when scrolling out.
pub const ZOOM_STEP_OUT: f64 = 0.9;

// ── Walls ───────────────────────────────────────────────────────

/// Minimum drag distance on either axis before a released line is
/// promoted to a wall. Filters out accidental clicks.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Minimum wall extent enforced by resize handles.
pub const MIN_WALL_PX: f64 = 20.0;

/// Display scale: one metre of wall is this many canvas pixels.
pub const PX_PER_METER: f64 = 100.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Radius around a wall endpoint that counts as a resize-handle hit.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

/// Perpendicular distance band that counts as a wall-body hit.
pub const WALL_HIT_BAND_PX: f64 = 10.0;

/// Measurement labels sit this far off the wall line.
pub const LABEL_OFFSET_PX: f64 = 15.0;

/// Vertical half-extent of a label's hit box.
pub const LABEL_HALF_HEIGHT_PX: f64 = 10.0;

/// Horizontal slop added to each side of a label's text width.
pub const LABEL_SLOP_PX: f64 = 5.0;

/// Approximate advance width per label character at the base font size.
pub const LABEL_CHAR_WIDTH_PX: f64 = 6.0;

// ── Rendering ───────────────────────────────────────────────────

/// Background grid spacing in canvas pixels.
pub const GRID_SPACING_PX: f64 = 20.0;

// ── Recognition ─────────────────────────────────────────────────

/// Uploaded images are scaled to this fraction of the viewport.
pub const FIT_MARGIN: f64 = 0.8;

/// Adaptive threshold window (square, odd).
pub const THRESHOLD_WINDOW: u32 = 11;

/// Adaptive threshold offset subtracted from the local mean.
pub const THRESHOLD_OFFSET: i16 = 2;

/// Canny hysteresis thresholds.
pub const CANNY_LOW: f32 = 30.0;
pub const CANNY_HIGH: f32 = 150.0;

/// Per-channel intensity difference that marks an edge in the
/// fallback detector.
pub const FALLBACK_EDGE_THRESHOLD: u8 = 30;
