//! Plan model: walls, detected rooms, background state, and the in-memory
//! plan store.
//!
//! This module defines the data types that describe what is on the canvas
//! (`Wall`, `Room`, `Background`), and the runtime store that owns all live
//! plan state (`PlanStore`). Data flows into this layer from the input
//! engine (wall mutations), from the template catalog (background swaps),
//! and from the recognition pipeline (rooms and measurements). The renderer
//! reads from `PlanStore` to build the display list.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{LABEL_OFFSET_PX, MIN_WALL_PX, PX_PER_METER};
use crate::template::Template;

/// Orientation of a wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallAxis {
    /// Extends along x; `position` is the fixed y coordinate.
    Horizontal,
    /// Extends along y; `position` is the fixed x coordinate.
    Vertical,
}

/// Which end of a wall a resize handle grips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEnd {
    Start,
    End,
}

/// A straight axis-aligned wall segment.
///
/// `start`/`end` are the extent along the moving axis; `position` is the
/// fixed-axis coordinate. `end > start` always holds — the constructor
/// normalises swapped endpoints and resize clamps to [`MIN_WALL_PX`].
/// Length is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub axis: WallAxis,
    pub position: f64,
    pub start: f64,
    pub end: f64,
}

impl Wall {
    /// Create a wall, normalising `start`/`end` so that `start < end`.
    #[must_use]
    pub fn new(axis: WallAxis, position: f64, a: f64, b: f64) -> Self {
        Self { axis, position, start: a.min(b), end: a.max(b) }
    }

    /// Extent along the moving axis, in pixels.
    #[must_use]
    pub fn length_px(&self) -> f64 {
        self.end - self.start
    }

    /// Display length in metres.
    #[must_use]
    pub fn length_m(&self) -> f64 {
        self.length_px() / PX_PER_METER
    }

    /// Label text: length in metres, two decimals.
    #[must_use]
    pub fn label_text(&self) -> String {
        format!("{:.2}m", self.length_m())
    }

    /// Both endpoints as world points.
    #[must_use]
    pub fn endpoints(&self) -> (Point, Point) {
        match self.axis {
            WallAxis::Horizontal => (
                Point::new(self.start, self.position),
                Point::new(self.end, self.position),
            ),
            WallAxis::Vertical => (
                Point::new(self.position, self.start),
                Point::new(self.position, self.end),
            ),
        }
    }

    /// One endpoint as a world point.
    #[must_use]
    pub fn endpoint(&self, end: WallEnd) -> Point {
        let (a, b) = self.endpoints();
        match end {
            WallEnd::Start => a,
            WallEnd::End => b,
        }
    }

    /// World-space anchor of the measurement label: centred above a
    /// horizontal wall, right of a vertical one. The offset shrinks as the
    /// camera zooms in so labels stay visually adjacent.
    #[must_use]
    pub fn label_anchor(&self, zoom: f64) -> Point {
        let mid = (self.start + self.end) / 2.0;
        match self.axis {
            WallAxis::Horizontal => Point::new(mid, self.position - LABEL_OFFSET_PX / zoom),
            WallAxis::Vertical => Point::new(self.position + LABEL_OFFSET_PX / zoom, mid),
        }
    }
}

/// A detected room. The payload is an opaque result object from the
/// recognition call; the store keeps and redraws it but defines no
/// invariants over its shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub data: serde_json::Value,
}

/// A measurement extracted from OCR, positioned in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// What sits behind the drawn walls. At most one background is active;
/// installing either kind clears the other's derived state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Background {
    #[default]
    None,
    /// An uploaded raster plan.
    Image { src: String, width: f64, height: f64 },
    /// A catalog template, referenced by id.
    Template { id: String },
}

/// In-memory store of everything on the plan canvas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanStore {
    walls: Vec<Wall>,
    rooms: Vec<Room>,
    measurements: Vec<Measurement>,
    background: Background,
}

impl PlanStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a wall and return its index.
    pub fn add_wall(&mut self, wall: Wall) -> usize {
        self.walls.push(wall);
        self.walls.len() - 1
    }

    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    #[must_use]
    pub fn wall(&self, index: usize) -> Option<&Wall> {
        self.walls.get(index)
    }

    #[must_use]
    pub fn wall_mut(&mut self, index: usize) -> Option<&mut Wall> {
        self.walls.get_mut(index)
    }

    /// Translate a wall along its fixed axis.
    pub fn move_wall(&mut self, index: usize, position: f64) -> bool {
        let Some(wall) = self.walls.get_mut(index) else {
            return false;
        };
        wall.position = position;
        true
    }

    /// Drag one endpoint to `value`, clamped so the wall never shrinks
    /// below [`MIN_WALL_PX`].
    pub fn resize_wall(&mut self, index: usize, end: WallEnd, value: f64) -> bool {
        let Some(wall) = self.walls.get_mut(index) else {
            return false;
        };
        match end {
            WallEnd::Start => wall.start = value.min(wall.end - MIN_WALL_PX),
            WallEnd::End => wall.end = value.max(wall.start + MIN_WALL_PX),
        }
        true
    }

    /// Set a wall to an exact metre length, keeping its midpoint fixed.
    /// Used by the measurement-label editor.
    pub fn set_wall_length(&mut self, index: usize, meters: f64) -> bool {
        let Some(wall) = self.walls.get_mut(index) else {
            return false;
        };
        if !(meters > 0.0) {
            return false;
        }
        let center = (wall.start + wall.end) / 2.0;
        let half = meters * PX_PER_METER / 2.0;
        wall.start = center - half;
        wall.end = center + half;
        true
    }

    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn set_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn set_measurements(&mut self, measurements: Vec<Measurement>) {
        self.measurements = measurements;
    }

    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Install an uploaded image as the background. Clears any template
    /// and its derived room state; drawn walls survive an upload.
    pub fn set_background_image(&mut self, src: impl Into<String>, width: f64, height: f64) {
        self.rooms.clear();
        self.background = Background::Image { src: src.into(), width, height };
    }

    /// Install a catalog template as the background. Clears all wall, room,
    /// and measurement state (idempotent reset) and returns the template's
    /// first room name as the active room.
    pub fn apply_template(&mut self, template: &Template) -> Option<String> {
        self.walls.clear();
        self.rooms.clear();
        self.measurements.clear();
        self.background = Background::Template { id: template.id.to_string() };
        template.rooms.first().map(|room| room.name.to_string())
    }

    /// Full-canvas clear: walls, rooms, measurements, and background.
    pub fn clear(&mut self) {
        self.walls.clear();
        self.rooms.clear();
        self.measurements.clear();
        self.background = Background::None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}
