#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom/rotation on the plan canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels. `zoom` is a uniform scale factor,
/// clamped to `[ZOOM_MIN, ZOOM_MAX]` by every mutation path. `rotation_deg`
/// is driven by the virtual joystick and applied around the viewport center
/// (`center_x`, `center_y`); it affects rendering and coordinate conversion
/// only, never wall geometry.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub rotation_deg: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
            rotation_deg: 0.0,
            center_x: 0.0,
            center_y: 0.0,
        }
    }
}

impl Camera {
    /// Set zoom, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Multiply zoom by `factor`, clamped to the allowed range.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    ///
    /// Inverse of the redraw transform: un-pan, un-zoom, then un-rotate
    /// around the viewport center.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        let unscaled = Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        };
        self.rotate_about_center(unscaled, -self.rotation_deg)
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    ///
    /// Matches the redraw pass: rotate around the viewport center, then
    /// scale and pan, in that fixed order.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        let rotated = self.rotate_about_center(world, self.rotation_deg);
        Point {
            x: rotated.x * self.zoom + self.pan_x,
            y: rotated.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    fn rotate_about_center(&self, p: Point, degrees: f64) -> Point {
        if degrees == 0.0 {
            return p;
        }
        let theta = degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        let dx = p.x - self.center_x;
        let dy = p.y - self.center_y;
        Point {
            x: self.center_x + dx * cos - dy * sin,
            y: self.center_y + dx * sin + dy * cos,
        }
    }
}
