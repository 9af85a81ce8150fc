//! Hit-testing against walls, handles, and measurement labels.
//!
//! Pointer-down is resolved in a fixed priority order, mutually exclusive
//! per event: resize handle → measurement label → wall body → none. Only
//! one interpretation wins; a miss falls through silently to panning.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{
    HANDLE_RADIUS_PX, LABEL_CHAR_WIDTH_PX, LABEL_HALF_HEIGHT_PX, LABEL_SLOP_PX, WALL_HIT_BAND_PX,
};
use crate::plan::{PlanStore, Wall, WallAxis, WallEnd};

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A resize handle at one end of a wall.
    Handle { index: usize, end: WallEnd },
    /// A measurement label's text box.
    Label { index: usize },
    /// The body of a wall segment.
    Body { index: usize },
}

/// Test what is under `world_pt`, walls scanned topmost-first.
///
/// Labels participate only when measurements are shown. The handle radius
/// scales with zoom so handles keep a constant screen size.
#[must_use]
pub fn hit_test(
    world_pt: Point,
    plan: &PlanStore,
    camera: &Camera,
    show_measurements: bool,
) -> Option<Hit> {
    if let Some(hit) = hit_handle(world_pt, plan, camera) {
        return Some(hit);
    }
    if show_measurements {
        if let Some(hit) = hit_label(world_pt, plan, camera) {
            return Some(hit);
        }
    }
    hit_body(world_pt, plan)
}

fn hit_handle(pt: Point, plan: &PlanStore, camera: &Camera) -> Option<Hit> {
    let radius = HANDLE_RADIUS_PX * camera.zoom;
    for (index, wall) in plan.walls().iter().enumerate().rev() {
        for end in [WallEnd::Start, WallEnd::End] {
            let at = wall.endpoint(end);
            if (pt.x - at.x).abs() < radius && (pt.y - at.y).abs() < radius {
                return Some(Hit::Handle { index, end });
            }
        }
    }
    None
}

fn hit_label(pt: Point, plan: &PlanStore, camera: &Camera) -> Option<Hit> {
    for (index, wall) in plan.walls().iter().enumerate().rev() {
        let anchor = wall.label_anchor(camera.zoom);
        let half_width = label_half_width(wall, camera.zoom);
        if (pt.x - anchor.x).abs() < half_width && (pt.y - anchor.y).abs() < LABEL_HALF_HEIGHT_PX {
            return Some(Hit::Label { index });
        }
    }
    None
}

fn hit_body(pt: Point, plan: &PlanStore) -> Option<Hit> {
    for (index, wall) in plan.walls().iter().enumerate().rev() {
        let (along, perp) = match wall.axis {
            WallAxis::Horizontal => (pt.x, pt.y),
            WallAxis::Vertical => (pt.y, pt.x),
        };
        if (perp - wall.position).abs() < WALL_HIT_BAND_PX
            && along >= wall.start
            && along <= wall.end
        {
            return Some(Hit::Body { index });
        }
    }
    None
}

/// Approximate half-width of the rendered label text. The label font scales
/// inversely with zoom, so the box does too.
fn label_half_width(wall: &Wall, zoom: f64) -> f64 {
    let chars = wall.label_text().chars().count();
    #[allow(clippy::cast_precision_loss)]
    let text_width = chars as f64 * LABEL_CHAR_WIDTH_PX / zoom;
    text_width / 2.0 + LABEL_SLOP_PX
}
