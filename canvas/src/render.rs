//! Rendering: builds a retained display list from plan and camera state.
//!
//! DESIGN
//! ======
//! Every visual element flows through one description: `build` reads the
//! plan, camera, UI flags, and active gesture, and produces an ordered
//! `DisplayList` of primitives in world coordinates plus the camera
//! transform to apply before painting. The host paints the list with
//! whatever 2D backend it has; nothing here mutates application state.
//!
//! Layer order (bottom first): background, grid, walls, provisional line,
//! measurement labels, OCR measurements, selection handles.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::consts::{GRID_SPACING_PX, HANDLE_RADIUS_PX};
use crate::engine::EngineCore;
use crate::input::InputState;
use crate::plan::{Background, Wall, WallEnd};

/// Stroke/fill colours, as CSS colour strings.
const WALL_COLOR: &str = "#374151";
const WALL_SELECTED_COLOR: &str = "#2563eb";
const PROVISIONAL_COLOR: &str = "#9ca3af";
const LABEL_COLOR: &str = "#1f2937";
const HANDLE_FILL: &str = "#ffffff";
const GRID_COLOR: &str = "#e5e7eb";
const WALL_WIDTH_PX: f64 = 6.0;
const PROVISIONAL_WIDTH_PX: f64 = 2.0;

/// The camera transform the host applies before painting world-space
/// primitives: rotate about the viewport center, then pan, then scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub rotation_deg: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl From<Camera> for ViewTransform {
    fn from(camera: Camera) -> Self {
        Self {
            pan_x: camera.pan_x,
            pan_y: camera.pan_y,
            zoom: camera.zoom,
            rotation_deg: camera.rotation_deg,
            center_x: camera.center_x,
            center_y: camera.center_y,
        }
    }
}

/// One drawable primitive, in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Background raster image, drawn before everything else.
    Image { src: String, width: f64, height: f64 },
    /// Template placeholder fill, identified by catalog id.
    TemplateFill { id: String, color: String },
    Line {
        from: Point,
        to: Point,
        color: String,
        width: f64,
        dashed: bool,
    },
    /// A filled+stroked square handle, centred on `at`. `size` is the full
    /// edge length in world units.
    Handle { at: Point, size: f64, fill: String, stroke: String },
    Text {
        at: Point,
        text: String,
        color: String,
        /// Font size in world units (already divided by zoom).
        size: f64,
    },
}

/// An ordered frame description. Paint `items` in order under `transform`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub transform: ViewTransform,
    pub items: Vec<Primitive>,
}

impl DisplayList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build the display list for the engine's current state.
#[must_use]
pub fn build(engine: &EngineCore) -> DisplayList {
    let zoom = engine.camera.zoom;
    let mut items = Vec::new();

    push_background(&mut items, engine);
    push_grid(&mut items, engine);

    for (index, wall) in engine.plan.walls().iter().enumerate() {
        push_wall(&mut items, wall, engine.ui.selected == Some(index));
    }

    if let InputState::DrawingLine { start, current } = engine.input {
        items.push(Primitive::Line {
            from: start,
            to: current,
            color: PROVISIONAL_COLOR.to_string(),
            width: PROVISIONAL_WIDTH_PX / zoom,
            dashed: true,
        });
    }

    if engine.ui.show_measurements {
        for wall in engine.plan.walls() {
            items.push(Primitive::Text {
                at: wall.label_anchor(zoom),
                text: wall.label_text(),
                color: LABEL_COLOR.to_string(),
                size: 12.0 / zoom,
            });
        }
        for m in engine.plan.measurements() {
            items.push(Primitive::Text {
                at: Point::new(m.x, m.y),
                text: m.text.clone(),
                color: LABEL_COLOR.to_string(),
                size: 12.0 / zoom,
            });
        }
    }

    // Selection handles last so they sit above every wall.
    if let Some(selected) = engine.ui.selected {
        if let Some(wall) = engine.plan.wall(selected) {
            for end in [WallEnd::Start, WallEnd::End] {
                items.push(Primitive::Handle {
                    at: wall.endpoint(end),
                    size: HANDLE_RADIUS_PX * 2.0 * zoom,
                    fill: HANDLE_FILL.to_string(),
                    stroke: WALL_SELECTED_COLOR.to_string(),
                });
            }
        }
    }

    DisplayList { transform: engine.camera.into(), items }
}

// =============================================================
// Layer builders
// =============================================================

fn push_background(items: &mut Vec<Primitive>, engine: &EngineCore) {
    match engine.plan.background() {
        Background::None => {}
        Background::Image { src, width, height } => {
            items.push(Primitive::Image { src: src.clone(), width: *width, height: *height });
        }
        Background::Template { id } => {
            let color = crate::template::find(id).map_or("ffffff", |t| t.color);
            items.push(Primitive::TemplateFill { id: id.clone(), color: format!("#{color}") });
        }
    }
}

/// Grid lines covering the viewport. Spacing is fixed in world units, so
/// the grid zooms with the plan.
fn push_grid(items: &mut Vec<Primitive>, engine: &EngineCore) {
    let (w, h) = (engine.viewport_width, engine.viewport_height);
    if w <= 0.0 || h <= 0.0 {
        return;
    }

    // Axis-aligned world bounds of the (possibly rotated) viewport.
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
    ];
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for corner in corners {
        let world = engine.camera.screen_to_world(corner);
        min.x = min.x.min(world.x);
        min.y = min.y.min(world.y);
        max.x = max.x.max(world.x);
        max.y = max.y.max(world.y);
    }

    let color = GRID_COLOR.to_string();
    let width = 1.0 / engine.camera.zoom;

    let mut x = (min.x / GRID_SPACING_PX).floor() * GRID_SPACING_PX;
    while x <= max.x {
        items.push(Primitive::Line {
            from: Point::new(x, min.y),
            to: Point::new(x, max.y),
            color: color.clone(),
            width,
            dashed: false,
        });
        x += GRID_SPACING_PX;
    }
    let mut y = (min.y / GRID_SPACING_PX).floor() * GRID_SPACING_PX;
    while y <= max.y {
        items.push(Primitive::Line {
            from: Point::new(min.x, y),
            to: Point::new(max.x, y),
            color: color.clone(),
            width,
            dashed: false,
        });
        y += GRID_SPACING_PX;
    }
}

fn push_wall(items: &mut Vec<Primitive>, wall: &Wall, selected: bool) {
    let (from, to) = wall.endpoints();
    let color = if selected { WALL_SELECTED_COLOR } else { WALL_COLOR };
    items.push(Primitive::Line {
        from,
        to,
        color: color.to_string(),
        width: WALL_WIDTH_PX,
        dashed: false,
    });
}
