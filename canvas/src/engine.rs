//! Editor engine: mediates pointer input into wall operations and maintains
//! the view transform.
//!
//! DESIGN
//! ======
//! `EngineCore` is pure and synchronous. Event handlers mutate local state
//! and return `Action`s for the host shell to process; failures are local
//! and side-effect-free (worst case: no wall is created, or a pan occurs
//! instead of an edit), so there is no error reporting path.
//!
//! Pointer-down resolves the gesture by priority-ordered hit-testing
//! (handle → label → body → pan); pointer-move updates the active gesture;
//! pointer-up commits a drawn line as a wall iff the drag distance beats
//! the threshold, and always returns to `Idle`.

use crate::camera::{Camera, Point};
use crate::consts::{DRAG_THRESHOLD_PX, ZOOM_STEP_IN, ZOOM_STEP_OUT};
use crate::hit::{self, Hit};
use crate::input::{InputState, UiState};
use crate::plan::{PlanStore, Wall, WallAxis};
use crate::template;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// A drawn line was promoted to a wall on release.
    WallAdded { index: usize, wall: Wall },
    /// A wall was moved, resized, or re-lengthed.
    WallUpdated { index: usize, wall: Wall },
    /// The selection changed (possibly to nothing).
    SelectionChanged { index: Option<usize> },
    /// The user clicked a measurement label; the host should open an
    /// editor pre-filled with the current length string.
    LabelEditRequested { index: usize, length: String },
    /// A catalog template was applied; wall state was reset.
    TemplateApplied { id: String, active_room: Option<String> },
    /// The canvas was fully cleared.
    Cleared,
    /// Visible state changed; the host should redraw.
    RenderNeeded,
}

/// Core editor state: plan, camera, UI flags, and the active gesture.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub plan: PlanStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self { ui: UiState { show_measurements: true, ..UiState::default() }, ..Self::default() }
    }

    // --- Viewport ---

    /// Update viewport dimensions. The rotation pivot follows the center.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.camera.center_x = width / 2.0;
        self.camera.center_y = height / 2.0;
    }

    // --- Pointer events ---

    pub fn pointer_down(&mut self, screen: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen);

        if self.ui.draw_mode {
            self.input = InputState::DrawingLine { start: world, current: world };
            return vec![Action::RenderNeeded];
        }

        match hit::hit_test(world, &self.plan, &self.camera, self.ui.show_measurements) {
            Some(Hit::Handle { index, end }) => {
                self.ui.selected = Some(index);
                self.input = InputState::DraggingResizeHandle { index, end };
                vec![Action::SelectionChanged { index: Some(index) }, Action::RenderNeeded]
            }
            Some(Hit::Label { index }) => {
                self.ui.selected = Some(index);
                let length = self
                    .plan
                    .wall(index)
                    .map(|w| format!("{:.2}", w.length_m()))
                    .unwrap_or_default();
                vec![Action::LabelEditRequested { index, length }]
            }
            Some(Hit::Body { index }) => {
                self.ui.selected = Some(index);
                self.input = InputState::DraggingWallBody { index };
                vec![Action::SelectionChanged { index: Some(index) }, Action::RenderNeeded]
            }
            None => {
                // Miss: deselect and fall through to panning.
                self.ui.selected = None;
                self.input = InputState::Panning { last_screen: screen };
                vec![Action::SelectionChanged { index: None }, Action::RenderNeeded]
            }
        }
    }

    pub fn pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.input {
            InputState::DrawingLine { start, .. } => {
                let world = self.camera.screen_to_world(screen);
                self.input = InputState::DrawingLine { start, current: world };
                vec![Action::RenderNeeded]
            }
            InputState::DraggingResizeHandle { index, end } => {
                let world = self.camera.screen_to_world(screen);
                let Some(wall) = self.plan.wall(index) else {
                    return Vec::new();
                };
                let value = match wall.axis {
                    WallAxis::Horizontal => world.x,
                    WallAxis::Vertical => world.y,
                };
                if !self.plan.resize_wall(index, end, value) {
                    return Vec::new();
                }
                self.wall_updated(index)
            }
            InputState::DraggingWallBody { index } => {
                let world = self.camera.screen_to_world(screen);
                let Some(wall) = self.plan.wall(index) else {
                    return Vec::new();
                };
                let position = match wall.axis {
                    WallAxis::Horizontal => world.y,
                    WallAxis::Vertical => world.x,
                };
                if !self.plan.move_wall(index, position) {
                    return Vec::new();
                }
                self.wall_updated(index)
            }
            InputState::Panning { last_screen } => {
                self.camera.pan_x += screen.x - last_screen.x;
                self.camera.pan_y += screen.y - last_screen.y;
                self.input = InputState::Panning { last_screen: screen };
                vec![Action::RenderNeeded]
            }
            InputState::Idle => Vec::new(),
        }
    }

    pub fn pointer_up(&mut self, screen: Point) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let InputState::DrawingLine { start, .. } = state else {
            return vec![Action::RenderNeeded];
        };

        let current = self.camera.screen_to_world(screen);
        let dx = (current.x - start.x).abs();
        let dy = (current.y - start.y).abs();

        // Promote iff the drag beats the threshold on either axis;
        // otherwise the line is discarded as an accidental click.
        if dx <= DRAG_THRESHOLD_PX && dy <= DRAG_THRESHOLD_PX {
            return vec![Action::RenderNeeded];
        }

        let wall = if dx > dy {
            Wall::new(WallAxis::Horizontal, start.y, start.x, current.x)
        } else {
            Wall::new(WallAxis::Vertical, start.x, start.y, current.y)
        };
        let index = self.plan.add_wall(wall);
        vec![Action::WallAdded { index, wall }, Action::RenderNeeded]
    }

    // --- Wheel / joystick ---

    /// Wheel zoom: positive delta (scroll down) zooms out. Clamping happens
    /// in the camera.
    pub fn wheel(&mut self, delta_y: f64) -> Vec<Action> {
        let factor = if delta_y > 0.0 { ZOOM_STEP_OUT } else { ZOOM_STEP_IN };
        self.camera.zoom_by(factor);
        vec![Action::RenderNeeded]
    }

    /// Joystick rotation, in degrees.
    pub fn set_rotation(&mut self, degrees: f64) -> Vec<Action> {
        self.camera.rotation_deg = degrees;
        vec![Action::RenderNeeded]
    }

    // --- Mode flags ---

    pub fn set_draw_mode(&mut self, enabled: bool) {
        self.ui.draw_mode = enabled;
    }

    pub fn toggle_measurements(&mut self) -> Vec<Action> {
        self.ui.show_measurements = !self.ui.show_measurements;
        vec![Action::RenderNeeded]
    }

    pub fn set_active_room(&mut self, name: impl Into<String>) {
        self.ui.active_room = Some(name.into());
    }

    // --- Plan operations ---

    /// Apply a catalog template. Always resets drawing state; an unknown id
    /// clears the canvas without installing a background.
    pub fn select_template(&mut self, id: &str) -> Vec<Action> {
        self.ui.draw_mode = false;
        self.input = InputState::Idle;
        self.ui.selected = None;

        let Some(found) = template::find(id) else {
            self.plan.clear();
            self.ui.active_room = None;
            return vec![Action::RenderNeeded];
        };

        let active_room = self.plan.apply_template(found);
        self.ui.active_room = active_room.clone();
        vec![
            Action::TemplateApplied { id: id.to_string(), active_room },
            Action::RenderNeeded,
        ]
    }

    /// Install an uploaded image as the plan background.
    pub fn set_background_image(
        &mut self,
        src: impl Into<String>,
        width: f64,
        height: f64,
    ) -> Vec<Action> {
        self.ui.active_room = None;
        self.plan.set_background_image(src, width, height);
        vec![Action::RenderNeeded]
    }

    /// Commit an edited length (metres) from the label editor.
    pub fn edit_wall_length(&mut self, index: usize, meters: f64) -> Vec<Action> {
        if !self.plan.set_wall_length(index, meters) {
            return Vec::new();
        }
        self.wall_updated(index)
    }

    /// Full-canvas clear.
    pub fn clear(&mut self) -> Vec<Action> {
        self.plan.clear();
        self.ui.selected = None;
        self.ui.active_room = None;
        self.input = InputState::Idle;
        vec![Action::Cleared, Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.ui.selected
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    fn wall_updated(&self, index: usize) -> Vec<Action> {
        match self.plan.wall(index) {
            Some(wall) => vec![Action::WallUpdated { index, wall: *wall }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }
}
