//! Input model: UI flags and the pointer-gesture state machine.
//!
//! `UiState` carries the persistent flags the renderer needs (draw mode,
//! selection, measurement visibility, active room). `InputState` is the
//! active gesture tracked between pointer-down and pointer-up, carrying the
//! context needed to apply incremental updates and commit or discard on
//! release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::plan::WallEnd;

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Pointer drags draw new walls instead of selecting.
    pub draw_mode: bool,
    /// Index of the currently selected wall, if any.
    pub selected: Option<usize>,
    /// Whether measurement labels are rendered and hit-testable.
    pub show_measurements: bool,
    /// Active room name from the current template, if one is applied.
    pub active_room: Option<String>,
}

/// The gesture state machine.
///
/// Transitions are resolved on pointer-down by priority-ordered hit-testing;
/// pointer-move updates the active variant's context; pointer-up always
/// returns to `Idle`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Draw mode: a provisional line from `start` to `current`, promoted to
    /// a wall on release iff the drag distance beats the threshold.
    DrawingLine { start: Point, current: Point },
    /// Moving a wall along its fixed axis.
    DraggingWallBody { index: usize },
    /// Dragging one resize handle of a wall.
    DraggingResizeHandle { index: usize, end: WallEnd },
    /// Dragging empty canvas; moves the camera pan offset.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
}
