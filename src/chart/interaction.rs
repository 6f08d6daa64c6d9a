//! Drag-to-rotate state machine.
//!
//! Horizontal pointer travel is mapped through a linear scale whose domain is
//! `[-width, width]` and range `[-180, 180]`, and accumulated onto the
//! previous angle.

use crate::scale::{LinearScale, Scale};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    phase: DragPhase,
    previous_x: f64,
    previous_angle: f64,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Accumulated rotation in degrees
    pub fn angle(&self) -> f64 {
        self.previous_angle
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.phase = DragPhase::Dragging;
        self.previous_x = x;
    }

    /// Returns the new angle while dragging, `None` when idle.
    pub fn pointer_move(&mut self, x: f64, surface_width: f64) -> Option<f64> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        let scale = LinearScale::new((-surface_width, surface_width), (-180.0, 180.0));
        let angle = self.previous_angle + scale.map(x - self.previous_x);
        self.previous_x = x;
        self.previous_angle = angle;
        Some(angle)
    }

    pub fn pointer_up(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Rotate by a fixed amount without a pointer (keyboard)
    pub fn nudge(&mut self, degrees: f64) -> f64 {
        self.previous_angle += degrees;
        self.previous_angle
    }
}
