//! Per-tick pointer input state.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Cursor, button and wheel state accumulated over one tick.
#[derive(Default, Debug, Clone)]
pub struct Input {
    /// Cursor position in window pixels.
    pub cursor_position: Vec2,
    /// Cursor movement accumulated this tick.
    pub cursor_delta: Vec2,
    /// Wheel scroll accumulated this tick.
    pub scroll_delta: Vec2,
    /// Window size in pixels.
    pub screen_size: Vec2,
    /// Currently held mouse buttons.
    pub buttons: HashSet<MouseButton>,

    has_cursor_sample: bool,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the per-tick deltas; call after consumers ran.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    pub fn handle_cursor_move(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        // The first reported position has no previous sample to diff against.
        if self.has_cursor_sample {
            self.cursor_delta += new_pos - self.cursor_position;
        }
        self.cursor_position = new_pos;
        self.has_cursor_sample = true;
    }

    pub fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) {
        match state {
            ElementState::Pressed => {
                self.buttons.insert(button);
            }
            ElementState::Released => {
                self.buttons.remove(&button);
            }
        }
    }

    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                self.scroll_delta += Vec2::new(x, y);
            }
            MouseScrollDelta::PixelDelta(pos) => {
                // Pixel deltas come in much larger magnitudes than lines.
                self.scroll_delta += Vec2::new(pos.x as f32, pos.y as f32) * 0.1;
            }
        }
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }
}
