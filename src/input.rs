use std::collections::HashSet;

use crate::camera::{Camera, MoveDirection};
use crate::traits::window::WindowContext;

/// Input button identifier, decoupled from the windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    Escape,
    MouseLeft,
}

/// Platform-agnostic input event. The windowing adapter translates raw
/// window events into these before handing them to [`InputController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Button { button: Button, pressed: bool },
    CursorMoved { x: f32, y: f32 },
    Scroll { delta: f32 },
}

/// Input state machine with two modes: idle and rotation drag.
///
/// Pointer motion only reaches the camera while the primary button is
/// held. The first motion sample after entering drag mode seeds the
/// last-known cursor position and is otherwise discarded, so stale
/// coordinates never produce a spurious jump. Held movement keys are
/// level-triggered: `apply_movement` replays them every frame with the
/// frame's delta time.
#[derive(Debug)]
pub struct InputController {
    pressed: HashSet<Button>,
    rotating: bool,
    first_sample: bool,
    last_x: f32,
    last_y: f32,
    quit_requested: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            rotating: false,
            first_sample: true,
            last_x: 0.0,
            last_y: 0.0,
            quit_requested: false,
        }
    }

    pub fn rotation_drag_active(&self) -> bool {
        self.rotating
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Request cooperative loop termination; checked once per iteration.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Dispatch one input event against the camera and window.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        window: &dyn WindowContext,
        camera: &mut Camera,
    ) {
        match event {
            InputEvent::Button { button, pressed } => {
                self.handle_button(button, pressed, window);
            }
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y, camera),
            InputEvent::Scroll { delta } => camera.process_scroll(delta),
        }
    }

    /// Apply held movement keys to the camera for this frame.
    pub fn apply_movement(&self, camera: &mut Camera, delta_time: f32) {
        for (button, direction) in [
            (Button::KeyW, MoveDirection::Forward),
            (Button::KeyS, MoveDirection::Backward),
            (Button::KeyA, MoveDirection::Left),
            (Button::KeyD, MoveDirection::Right),
        ] {
            if self.pressed.contains(&button) {
                camera.process_movement(direction, delta_time);
            }
        }
    }

    fn handle_button(&mut self, button: Button, pressed: bool, window: &dyn WindowContext) {
        match button {
            Button::MouseLeft => {
                if pressed && !self.rotating {
                    self.rotating = true;
                    self.first_sample = true;
                    window.set_cursor_grabbed(true);
                    window.set_cursor_visible(false);
                } else if !pressed && self.rotating {
                    self.rotating = false;
                    window.set_cursor_grabbed(false);
                    window.set_cursor_visible(true);
                }
            }
            Button::Escape => {
                if pressed {
                    self.quit_requested = true;
                }
            }
            _ => {
                if pressed {
                    self.pressed.insert(button);
                } else {
                    self.pressed.remove(&button);
                }
            }
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32, camera: &mut Camera) {
        if !self.rotating {
            return;
        }

        if self.first_sample {
            self.last_x = x;
            self.last_y = y;
            self.first_sample = false;
            return;
        }

        let dx = x - self.last_x;
        // Inverted so that moving the pointer up tilts the view up.
        let dy = self.last_y - y;
        self.last_x = x;
        self.last_y = y;

        camera.process_mouse_delta(dx, dy);
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}
