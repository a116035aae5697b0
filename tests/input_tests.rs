use std::cell::Cell;

use clock_viewer::camera::Camera;
use clock_viewer::input::{Button, InputController, InputEvent};
use clock_viewer::traits::window::WindowContext;

/// Window stub tracking the current cursor capture state.
struct StubWindow {
    cursor_visible: Cell<bool>,
    cursor_grabbed: Cell<bool>,
}

impl StubWindow {
    fn new() -> Self {
        Self {
            cursor_visible: Cell::new(true),
            cursor_grabbed: Cell::new(false),
        }
    }
}

impl WindowContext for StubWindow {
    fn set_cursor_visible(&self, visible: bool) {
        self.cursor_visible.set(visible);
    }

    fn set_cursor_grabbed(&self, grabbed: bool) {
        self.cursor_grabbed.set(grabbed);
    }

    fn inner_size(&self) -> (u32, u32) {
        (640, 480)
    }

    fn request_redraw(&self) {}
}

fn button(button: Button, pressed: bool) -> InputEvent {
    InputEvent::Button { button, pressed }
}

fn motion(x: f32, y: f32) -> InputEvent {
    InputEvent::CursorMoved { x, y }
}

#[test]
fn drag_entry_captures_the_cursor_and_exit_releases_it() {
    let window = StubWindow::new();
    let mut camera = Camera::default();
    let mut input = InputController::new();

    input.handle_event(button(Button::MouseLeft, true), &window, &mut camera);
    assert!(input.rotation_drag_active());
    assert!(!window.cursor_visible.get());
    assert!(window.cursor_grabbed.get());

    input.handle_event(button(Button::MouseLeft, false), &window, &mut camera);
    assert!(!input.rotation_drag_active());
    assert!(window.cursor_visible.get());
    assert!(!window.cursor_grabbed.get());
}

#[test]
fn first_drag_sample_produces_zero_net_change() {
    let window = StubWindow::new();
    let mut camera = Camera::default();
    let mut input = InputController::new();
    let (yaw0, pitch0) = (camera.yaw(), camera.pitch());

    input.handle_event(button(Button::MouseLeft, true), &window, &mut camera);
    input.handle_event(motion(987.0, -654.0), &window, &mut camera);
    assert_eq!((camera.yaw(), camera.pitch()), (yaw0, pitch0));
}

#[test]
fn second_drag_sample_scales_with_sensitivity() {
    let window = StubWindow::new();
    let mut camera = Camera::default();
    camera.mouse_sensitivity = 0.25;
    let yaw0 = camera.yaw();
    let mut input = InputController::new();

    input.handle_event(button(Button::MouseLeft, true), &window, &mut camera);
    input.handle_event(motion(100.0, 100.0), &window, &mut camera);
    input.handle_event(motion(120.0, 92.0), &window, &mut camera);

    assert!((camera.yaw() - (yaw0 + 20.0 * 0.25)).abs() < 1e-4);
    assert!((camera.pitch() - 8.0 * 0.25).abs() < 1e-4);
}

#[test]
fn motion_while_idle_is_inert_regardless_of_magnitude() {
    let window = StubWindow::new();
    let mut camera = Camera::default();
    let mut input = InputController::new();
    let (yaw0, pitch0) = (camera.yaw(), camera.pitch());

    for i in 0..10 {
        input.handle_event(motion(i as f32 * 1.0e6, -1.0e6), &window, &mut camera);
    }
    assert_eq!((camera.yaw(), camera.pitch()), (yaw0, pitch0));
    assert_eq!(camera.position.length(), 0.0);
}

#[test]
fn stale_position_is_ignored_when_drag_restarts() {
    let window = StubWindow::new();
    let mut camera = Camera::default();
    let mut input = InputController::new();

    // First drag session ends at (200, 200).
    input.handle_event(button(Button::MouseLeft, true), &window, &mut camera);
    input.handle_event(motion(200.0, 200.0), &window, &mut camera);
    input.handle_event(button(Button::MouseLeft, false), &window, &mut camera);
    let yaw = camera.yaw();

    // Cursor moved far away while idle, then a new drag starts there.
    input.handle_event(motion(4000.0, 4000.0), &window, &mut camera);
    input.handle_event(button(Button::MouseLeft, true), &window, &mut camera);
    input.handle_event(motion(4000.0, 4000.0), &window, &mut camera);
    assert_eq!(camera.yaw(), yaw);
}

#[test]
fn scroll_zooms_in_any_mode() {
    let window = StubWindow::new();
    let mut camera = Camera::default();
    let mut input = InputController::new();

    input.handle_event(InputEvent::Scroll { delta: 5.0 }, &window, &mut camera);
    input.handle_event(button(Button::MouseLeft, true), &window, &mut camera);
    input.handle_event(InputEvent::Scroll { delta: 5.0 }, &window, &mut camera);
    assert_eq!(camera.zoom(), 35.0);
}

#[test]
fn held_movement_keys_are_level_triggered() {
    let window = StubWindow::new();
    let mut camera = Camera::default();
    camera.movement_speed = 1.0;
    let mut input = InputController::new();

    input.handle_event(button(Button::KeyW, true), &window, &mut camera);

    // Key stays down across many frames without new key events.
    for _ in 0..60 {
        input.apply_movement(&mut camera, 1.0 / 60.0);
    }
    assert!((camera.position.z - (-1.0)).abs() < 1e-3);
}

#[test]
fn quit_is_cooperative_and_sticky() {
    let window = StubWindow::new();
    let mut camera = Camera::default();
    let mut input = InputController::new();

    input.request_quit();
    assert!(input.quit_requested());

    // Further events do not clear the request.
    input.handle_event(button(Button::KeyW, true), &window, &mut camera);
    assert!(input.quit_requested());
}
