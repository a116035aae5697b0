use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glam::Vec3;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use clock_viewer::camera::Camera;
use clock_viewer::cli::Cli;
use clock_viewer::clock;
use clock_viewer::config::ViewerConfig;
use clock_viewer::frame::{FpsCounter, FrameClock};
use clock_viewer::input::{Button, InputController, InputEvent};
use clock_viewer::loaders;
use clock_viewer::renderer::SceneRenderer;
use clock_viewer::scene::{MeshHandle, SceneOrchestrator};
use clock_viewer::traits::renderer::DrawBackend;
use clock_viewer::traits::window::WindowContext;
use clock_viewer::window::ViewerWindow;

const FPS_LOG_INTERVAL: f32 = 1.0;

/// Application state: the render loop owns the camera, input controller,
/// and frame clock, and passes them by reference into the per-frame
/// phases. Nothing else retains a mutable alias across frames.
struct App {
    config: ViewerConfig,
    camera: Camera,
    input: InputController,
    frame_clock: FrameClock,
    fps: FpsCounter,
    window: Option<ViewerWindow>,
    renderer: Option<SceneRenderer>,
    scene: Option<SceneOrchestrator>,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        let mut camera = Camera::new(Vec3::from_array(config.camera_position));
        camera.movement_speed = config.movement_speed;
        camera.mouse_sensitivity = config.mouse_sensitivity;

        let mut frame_clock = FrameClock::new();
        frame_clock.set_target_fps(config.target_fps);

        Self {
            config,
            camera,
            input: InputController::new(),
            frame_clock,
            fps: FpsCounter::new(FPS_LOG_INTERVAL),
            window: None,
            renderer: None,
            scene: None,
            fatal: None,
        }
    }

    fn take_fatal(&mut self) -> Option<anyhow::Error> {
        self.fatal.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("clock-viewer")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window_width,
                        self.config.window_height,
                    )),
            )
            .context("failed to create window")?;
        let window = ViewerWindow::new(Arc::new(window));

        let mut meshes = vec![
            loaders::load_mesh(&self.config.body_model)?,
            loaders::load_mesh(&self.config.hour_hand_model)?,
            loaders::load_mesh(&self.config.minute_hand_model)?,
        ];
        let cover = match &self.config.cover_model {
            Some(path) => {
                meshes.push(loaders::load_mesh(path)?);
                Some(MeshHandle(3))
            }
            None => None,
        };

        let renderer =
            SceneRenderer::new(window.inner().clone(), &meshes, self.config.clear_color)
                .map_err(|e| anyhow!("failed to initialize renderer: {e}"))?;

        // Set once at startup; never updated per frame.
        window.set_title(&format!(
            "clock-viewer v{} | {}",
            env!("CARGO_PKG_VERSION"),
            renderer.adapter_summary()
        ));

        self.scene = Some(SceneOrchestrator::new(
            MeshHandle(0),
            MeshHandle(1),
            MeshHandle(2),
            cover,
        ));
        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    fn aspect(&self) -> f32 {
        match &self.window {
            Some(window) => {
                let (width, height) = window.inner_size();
                width as f32 / height.max(1) as f32
            }
            None => 1.0,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        // Cooperative quit check, once per iteration, before new work.
        if self.input.quit_requested() {
            event_loop.exit();
            return;
        }

        let delta = self.frame_clock.tick();
        self.input.apply_movement(&mut self.camera, delta);

        let angles = clock::local_hand_angles();
        let aspect = self.aspect();
        if let (Some(scene), Some(renderer)) = (&self.scene, &mut self.renderer) {
            let frame = scene.compose(&self.camera, angles, aspect);
            scene.render_frame(renderer, &frame);
        }

        if let Some(fps) = self.fps.tick(delta) {
            info!("fps: {fps:.1}");
        }
    }

    fn forward_event(&mut self, event: InputEvent) {
        if let Some(window) = &self.window {
            self.input.handle_event(event, window, &mut self.camera);
        }
    }
}

fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
    match keycode {
        KeyCode::KeyW => Some(Button::KeyW),
        KeyCode::KeyA => Some(Button::KeyA),
        KeyCode::KeyS => Some(Button::KeyS),
        KeyCode::KeyD => Some(Button::KeyD),
        KeyCode::Escape => Some(Button::Escape),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.initialize(event_loop) {
                error!("initialization failed: {err:#}");
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.input.request_quit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = keycode_to_button(keycode) {
                        self.forward_event(InputEvent::Button {
                            button,
                            pressed: event.state.is_pressed(),
                        });
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.forward_event(InputEvent::Button {
                    button: Button::MouseLeft,
                    pressed: state == ElementState::Pressed,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.forward_event(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 40.0,
                };
                self.forward_event(InputEvent::Scroll { delta });
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::resolve(&cli)?;

    info!("clock-viewer: WASD to move, drag to look, scroll to zoom, Escape to quit");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("event loop error")?;

    if let Some(err) = app.take_fatal() {
        return Err(err);
    }
    Ok(())
}
