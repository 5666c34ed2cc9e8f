//! Application shell: window, event loop, and the playback glue.
//!
//! The redraw handler is the single-threaded heart of the viewer. Each tick
//! it drains loader completions into the scene, lets the session issue the
//! next frame request, updates the orbit camera, and renders. That
//! order, every tick, whether or not playback is live.

pub mod input;

use std::sync::Arc;
use std::time::Instant;

use glam::{Vec3, Vec4};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use self::input::Input;
use crate::assets::{AssetReader, MeshLoader};
use crate::config::ViewerConfig;
use crate::errors::Result;
use crate::playback::{MeshSlot, PlaybackSession, SwapDecision};
use crate::render::Renderer;
use crate::scene::{Camera, Light, Scene, Transform};
use crate::utils::{FpsCounter, OrbitControls};

const WINDOW_TITLE: &str = "objbook";
const CAMERA_START: Vec3 = Vec3::new(0.0, 5.0, 15.0);

pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Scene,
    camera: Camera,
    camera_transform: Transform,
    controls: OrbitControls,
    input: Input,

    session: PlaybackSession,
    loader: MeshLoader,
    slot: MeshSlot,

    initial_set: Option<String>,
    fps: FpsCounter,
    last_tick: Instant,
}

impl App {
    /// Builds the viewer around `config`. Playback of `initial_set` (or the
    /// first configured set) starts as soon as the window is up.
    pub fn new(config: ViewerConfig, initial_set: Option<String>) -> Result<Self> {
        config.validate()?;
        let reader = AssetReader::from_source(&config.base_path)?;
        let loader = MeshLoader::new(reader)?;

        let mut scene = Scene::new();
        scene.background = Vec4::new(0.87, 0.87, 0.87, 1.0);
        scene.add_light(Light::new_ambient(Vec3::ONE, 0.5));
        scene.add_light(Light::new_directional(
            Vec3::ONE,
            1.0,
            Vec3::new(5.0, 10.0, 7.5),
        ));

        let camera = Camera::new_perspective(75.0, 16.0 / 9.0, 0.1, 1000.0);
        let camera_transform = Transform::from_position(CAMERA_START);
        let controls = OrbitControls::looking_from(CAMERA_START, Vec3::ZERO);

        let initial_set = initial_set.or_else(|| config.sets.first().map(|s| s.id.clone()));
        let session = PlaybackSession::new(config);

        Ok(Self {
            window: None,
            renderer: None,
            scene,
            camera,
            camera_transform,
            controls,
            input: Input::new(),
            session,
            loader,
            slot: MeshSlot::new(),
            initial_set,
            fps: FpsCounter::new(),
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop until the window closes.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn start_playback(&mut self, set_id: &str) {
        if let Some(start) = self.session.start_playback(set_id) {
            self.slot.clear(&mut self.scene);
            self.loader.spawn_frame(start.frame);
            self.loader.spawn_metadata(start.metadata);
            self.refresh_title();
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_tick).as_secs_f32();
        self.last_tick = now;

        // Finished loads first, so a completion and this tick's request
        // cannot race within the same tick.
        let mesh_results: Vec<_> = self.loader.drain_meshes().collect();
        for result in mesh_results {
            if self.session.handle_mesh_result(&result) == SwapDecision::Apply
                && let Ok(geometry) = result.result
            {
                let policy = self.session.config().normalize;
                self.slot.swap(&mut self.scene, geometry, policy);
            }
        }

        let metadata_results: Vec<_> = self.loader.drain_metadata().collect();
        let metadata_arrived = !metadata_results.is_empty();
        for result in metadata_results {
            self.session.handle_metadata_result(&result);
        }
        if metadata_arrived {
            if let Some(text) = self.session.metadata_text() {
                log::info!("set description: {text}");
            }
            self.refresh_title();
        }

        if let Some(request) = self.session.tick() {
            self.loader.spawn_frame(request);
        }

        self.controls
            .update(&mut self.camera_transform, &self.input, self.camera.fov, dt);
        self.camera_transform.update_matrix();
        self.camera.update_view(self.camera_transform.matrix());

        self.input.end_frame();
        self.scene.update();

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&self.scene, &self.camera);
        }

        if let Some(fps) = self.fps.update() {
            log::debug!("{fps:.1} fps");
        }
    }

    fn refresh_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let mut title = WINDOW_TITLE.to_string();
        if let Some(set) = &self.session.state().current_set {
            title.push_str(" \u{2014} set ");
            title.push_str(set);
        }
        if let Some(text) = self.session.metadata_text()
            && let Some(line) = text.lines().next()
        {
            title.push_str(" \u{2014} ");
            title.push_str(line);
        }
        window.set_title(&title);
    }

    fn handle_key(&mut self, code: KeyCode) {
        let index = match code {
            KeyCode::Digit1 => 0,
            KeyCode::Digit2 => 1,
            KeyCode::Digit3 => 2,
            KeyCode::Digit4 => 3,
            KeyCode::Digit5 => 4,
            KeyCode::Digit6 => 5,
            KeyCode::Digit7 => 6,
            KeyCode::Digit8 => 7,
            KeyCode::Digit9 => 8,
            _ => return,
        };
        let Some(set_id) = self
            .session
            .config()
            .sets
            .get(index)
            .map(|s| s.id.clone())
        else {
            return;
        };
        self.start_playback(&set_id);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("initializing renderer backend");
        match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => {
                let size = window.inner_size();
                self.input.handle_resize(size.width, size.height);
                if size.height > 0 {
                    self.camera.aspect = size.width as f32 / size.height as f32;
                    self.camera.update_projection_matrix();
                }
                self.renderer = Some(renderer);
            }
            Err(e) => {
                log::error!("fatal renderer error: {e}");
                event_loop.exit();
                return;
            }
        }

        if let Some(set_id) = self.initial_set.take() {
            self.start_playback(&set_id);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(physical_size.width, physical_size.height);
                }
                self.input
                    .handle_resize(physical_size.width, physical_size.height);
                if physical_size.height > 0 {
                    self.camera.aspect = physical_size.width as f32 / physical_size.height as f32;
                    self.camera.update_projection_matrix();
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(code);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.handle_cursor_move(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.handle_mouse_input(state, button);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.handle_mouse_wheel(delta);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
