mod cube;
mod input;
mod renderer;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use cube::CubeMesh;
use input::{InputController, KeyAction};
use renderer::camera::Camera;
use renderer::frame::FrameUniforms;
use renderer::texture::TextureImage;
use renderer::Renderer;

/// Exit code for any failure before the first frame.
const SETUP_FAILURE: i32 = -1;

#[derive(Parser, Debug)]
#[command(name = "cubeview")]
#[command(about = "Textured rotating cube with an orbit camera")]
struct Args {
    /// Image file wrapped onto each cube face
    #[arg(long, default_value = "assets/textures/wall.png")]
    texture: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,
}

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    mesh: CubeMesh,
    texture: TextureImage,
    size: PhysicalSize<u32>,
    camera: Camera,
    input: InputController,
    start: Instant,
    /// Set when window or GPU setup fails inside the event loop
    setup_error: Option<anyhow::Error>,
}

impl App {
    fn new(mesh: CubeMesh, texture: TextureImage, size: PhysicalSize<u32>) -> Self {
        Self {
            window: None,
            renderer: None,
            mesh,
            texture,
            size,
            camera: Camera::new(),
            input: InputController::new(),
            start: Instant::now(),
            setup_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Texture Cube")
            .with_inner_size(self.size)
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to open window. Check your drivers' graphics support")?,
        );

        let renderer =
            pollster::block_on(Renderer::new(window.clone(), &self.mesh, &self.texture))?;

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn handle_action(&mut self, action: KeyAction, event_loop: &ActiveEventLoop) {
        match action {
            KeyAction::ResetCamera => {
                self.camera.reset();
                log::debug!("Camera reset");
            }
            KeyAction::ToggleWireframe => {
                if let Some(ref mut renderer) = self.renderer {
                    let mode = renderer.toggle_wireframe();
                    log::debug!("Render mode: {:?}", mode);
                }
            }
            KeyAction::Exit => event_loop.exit(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.input.update_camera(&mut self.camera);

        let Some(ref mut renderer) = self.renderer else {
            return;
        };

        let elapsed = self.start.elapsed().as_secs_f64();
        let uniforms = FrameUniforms::compose(&self.camera, elapsed, renderer.aspect());

        match renderer.render(&uniforms) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.setup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if let Some(action) = self.input.handle_keyboard(code, state, repeat) {
                    self.handle_action(action, event_loop);
                }
            }
            WindowEvent::Focused(false) => {
                self.input.keyboard.clear();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(ref window) = self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn run(args: Args) -> Result<()> {
    let texture = TextureImage::load(&args.texture)?;
    log::info!(
        "Loaded texture {}: {}x{}",
        args.texture.display(),
        texture.width(),
        texture.height()
    );

    let mesh = CubeMesh::new();

    let event_loop = EventLoop::new().context("Failed to initialize windowing system")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let size = PhysicalSize::new(args.width.max(1), args.height.max(1));
    let mut app = App::new(mesh, texture, size);

    event_loop.run_app(&mut app)?;

    match app.setup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("error: {err:#}");
        std::process::exit(SETUP_FAILURE);
    }
}
