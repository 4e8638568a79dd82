//! Application event loop and demo entry point.
//!
//! The winit event loop drives the viewer: window creation and all
//! one-time GPU/asset setup happen in `resumed`, each `RedrawRequested`
//! renders one frame and requests the next. Setup failure of any kind is
//! a startup precondition violation and terminates the process with a
//! descriptive panic; there is no recovery or degraded mode.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{context::Context, renderer::FrameRenderer, resources::occlusion::AoBakeParams};

/// Asset file names (relative to `assets/`) and bake parameters for the
/// viewer. The defaults reproduce the farmhouse demo scene.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub model: String,
    pub texture: String,
    pub shader: String,
    pub ao: AoBakeParams,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model: "farmhouse.obj".to_string(),
            texture: "farmhouse.png".to_string(),
            shader: "shader.wgsl".to_string(),
            ao: AoBakeParams::default(),
        }
    }
}

/// Application state bundle: GPU context and the frame renderer.
struct AppState {
    ctx: Context,
    renderer: FrameRenderer,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &ViewerConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let renderer = FrameRenderer::new(&ctx, config).await?;
        Ok(Self {
            ctx,
            renderer,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.is_surface_configured = true;
            self.ctx.resize(width, height);
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: ViewerConfig,
    state: Option<AppState>,
}

impl App {
    fn new(config: ViewerConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attributes = Window::default_attributes().with_title("stillframe");
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => panic!("Viewer initialization failed. Cannot create a window: {e}"),
        };

        let state = self
            .async_runtime
            .block_on(AppState::new(window, &self.config));
        let state = match state {
            Ok(state) => state,
            Err(e) => panic!("Viewer initialization failed: {e:#}"),
        };

        state.ctx.window.request_redraw();
        self.state = Some(state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                state.ctx.window.request_redraw();

                // Rendering requires the surface to be configured.
                if !state.is_surface_configured {
                    return;
                }

                match state.renderer.render(&state.ctx) {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated.
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("unable to render: {e}");
                    }
                }
            }
            _ => {}
        }
    }
}

/// Run the viewer until the window is closed.
pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {e}");
    }

    let event_loop: EventLoop<()> = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
