//! Application shell and frame loop.
//!
//! [`App`] is a winit [`ApplicationHandler`]. Once the window exists it
//! asynchronously sets up the GPU context, loads the font and generates the
//! first [`World`]; on native targets this runs to completion on a tokio
//! runtime, on the web it is spawned and reported back as a user event.
//!
//! # Per frame
//!
//! 1. Request the next frame
//! 2. Advance the world (one recycling pass)
//! 3. Mirror the scene onto the GPU
//! 4. Draw and present
//!
//! A window resize reconfigures the surface and camera and, if the logical
//! viewport changed, rebuilds the world from scratch.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    config::{CityConfig, FONT_FILE},
    context::Context,
    data_structures::scene_graph::SceneGraph,
    font::{Font, PixelFont},
    layout::Viewport,
    render::Renderer,
    world::{World, layout_rng},
};

/// Everything that exists once initialisation has finished.
pub struct AppState {
    pub(crate) ctx: Context,
    config: CityConfig,
    scene: SceneGraph,
    renderer: Renderer,
    world: World,
    font: Option<PixelFont>,
    rng: ChaCha8Rng,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: CityConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, &config).await?;

        // Without a font the city is still drawn, just without text.
        let font = match PixelFont::load(FONT_FILE).await {
            Ok(font) => {
                log::info!("loaded {} glyphs from {}", font.glyph_count(), FONT_FILE);
                Some(font)
            }
            Err(e) => {
                log::warn!("no labels or glyph backdrop: {:#}", e);
                None
            }
        };

        let mut rng = layout_rng(config.seed);
        let mut scene = SceneGraph::new();
        let world = World::generate(
            viewport_of(&ctx),
            &config,
            &mut scene,
            font.as_ref().map(|font| font as &dyn Font),
            &mut rng,
        );

        Ok(Self {
            ctx,
            config,
            scene,
            renderer: Renderer::new(),
            world,
            font,
            rng,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if !self.ctx.resize(width, height) {
            return;
        }
        self.is_surface_configured = true;

        let viewport = viewport_of(&self.ctx);
        if viewport != self.world.viewport {
            self.world.rebuild(
                viewport,
                &self.config,
                &mut self.scene,
                self.font.as_ref().map(|font| font as &dyn Font),
                &mut self.rng,
            );
        }
    }

    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        self.world.advance(&mut self.scene, &self.config);
        self.renderer.sync(&self.ctx, &mut self.scene);
        self.renderer.draw(&self.ctx)
    }
}

fn viewport_of(ctx: &Context) -> Viewport {
    let size = ctx.logical_size();
    Viewport::new(size.width as f32, size.height as f32)
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Box<AppState>),
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: EventLoopProxy<FlowEvent>,
    config: CityConfig,
    state: Option<AppState>,
    initializing: bool,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, config: CityConfig) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy: event_loop.create_proxy(),
            config,
            state: None,
            initializing: false,
        })
    }

    fn install(&mut self, mut state: AppState) {
        let size = state.ctx.window.inner_size();
        state.resize(size.width, size.height);
        state.ctx.window.request_redraw();
        self.state = Some(state);
    }
}

/// Appends the window's canvas to the mount element.
#[cfg(target_arch = "wasm32")]
fn mount_canvas(window: &Window) -> anyhow::Result<()> {
    use winit::platform::web::WindowExtWebSys;

    let canvas = window
        .canvas()
        .ok_or_else(|| anyhow::anyhow!("window has no canvas"))?;
    let mount = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(crate::config::MOUNT_ID))
        .ok_or_else(|| anyhow::anyhow!("no element with id {}", crate::config::MOUNT_ID))?;
    mount
        .append_child(&canvas)
        .map_err(|_| anyhow::anyhow!("cannot append the canvas"))?;
    Ok(())
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.initializing {
            return;
        }
        self.initializing = true;

        let window = match event_loop.create_window(Window::default_attributes().with_title("after dark")) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("cannot create the window: {}", e);
                event_loop.exit();
                return;
            }
        };

        #[cfg(target_arch = "wasm32")]
        if let Err(e) = mount_canvas(&window) {
            log::error!("{:#}", e);
            return;
        }

        let init_future = AppState::new(window, self.config.clone());

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok(state) => self.install(state),
                Err(e) => {
                    log::error!("App initialization failed: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok(state) => {
                        if proxy.send_event(FlowEvent::Initialized(Box::new(state))).is_err() {
                            log::error!("event loop closed before initialization finished");
                        }
                    }
                    Err(e) => log::error!("App initialization failed: {:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            // This is the message from the wasm `spawn_local`
            FlowEvent::Initialized(state) => self.install(*state),
        }
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
            WindowEvent::RedrawRequested => match state.frame() {
                Ok(()) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }
    }
}

/// Runs the skyline with the default configuration.
pub fn run() -> anyhow::Result<()> {
    run_with(CityConfig::default())
}

pub fn run_with(config: CityConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| anyhow::anyhow!("cannot initialize the console logger: {}", e))?;
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
