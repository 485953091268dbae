//////////////////////////////////////////////////
// Module

pub mod app;
pub mod config;
pub mod error;
pub mod opengl;
pub mod renderer;
pub mod square;
pub mod surface;

#[cfg(test)]
mod test_gl;

//////////////////////////////////////////////////
// OpenGL binding

pub mod gl {
    #![allow(clippy::all)]
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

//////////////////////////////////////////////////
// Prelude

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, SquareError};
    pub use crate::gl;
    pub use crate::gl::types::*;
    pub use crate::opengl::Gl;
    pub use crate::renderer::SquareRenderer;
    pub use crate::square::Square;
    pub use crate::surface::{SurfaceDriver, SurfaceState};
    pub use crate::{Game, SurfaceRenderer};
    #[cfg(target_os = "android")]
    pub use winit::platform::android::activity::AndroidApp;
}

//////////////////////////////////////////////////
// Using

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};

#[cfg(target_os = "android")]
use winit::platform::android::activity::AndroidApp;
#[cfg(target_os = "android")]
use winit::platform::android::EventLoopBuilderExtAndroid;

use crate::app::App;
use crate::config::Config;
use crate::error::{Result, SquareError};
use crate::opengl::Gl;
#[cfg(target_os = "android")]
use crate::renderer::SquareRenderer;
use crate::surface::SurfaceDriver;

//////////////////////////////////////////////////
// Definition

/// Callbacks a renderer receives over the lifetime of a GL surface.
///
/// `surface_created` is always followed by at least one `surface_changed`
/// with a non-zero size before the first `draw_frame`; [`SurfaceDriver`]
/// enforces this. On Android the surface can be destroyed
/// and created again any number of times while the renderer lives on.
pub trait SurfaceRenderer {
    fn surface_created(&mut self, gl: &Gl);

    fn surface_changed(&mut self, gl: &Gl, width: u32, height: u32);

    fn draw_frame(&mut self, gl: &Gl);

    fn surface_destroyed(&mut self, _gl: &Gl) {}
}

/// Continuous render loop driving a [`SurfaceRenderer`].
pub struct Game<R: SurfaceRenderer> {
    app: Option<App>,
    surface: SurfaceDriver<R>,
    config: Config,
    #[cfg(target_os = "android")]
    android_app: AndroidApp,
    exit_state: Result<()>,
}

//////////////////////////////////////////////////
// Implementation

#[cfg(target_os = "android")]
impl<R: SurfaceRenderer> Game<R> {
    pub fn new(android_app: AndroidApp, config: Config, renderer: R) -> Self {
        Self {
            app: None,
            surface: SurfaceDriver::new(renderer),
            config,
            android_app,
            exit_state: Ok(()),
        }
    }

    pub fn with_logging(self) -> Self {
        android_logger::init_once(android_logger::Config::default().with_max_level(self.config.log_level));
        self
    }

    fn event_loop(&self) -> Result<EventLoop<()>> {
        Ok(EventLoop::builder().with_android_app(self.android_app.clone()).build()?)
    }
}

#[cfg(not(target_os = "android"))]
impl<R: SurfaceRenderer> Game<R> {
    pub fn new(config: Config, renderer: R) -> Self {
        Self {
            app: None,
            surface: SurfaceDriver::new(renderer),
            config,
            exit_state: Ok(()),
        }
    }

    pub fn with_logging(self) -> Self {
        // RUST_LOG still wins over the configured level
        env_logger::builder().filter_level(self.config.log_level).parse_default_env().init();
        self
    }

    fn event_loop(&self) -> Result<EventLoop<()>> {
        Ok(EventLoop::builder().build()?)
    }
}

impl<R: SurfaceRenderer> Game<R> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        self.surface.renderer()
    }

    /// Runs until the window is closed or the surface can't be recreated.
    pub fn run(mut self) -> Result<()> {
        log::info!("Initializing application...");

        let event_loop = self.event_loop()?;
        self.app = Some(App::new(&self.config));

        log::info!("Running render loop...");
        event_loop.run_app(&mut self)?;

        log::info!("Rendered {} frames", self.surface.frames());
        self.exit_state
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SquareError) {
        log::error!("{}", err);
        self.exit_state = Err(err);
        event_loop.exit();
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        if let Some(app) = self.app.as_mut() {
            let size = app.resume(event_loop)?;
            let gl = app.renderer().ok_or(SquareError::MissingContext)?;
            self.surface.create(gl, size.width, size.height);
        }
        Ok(())
    }

    fn destroy_surface(&mut self) -> Result<()> {
        if let Some(app) = self.app.as_mut() {
            if let Some(gl) = app.renderer() {
                self.surface.destroy(gl);
            }
            app.suspend()?;
        }
        Ok(())
    }
}

impl<R: SurfaceRenderer> ApplicationHandler for Game<R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Resuming render loop ...");

        if let Err(err) = self.create_surface(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Suspending render loop ...");

        if let Err(err) = self.destroy_surface() {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: winit::window::WindowId, event: WindowEvent) {
        match event {
            WindowEvent::RedrawRequested => {
                if let Some(app) = self.app.as_mut() {
                    if app.has_surface_and_context() {
                        let drawn = match app.renderer() {
                            Some(gl) => self.surface.draw(gl),
                            None => false,
                        };
                        // an unsized surface waits for `Resized` to restart the loop
                        if drawn {
                            if let Err(err) = app.swap_buffers() {
                                self.fail(event_loop, err);
                            }
                        }
                    }
                }
            }
            WindowEvent::Resized(size) if size.width != 0 && size.height != 0 => {
                if let Some(app) = self.app.as_mut() {
                    if app.has_surface_and_context() {
                        app.resize(size);
                        if let Some(gl) = app.renderer() {
                            self.surface.change(gl, size.width, size.height);
                        }
                        app.request_redraw();
                    }
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Exiting application...");

        if let Err(err) = self.destroy_surface() {
            log::error!("{}", err);
        }

        if let Some(app) = self.app.as_mut() {
            app.exit();
        }
        self.app = None;
    }
}

//////////////////////////////////////////////////
// Android entry

#[cfg(target_os = "android")]
#[no_mangle]
fn android_main(android_app: AndroidApp) {
    let config = Config::default();
    let renderer = SquareRenderer::new(&config);

    if let Err(err) = Game::new(android_app, config, renderer).with_logging().run() {
        log::error!("Render loop stopped: {}", err);
    }
}
