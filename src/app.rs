//////////////////////////////////////////////////
// Using

use std::ffi::CString;
use std::num::NonZeroU32;
use std::rc::Rc;

use glutin::config::{ConfigTemplateBuilder, GetGlConfig, GlConfig};
use glutin::context::{ContextApi, ContextAttributesBuilder, NotCurrentContext, NotCurrentGlContext, PossiblyCurrentContext, PossiblyCurrentGlContext, Version};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{ApiPreference, DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::config::Config;
use crate::error::{Result, SquareError};
use crate::gl;
use crate::opengl::{Gl, GlString};

//////////////////////////////////////////////////
// Definition

struct AppState {
    window: Window,
    surface: Surface<WindowSurface>,
}

enum GlDisplayCreationState {
    /// The display was not build yet.
    Build,
    /// The display was already created for the application.
    Init,
}

/// Window, surface and context handling; the part of the host that
/// outlives surface loss on Android.
pub struct App {
    template: ConfigTemplateBuilder,
    window: WindowAttributes,
    gles_version: Version,
    vsync: bool,
    display: GlDisplayCreationState,
    context: Option<PossiblyCurrentContext>,
    state: Option<AppState>,
    renderer: Option<Gl>,
}

//////////////////////////////////////////////////
// Implementations

impl App {
    pub fn new(config: &Config) -> Self {
        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(16)
            .with_transparency(cfg!(cgl_backend));
        let window = Window::default_attributes()
            .with_transparent(config.translucent_background)
            .with_title(config.title.clone());
        let (major, minor) = config.gles_version;

        Self {
            template,
            window,
            gles_version: Version::new(major, minor),
            vsync: config.vsync,
            display: GlDisplayCreationState::Build,
            context: None,
            state: None,
            renderer: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(Window, glutin::config::Config)> {
        match self.display {
            // first resume: initialize the display, pick the config and create the context
            GlDisplayCreationState::Build => {
                let display_builder = DisplayBuilder::new()
                    .with_preference(ApiPreference::PreferEgl)
                    .with_window_attributes(Some(self.window.clone()));
                let (window, gl_config) = display_builder
                    .build(event_loop, self.template.clone(), gl_config_picker)
                    .map_err(|err| SquareError::Display(err.to_string()))?;
                let window = window.ok_or(SquareError::MissingWindow)?;

                log::debug!("Picked a config with {} samples", gl_config.num_samples());

                // the display stays valid until it is explicitly destroyed
                self.display = GlDisplayCreationState::Init;
                self.context = Some(create_gl_context(&window, &gl_config, self.gles_version)?.treat_as_possibly_current());

                Ok((window, gl_config))
            }
            GlDisplayCreationState::Init => {
                let gl_config = self.context.as_ref().ok_or(SquareError::MissingContext)?.config();
                let window = glutin_winit::finalize_window(event_loop, self.window.clone(), &gl_config)?;
                Ok((window, gl_config))
            }
        }
    }

    fn create_renderer<D: GlDisplay>(&mut self, gl_display: &D) {
        self.renderer.get_or_insert_with(|| {
            let gl = gl::Gles1::load_with(|symbol| match CString::new(symbol) {
                Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
                Err(_) => std::ptr::null(),
            });

            if let Some(vendor) = GlString::get(&gl, gl::VENDOR) {
                log::debug!("Vendor {}", vendor);
            }
            if let Some(renderer) = GlString::get(&gl, gl::RENDERER) {
                log::debug!("Running on {}", renderer);
            }
            if let Some(version) = GlString::get(&gl, gl::VERSION) {
                log::info!("OpenGL Version {}", version);
            }
            Rc::new(gl)
        });
    }

    /// Creates window and surface and makes the context current.
    /// Returns the initial surface size.
    pub fn resume(&mut self, event_loop: &ActiveEventLoop) -> Result<PhysicalSize<u32>> {
        log::debug!("Window resumed");

        let (window, gl_config) = self.create_window(event_loop)?;
        let attrs = window.build_surface_attributes(Default::default())?;
        let gl_surface = unsafe { gl_config.display().create_window_surface(&gl_config, &attrs)? };

        // the context needs to be current before any function is loaded
        let gl_context = self.context.as_ref().ok_or(SquareError::MissingContext)?;
        gl_context.make_current(&gl_surface)?;

        if self.vsync {
            if let Err(res) = gl_surface.set_swap_interval(gl_context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::error!("Error setting vsync: {res:?}");
            }
        }

        self.create_renderer(&gl_config.display());

        let size = window.inner_size();
        window.request_redraw();
        self.state = Some(AppState { surface: gl_surface, window });
        Ok(size)
    }

    pub fn suspend(&mut self) -> Result<()> {
        // Only raised on Android, where the native window behind the surface
        // can disappear at any moment.
        log::debug!("Window removed");

        // drop the surface before the window goes back to the system
        self.state = None;

        if let Some(context) = self.context.take() {
            self.context = Some(context.make_not_current()?.treat_as_possibly_current());
        }
        Ok(())
    }

    /// Presents the frame and schedules the next one.
    pub fn swap_buffers(&mut self) -> Result<()> {
        if let (Some(AppState { surface, window }), Some(gl_context)) = (self.state.as_ref(), self.context.as_ref()) {
            window.request_redraw();
            surface.swap_buffers(gl_context)?;
        }
        Ok(())
    }

    pub fn request_redraw(&self) {
        if let Some(AppState { window, .. }) = self.state.as_ref() {
            window.request_redraw();
        }
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        // EGL on Wayland needs an explicit resize, elsewhere this is a no-op
        if let (Some(AppState { surface, .. }), Some(gl_context)) = (self.state.as_ref(), self.context.as_ref()) {
            if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                surface.resize(gl_context, width, height);
            }
        }
    }

    pub fn exit(&mut self) {
        // Keep the display alive until after the window is gone, nvidia on
        // Wayland touches it from its exit hook.
        let _gl_display = self.context.take().map(|context| context.display());

        self.state = None;
        #[cfg(egl_backend)]
        #[allow(irrefutable_let_patterns)]
        if let Some(glutin::display::Display::Egl(display)) = _gl_display {
            unsafe {
                display.terminate();
            }
        }
    }

    pub fn has_surface_and_context(&self) -> bool {
        self.context.is_some() && self.state.is_some()
    }

    pub fn renderer(&self) -> Option<&Gl> {
        self.renderer.as_ref()
    }
}

/// Passed to `DisplayBuilder::build`, whose picker signature can't report an
/// empty config list; glutin only calls it after `find_configs` succeeded.
pub fn gl_config_picker(configs: Box<dyn Iterator<Item = glutin::config::Config> + '_>) -> glutin::config::Config {
    pick_config(configs, |config| config.supports_transparency().unwrap_or(false), |config| config.num_samples())
        .expect("Display offered no GL config")
}

/// Prefers transparency support, then the higher sample count. Ties keep
/// the config the display listed first.
pub fn pick_config<C>(configs: impl Iterator<Item = C>, transparency: impl Fn(&C) -> bool, samples: impl Fn(&C) -> u8) -> Option<C> {
    configs.reduce(|accum, config| {
        let (accum_transparent, config_transparent) = (transparency(&accum), transparency(&config));
        if config_transparent != accum_transparent {
            if config_transparent {
                config
            } else {
                accum
            }
        } else if samples(&config) > samples(&accum) {
            config
        } else {
            accum
        }
    })
}

fn create_gl_context(window: &Window, gl_config: &glutin::config::Config, version: Version) -> Result<NotCurrentContext> {
    let raw_window_handle = window.window_handle().ok().map(|wh| wh.as_raw());

    // fixed function needs OpenGL ES 1.x
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(version)))
        .build(raw_window_handle);

    let fallback_context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(Version::new(1, 0))))
        .build(raw_window_handle);

    // desktop drivers without ES 1.x still expose the same entry points in a 2.1 context
    let legacy_context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(2, 1))))
        .build(raw_window_handle);

    let gl_display = gl_config.display();

    unsafe {
        gl_display
            .create_context(gl_config, &context_attributes)
            .or_else(|_| gl_display.create_context(gl_config, &fallback_context_attributes))
            .or_else(|_| gl_display.create_context(gl_config, &legacy_context_attributes))
            .map_err(SquareError::from)
    }
}

//////////////////////////////////////////////////
// Tests
