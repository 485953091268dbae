//////////////////////////////////////////////////
// Using

use crate::opengl::Gl;
use crate::SurfaceRenderer;

//////////////////////////////////////////////////
// Definition

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// No surface, or it was lost.
    Destroyed,
    /// Created, but no usable size was reported yet.
    Created,
    /// Sized at least once; frames can be drawn.
    Ready,
}

/// Forwards host surface events to a [`SurfaceRenderer`] in the order the
/// trait promises, whatever order and sizes the window system reports.
pub struct SurfaceDriver<R: SurfaceRenderer> {
    renderer: R,
    state: SurfaceState,
    size: (u32, u32),
    frames: u64,
}

//////////////////////////////////////////////////
// Implementation

impl<R: SurfaceRenderer> SurfaceDriver<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            state: SurfaceState::Destroyed,
            size: (0, 0),
            frames: 0,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn create(&mut self, gl: &Gl, width: u32, height: u32) {
        log::info!("Surface created");
        self.renderer.surface_created(gl);
        self.state = SurfaceState::Created;
        self.change(gl, width, height);
    }

    /// Zero sized surfaces are held back until a real size arrives.
    pub fn change(&mut self, gl: &Gl, width: u32, height: u32) {
        match self.state {
            SurfaceState::Destroyed => (),
            _ if width == 0 || height == 0 => log::debug!("Ignoring empty surface {}x{}", width, height),
            SurfaceState::Ready if self.size == (width, height) => (),
            _ => {
                log::debug!("Surface changed to {}x{}", width, height);
                self.renderer.surface_changed(gl, width, height);
                self.size = (width, height);
                self.state = SurfaceState::Ready;
            }
        }
    }

    /// Returns whether a frame was drawn and needs to be presented.
    pub fn draw(&mut self, gl: &Gl) -> bool {
        if self.state != SurfaceState::Ready {
            return false;
        }
        self.renderer.draw_frame(gl);
        self.frames += 1;
        log::trace!("Frame {}", self.frames);
        true
    }

    pub fn destroy(&mut self, gl: &Gl) {
        if self.state != SurfaceState::Destroyed {
            log::info!("Surface destroyed");
            self.renderer.surface_destroyed(gl);
            self.state = SurfaceState::Destroyed;
        }
    }
}

//////////////////////////////////////////////////
// Tests
