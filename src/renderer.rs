//////////////////////////////////////////////////
// Using

use std::f32::consts::TAU;

use nalgebra_glm as glm;
use nalgebra_glm::Mat4;

use crate::config::Config;
use crate::gl;
use crate::opengl::{check_error, set_matrix, Gl};
use crate::square::Square;
use crate::SurfaceRenderer;

//////////////////////////////////////////////////
// Const

const NEAR_PLANE: f32 = 1.0;
const FAR_PLANE: f32 = 10.0;
const SQUARE_DEPTH: f32 = -3.0;

//////////////////////////////////////////////////
// Definition

/// Draws one square bobbing up and down in front of the camera.
#[derive(Debug)]
pub struct SquareRenderer {
    translucent_background: bool,
    square: Square,
    trans_y: f32,
    step: f32,
}

//////////////////////////////////////////////////
// Implementation

impl SquareRenderer {
    pub fn new(config: &Config) -> SquareRenderer {
        SquareRenderer {
            translucent_background: config.translucent_background,
            square: Square::new(),
            trans_y: 0.0,
            step: config.translation_step,
        }
    }

    pub fn square(&self) -> &Square {
        &self.square
    }

    pub fn trans_y(&self) -> f32 {
        self.trans_y
    }

    /// Moves the oscillation one frame ahead, kept within one period.
    pub fn advance(&mut self) {
        self.trans_y = (self.trans_y + self.step).rem_euclid(TAU);
    }

    pub fn model_view(&self) -> Mat4 {
        model_view(self.trans_y)
    }
}

impl SurfaceRenderer for SquareRenderer {
    fn surface_created(&mut self, gl: &Gl) {
        log::debug!("Surface created (translucent: {})", self.translucent_background);

        let [red, green, blue, alpha] = clear_color(self.translucent_background);
        unsafe {
            gl.Disable(gl::DITHER);
            gl.Hint(gl::PERSPECTIVE_CORRECTION_HINT, gl::FASTEST);
            gl.ClearColor(red, green, blue, alpha);
            gl.Enable(gl::CULL_FACE);
            gl.ShadeModel(gl::SMOOTH);
            gl.Enable(gl::DEPTH_TEST);
            check_error(gl, "Failed to set surface state");
        }
    }

    fn surface_changed(&mut self, gl: &Gl, width: u32, height: u32) {
        log::debug!("Surface changed ({} x {})", width, height);

        unsafe {
            gl.Viewport(0, 0, width as _, height as _);
            check_error(gl, "Failed to set viewport");
            set_matrix(gl, gl::PROJECTION, &projection(width, height));
        }
    }

    fn draw_frame(&mut self, gl: &Gl) {
        unsafe {
            gl.Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
            set_matrix(gl, gl::MODELVIEW, &self.model_view());

            gl.EnableClientState(gl::VERTEX_ARRAY);
            gl.EnableClientState(gl::COLOR_ARRAY);
        }

        self.square.draw(gl);
        self.advance();
    }

    fn surface_destroyed(&mut self, gl: &Gl) {
        log::debug!("Surface destroyed");

        unsafe {
            gl.DisableClientState(gl::COLOR_ARRAY);
            gl.DisableClientState(gl::VERTEX_ARRAY);
        }
    }
}

//////////////////////////////////////////////////
// Math

pub fn clear_color(translucent: bool) -> [f32; 4] {
    if translucent {
        [0.0, 0.0, 0.0, 0.0]
    } else {
        [1.0, 1.0, 1.0, 1.0]
    }
}

/// Width over height; a zero height counts as one pixel.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

pub fn projection(width: u32, height: u32) -> Mat4 {
    let ratio = aspect_ratio(width, height);
    frustum(-ratio, ratio, -1.0, 1.0, NEAR_PLANE, FAR_PLANE)
}

/// Same matrix `glFrustumf` multiplies onto the current stack.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    #[rustfmt::skip]
    let matrix = glm::mat4(
        2.0 * near / (right - left), 0.0, (right + left) / (right - left), 0.0,
        0.0, 2.0 * near / (top - bottom), (top + bottom) / (top - bottom), 0.0,
        0.0, 0.0, -(far + near) / (far - near), -2.0 * far * near / (far - near),
        0.0, 0.0, -1.0, 0.0,
    );
    matrix
}

pub fn model_view(trans_y: f32) -> Mat4 {
    glm::translation(&glm::vec3(0.0, trans_y.sin(), SQUARE_DEPTH))
}

//////////////////////////////////////////////////
// Tests
