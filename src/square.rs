//////////////////////////////////////////////////
// Using

use crate::gl;
use crate::gl::types::*;
use crate::opengl::{check_error, Gl};

//////////////////////////////////////////////////
// Const

pub const COORDS_PER_VERTEX: usize = 2;
pub const COLOR_COMPONENTS: usize = 4;
pub const VERTEX_COUNT: usize = 4;
pub const INDEX_COUNT: usize = 6;

const MAX_COLOR: u8 = 255;

// corners at (-1, -1), (1, -1), (-1, 1), (1, 1)
const VERTICES: [f32; VERTEX_COUNT * COORDS_PER_VERTEX] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    1.0, 1.0,
];

// rgba per corner: yellow, cyan, black, magenta
const COLORS: [u8; VERTEX_COUNT * COLOR_COMPONENTS] = [
    MAX_COLOR, MAX_COLOR, 0, MAX_COLOR, //
    0, MAX_COLOR, MAX_COLOR, MAX_COLOR, //
    0, 0, 0, MAX_COLOR, //
    MAX_COLOR, 0, MAX_COLOR, MAX_COLOR,
];

// two clockwise triangles
const INDICES: [u8; INDEX_COUNT] = [0, 3, 1, 0, 2, 3];

//////////////////////////////////////////////////
// Definition

/// Client side vertex, color and index arrays of a single square.
///
/// The arrays are boxed once on construction so the pointers handed to
/// `glVertexPointer` and friends stay valid for the lifetime of the square.
#[derive(Debug, Clone)]
pub struct Square {
    vertices: Box<[f32]>,
    colors: Box<[u8]>,
    indices: Box<[u8]>,
}

//////////////////////////////////////////////////
// Implementation

impl Square {
    pub fn new() -> Square {
        Square {
            vertices: Box::new(VERTICES),
            colors: Box::new(COLORS),
            indices: Box::new(INDICES),
        }
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn vertex(&self, index: usize) -> [f32; 2] {
        let offset = index * COORDS_PER_VERTEX;
        [self.vertices[offset], self.vertices[offset + 1]]
    }

    pub fn color(&self, index: usize) -> [u8; 4] {
        let offset = index * COLOR_COMPONENTS;
        [self.colors[offset], self.colors[offset + 1], self.colors[offset + 2], self.colors[offset + 3]]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
    }

    /// Twice the signed area of a triangle; negative means clockwise.
    pub fn signed_area(&self, triangle: [usize; 3]) -> f32 {
        let [a, b, c] = triangle.map(|index| self.vertex(index));
        (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
    }

    /// Expects `VERTEX_ARRAY` and `COLOR_ARRAY` client states to be enabled.
    pub fn draw(&self, gl: &Gl) {
        unsafe {
            gl.FrontFace(gl::CW);

            gl.VertexPointer(COORDS_PER_VERTEX as GLint, gl::FLOAT, 0, self.vertices.as_ptr().cast());
            gl.ColorPointer(COLOR_COMPONENTS as GLint, gl::UNSIGNED_BYTE, 0, self.colors.as_ptr().cast());

            gl.DrawElements(gl::TRIANGLES, self.indices.len() as GLsizei, gl::UNSIGNED_BYTE, self.indices.as_ptr().cast());

            // back to the default winding
            gl.FrontFace(gl::CCW);
            check_error(gl, "Failed to draw square");
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Self::new()
    }
}

//////////////////////////////////////////////////
// Tests
