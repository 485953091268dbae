//////////////////////////////////////////////////
// Using

use std::ffi::CStr;
use std::rc::Rc;

use nalgebra_glm::Mat4;

use crate::gl;
use crate::gl::types::*;

//////////////////////////////////////////////////
// Types

pub type Gl = Rc<gl::Gles1>;

//////////////////////////////////////////////////
// Strings

pub struct GlString {}

impl GlString {
    pub fn get(gl: &gl::Gles1, name: GLenum) -> Option<String> {
        unsafe {
            let ptr = gl.GetString(name);
            if ptr.is_null() {
                None
            } else {
                Some(CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned())
            }
        }
    }
}

//////////////////////////////////////////////////
// Matrix stack

/// Replaces the matrix of the given stack (`PROJECTION` or `MODELVIEW`).
pub unsafe fn set_matrix(gl: &Gl, mode: GLenum, matrix: &Mat4) {
    gl.MatrixMode(mode);
    gl.LoadIdentity();
    gl.MultMatrixf(matrix.as_ptr());
    check_error(gl, "Failed to set matrix");
}

//////////////////////////////////////////////////
// Errors

#[inline]
#[cfg(debug_assertions)]
pub unsafe fn check_error(gl: &Gl, description: &str) -> bool {
    let mut err = gl.GetError();
    let mut has_error = false;
    while err != gl::NO_ERROR {
        log::error!("{}. ErrorCode {}", description, err);
        err = gl.GetError();
        has_error = true;
    }
    has_error
}

#[inline]
#[cfg(not(debug_assertions))]
pub unsafe fn check_error(_gl: &Gl, _description: &str) -> bool {
    false
}

//////////////////////////////////////////////////
// Tests
