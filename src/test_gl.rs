//! Recording stand-in for the GLES 1 entry points, for tests only.

//////////////////////////////////////////////////
// Using

use std::cell::RefCell;
use std::ffi::c_void;
use std::rc::Rc;

use crate::gl;
use crate::gl::types::*;
use crate::opengl::Gl;

//////////////////////////////////////////////////
// Calls

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Disable(GLenum),
    Enable(GLenum),
    Hint(GLenum, GLenum),
    ClearColor([GLfloat; 4]),
    ShadeModel(GLenum),
    Viewport(GLint, GLint, GLsizei, GLsizei),
    MatrixMode(GLenum),
    LoadIdentity,
    MultMatrix([GLfloat; 16]),
    Clear(GLbitfield),
    EnableClientState(GLenum),
    DisableClientState(GLenum),
    FrontFace(GLenum),
    /// size, type, stride, address of the client array
    VertexPointer(GLint, GLenum, GLsizei, usize),
    ColorPointer(GLint, GLenum, GLsizei, usize),
    DrawElements(GLenum, GLsizei, GLenum, Vec<u8>),
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
}

fn record(call: Call) {
    CALLS.with(|calls| calls.borrow_mut().push(call));
}

/// GL handle whose entry points append to this thread's call log.
pub fn recording_gl() -> Gl {
    CALLS.with(|calls| calls.borrow_mut().clear());
    Rc::new(gl::Gles1::load_with(lookup))
}

pub fn take_calls() -> Vec<Call> {
    CALLS.with(|calls| std::mem::take(&mut *calls.borrow_mut()))
}

//////////////////////////////////////////////////
// Entry points

extern "system" fn disable(cap: GLenum) {
    record(Call::Disable(cap));
}

extern "system" fn enable(cap: GLenum) {
    record(Call::Enable(cap));
}

extern "system" fn hint(target: GLenum, mode: GLenum) {
    record(Call::Hint(target, mode));
}

extern "system" fn clear_color(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
    record(Call::ClearColor([red, green, blue, alpha]));
}

extern "system" fn shade_model(mode: GLenum) {
    record(Call::ShadeModel(mode));
}

extern "system" fn viewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    record(Call::Viewport(x, y, width, height));
}

extern "system" fn matrix_mode(mode: GLenum) {
    record(Call::MatrixMode(mode));
}

extern "system" fn load_identity() {
    record(Call::LoadIdentity);
}

extern "system" fn mult_matrix(m: *const GLfloat) {
    let mut matrix = [0.0; 16];
    matrix.copy_from_slice(unsafe { std::slice::from_raw_parts(m, 16) });
    record(Call::MultMatrix(matrix));
}

extern "system" fn clear(mask: GLbitfield) {
    record(Call::Clear(mask));
}

extern "system" fn enable_client_state(array: GLenum) {
    record(Call::EnableClientState(array));
}

extern "system" fn disable_client_state(array: GLenum) {
    record(Call::DisableClientState(array));
}

extern "system" fn front_face(mode: GLenum) {
    record(Call::FrontFace(mode));
}

extern "system" fn vertex_pointer(size: GLint, type_: GLenum, stride: GLsizei, pointer: *const c_void) {
    record(Call::VertexPointer(size, type_, stride, pointer as usize));
}

extern "system" fn color_pointer(size: GLint, type_: GLenum, stride: GLsizei, pointer: *const c_void) {
    record(Call::ColorPointer(size, type_, stride, pointer as usize));
}

extern "system" fn draw_elements(mode: GLenum, count: GLsizei, type_: GLenum, indices: *const c_void) {
    let indices = if type_ == gl::UNSIGNED_BYTE {
        unsafe { std::slice::from_raw_parts(indices as *const u8, count as usize) }.to_vec()
    } else {
        Vec::new()
    };
    record(Call::DrawElements(mode, count, type_, indices));
}

extern "system" fn get_error() -> GLenum {
    gl::NO_ERROR
}

extern "system" fn get_string(_name: GLenum) -> *const GLubyte {
    b"Recording GL\0".as_ptr()
}

fn lookup(symbol: &'static str) -> *const c_void {
    match symbol {
        "glDisable" => disable as *const c_void,
        "glEnable" => enable as *const c_void,
        "glHint" => hint as *const c_void,
        "glClearColor" => clear_color as *const c_void,
        "glShadeModel" => shade_model as *const c_void,
        "glViewport" => viewport as *const c_void,
        "glMatrixMode" => matrix_mode as *const c_void,
        "glLoadIdentity" => load_identity as *const c_void,
        "glMultMatrixf" => mult_matrix as *const c_void,
        "glClear" => clear as *const c_void,
        "glEnableClientState" => enable_client_state as *const c_void,
        "glDisableClientState" => disable_client_state as *const c_void,
        "glFrontFace" => front_face as *const c_void,
        "glVertexPointer" => vertex_pointer as *const c_void,
        "glColorPointer" => color_pointer as *const c_void,
        "glDrawElements" => draw_elements as *const c_void,
        "glGetError" => get_error as *const c_void,
        "glGetString" => get_string as *const c_void,
        _ => std::ptr::null(),
    }
}
