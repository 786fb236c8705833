use crate::gl33::{
  state::{Bind, GLState},
  GL33,
};
use gl::{self, types::*};
use glslwrap::{
  attribute::AttributeLayout,
  backend::vertex_array::{VertexArray as VertexArrayBackend, VertexArrayError},
  draw::{DrawCall, Mode},
};
use std::{cell::RefCell, os::raw::c_void, ptr, rc::Rc};

/// OpenGL vertex array object.
#[derive(Debug)]
pub struct VertexArray {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for VertexArray {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().unbind_vertex_array(self.handle);
      gl::DeleteVertexArrays(1, &self.handle);
    }
  }
}

unsafe impl VertexArrayBackend for GL33 {
  type VertexArrayRepr = VertexArray;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError> {
    let mut handle: GLuint = 0;
    gl::GenVertexArrays(1, &mut handle);

    if handle == 0 {
      return Err(VertexArrayError::CreationFailed);
    }

    Ok(VertexArray {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn bind_vertex_array(&mut self, vertex_array: &Self::VertexArrayRepr) {
    self
      .state
      .borrow_mut()
      .bind_vertex_array(vertex_array.handle, Bind::Cached);
  }

  unsafe fn set_vertex_attrib(&mut self, buffer: &Self::BufferRepr, layout: &AttributeLayout) {
    // force binding as it’s meaningful when a vao is bound
    self
      .state
      .borrow_mut()
      .bind_array_buffer(buffer.handle, Bind::Forced);

    gl::VertexAttribPointer(
      layout.index as GLuint,
      layout.size as GLint,
      gl::FLOAT,
      gl::FALSE,
      layout.stride as GLsizei,
      ptr::null::<c_void>().add(layout.offset),
    );
    gl::EnableVertexAttribArray(layout.index as GLuint);
  }

  unsafe fn bind_element_buffer(&mut self, buffer: &Self::BufferRepr) {
    // the binding is recorded in the bound vao, so the cache can’t be trusted here
    self
      .state
      .borrow_mut()
      .bind_element_array_buffer(buffer.handle, Bind::Forced);
  }

  unsafe fn draw(&mut self, mode: Mode, call: DrawCall) {
    match call {
      DrawCall::Arrays { first, count } => {
        gl::DrawArrays(opengl_mode(mode), first as GLint, count as GLsizei);
      }

      DrawCall::Elements { count } => {
        gl::DrawElements(
          opengl_mode(mode),
          count as GLsizei,
          gl::UNSIGNED_INT,
          ptr::null(),
        );
      }
    }
  }
}

fn opengl_mode(mode: Mode) -> GLenum {
  match mode {
    Mode::Point => gl::POINTS,
    Mode::Line => gl::LINES,
    Mode::LineStrip => gl::LINE_STRIP,
    Mode::Triangle => gl::TRIANGLES,
    Mode::TriangleFan => gl::TRIANGLE_FAN,
    Mode::TriangleStrip => gl::TRIANGLE_STRIP,
  }
}
