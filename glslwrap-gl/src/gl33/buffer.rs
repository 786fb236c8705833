//! OpenGL buffer implementation.

use crate::gl33::{
  state::{Bind, GLState},
  GL33,
};
use gl::types::*;
use glslwrap::{
  backend::buffer::Buffer as BufferBackend,
  buffer::{BufferError, BufferTarget},
};
use log::trace;
use std::{cell::RefCell, mem, ptr, rc::Rc};

/// OpenGL buffer.
///
/// Deleting the buffer also forgets about it in the binding cache.
#[derive(Debug)]
pub struct Buffer {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Buffer {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().unbind_buffer(self.handle);
      gl::DeleteBuffers(1, &self.handle);
    }
  }
}

unsafe impl BufferBackend for GL33 {
  type BufferRepr = Buffer;

  unsafe fn new_buffer(&mut self) -> Result<Self::BufferRepr, BufferError> {
    let mut handle: GLuint = 0;
    gl::GenBuffers(1, &mut handle);

    if handle == 0 {
      return Err(BufferError::CreationFailed);
    }

    Ok(Buffer {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn upload<T>(&mut self, buffer: &Self::BufferRepr, target: BufferTarget, values: &[T])
  where
    T: Copy,
  {
    let mut state = self.state.borrow_mut();

    let gl_target = match target {
      BufferTarget::Array => {
        state.bind_array_buffer(buffer.handle, Bind::Cached);
        gl::ARRAY_BUFFER
      }

      // the element buffer binding lives in the vertex array, which the cache doesn’t track
      BufferTarget::ElementArray => {
        state.bind_element_array_buffer(buffer.handle, Bind::Forced);
        gl::ELEMENT_ARRAY_BUFFER
      }
    };

    let bytes = mem::size_of_val(values) as GLsizeiptr;
    trace!("uploading {} bytes to buffer {}", bytes, buffer.handle);

    gl::BufferData(gl_target, bytes, ptr::null(), gl::STATIC_DRAW);
    gl::BufferSubData(gl_target, 0, bytes, values.as_ptr() as *const _);
  }
}
