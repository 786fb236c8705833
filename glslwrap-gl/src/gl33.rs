//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for glslwrap. The backend type is [`GL33`].

mod buffer;
mod depth_test;
mod pipeline;
mod shader;
mod state;
mod vertex_array;

pub use self::buffer::Buffer;
pub use self::shader::{Program, Stage};
pub use self::state::{GLState, StateQueryError};
pub use self::vertex_array::VertexArray;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// This type is to be used as a glslwrap backend type. It implements all the backend traits.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// The OpenGL function pointers must be loaded and a context must be current on the calling
  /// thread. Only one backend can be created per thread.
  pub fn new() -> Result<Self, StateQueryError> {
    let state = GLState::new()?;
    debug!("OpenGL 3.3 backend initialized");

    Ok(GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }
}
