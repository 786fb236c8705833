//! Vertex array backend interface.

use crate::attribute::AttributeLayout;
use crate::backend::buffer::Buffer;
use crate::draw::{DrawCall, Mode};
use std::fmt;

/// Errors that might happen when creating vertex arrays.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum VertexArrayError {
  /// The backend could not create the vertex array.
  CreationFailed,
}

impl fmt::Display for VertexArrayError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexArrayError::CreationFailed => f.write_str("cannot create vertex array"),
    }
  }
}

impl std::error::Error for VertexArrayError {}

/// Vertex array backend.
pub unsafe trait VertexArray: Buffer {
  /// Backend representation of a vertex array; releases the native object when dropped.
  type VertexArrayRepr;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError>;

  unsafe fn bind_vertex_array(&mut self, vertex_array: &Self::VertexArrayRepr);

  /// Point a float attribute into `buffer` and enable it on the currently bound vertex array.
  unsafe fn set_vertex_attrib(&mut self, buffer: &Self::BufferRepr, layout: &AttributeLayout);

  /// Attach `buffer` as the element buffer of the currently bound vertex array.
  unsafe fn bind_element_buffer(&mut self, buffer: &Self::BufferRepr);

  /// Issue a draw call with the currently bound vertex array and program.
  unsafe fn draw(&mut self, mode: Mode, call: DrawCall);
}
