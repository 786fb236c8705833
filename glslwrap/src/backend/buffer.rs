//! Buffer backend interface.

use crate::buffer::{BufferError, BufferTarget};

/// Buffer backend.
pub unsafe trait Buffer {
  /// Backend representation of a buffer; releases the native buffer when dropped.
  type BufferRepr;

  /// Create a new, empty buffer.
  unsafe fn new_buffer(&mut self) -> Result<Self::BufferRepr, BufferError>;

  /// Bind the buffer to `target`, allocate `values.len()` elements of storage and fill it from
  /// offset zero.
  unsafe fn upload<T>(&mut self, buffer: &Self::BufferRepr, target: BufferTarget, values: &[T])
  where
    T: Copy;
}
