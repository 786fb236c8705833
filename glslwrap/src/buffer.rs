//! Vertex and element buffers.
//!
//! Both buffers keep a host copy of their values, laid out as `rows` records of `columns`
//! components, and a native buffer. Only the first `columns * rows` values are ever uploaded. The
//! upload itself is deferred to the next render of the [`DrawObject`] owning the buffer, and is
//! skipped if the values haven’t changed since.
//!
//! [`DrawObject`]: crate::draw::DrawObject

use crate::backend::buffer::Buffer;
use crate::context::GraphicsContext;
use log::debug;
use std::error;
use std::fmt;

/// Buffer errors.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BufferError {
  /// The backend could not create the native buffer.
  CreationFailed,

  /// Too few values were passed to fill `columns * rows` components.
  TooFewValues {
    provided_len: usize,
    required_len: usize,
  },

  /// `columns * rows` doesn’t fit in a `usize`.
  InvalidShape { columns: usize, rows: usize },
}

impl BufferError {
  pub fn too_few_values(provided_len: usize, required_len: usize) -> Self {
    BufferError::TooFewValues {
      provided_len,
      required_len,
    }
  }
}

impl fmt::Display for BufferError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      BufferError::CreationFailed => f.write_str("buffer creation failed"),

      BufferError::TooFewValues {
        provided_len,
        required_len,
      } => write!(
        f,
        "too few values passed to the buffer; provided {} but {} are required",
        provided_len, required_len
      ),

      BufferError::InvalidShape { columns, rows } => {
        write!(f, "invalid buffer shape: {} columns by {} rows", columns, rows)
      }
    }
  }
}

impl error::Error for BufferError {}

/// Binding point a buffer is uploaded to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BufferTarget {
  /// Vertex data.
  Array,
  /// Vertex indices.
  ElementArray,
}

/// Host values shared by both buffer kinds.
#[derive(Debug)]
struct Storage<T> {
  values: Vec<T>,
  columns: usize,
  rows: usize,
  used_len: usize,
  dirty: bool,
}

impl<T> Storage<T>
where
  T: Copy,
{
  fn new(values: &[T], columns: usize, rows: usize) -> Result<Self, BufferError> {
    let required_len = columns
      .checked_mul(rows)
      .ok_or(BufferError::InvalidShape { columns, rows })?;

    if values.len() < required_len {
      return Err(BufferError::too_few_values(values.len(), required_len));
    }

    Ok(Storage {
      values: values.to_vec(),
      columns,
      rows,
      used_len: required_len,
      dirty: true,
    })
  }

  fn used(&self) -> &[T] {
    &self.values[..self.used_len]
  }
}

macro_rules! impl_buffer {
  ($(#[$doc:meta])* $name:ident, $t:ty, $target:expr) => {
    $(#[$doc])*
    pub struct $name<B>
    where
      B: ?Sized + Buffer,
    {
      repr: B::BufferRepr,
      storage: Storage<$t>,
    }

    impl<B> $name<B>
    where
      B: ?Sized + Buffer,
    {
      /// Copy `values` and create the native buffer.
      ///
      /// `values` must hold at least `columns * rows` items.
      pub fn new<C>(ctx: &mut C, values: &[$t], columns: usize, rows: usize) -> Result<Self, BufferError>
      where
        C: ?Sized + GraphicsContext<Backend = B>,
      {
        let storage = Storage::new(values, columns, rows)?;
        let repr = unsafe { ctx.backend().new_buffer()? };

        debug!(
          "{} created ({} columns, {} rows)",
          stringify!($name),
          columns,
          rows
        );

        Ok($name { repr, storage })
      }

      /// Backend representation of the buffer.
      pub fn repr(&self) -> &B::BufferRepr {
        &self.repr
      }

      /// All the values held by the buffer.
      pub fn values(&self) -> &[$t] {
        &self.storage.values
      }

      /// Number of components per row.
      pub fn columns(&self) -> usize {
        self.storage.columns
      }

      /// Number of rows.
      pub fn rows(&self) -> usize {
        self.storage.rows
      }

      /// Number of values held by the buffer.
      pub fn len(&self) -> usize {
        self.storage.values.len()
      }

      /// Number of values uploaded to the GPU (`columns * rows`).
      pub fn used_len(&self) -> usize {
        self.storage.used_len
      }

      /// Whether nothing would be uploaded.
      pub fn is_empty(&self) -> bool {
        self.used_len() == 0
      }

      /// Replace the values and shape of the buffer; the new values will be uploaded on the next
      /// render.
      pub fn set_values(&mut self, values: &[$t], columns: usize, rows: usize) -> Result<(), BufferError> {
        self.storage = Storage::new(values, columns, rows)?;
        Ok(())
      }

      /// Whether the values changed since the last upload.
      pub fn is_dirty(&self) -> bool {
        self.storage.dirty
      }

      // uploads if dirty and non-empty; returns whether an upload happened
      pub(crate) fn upload_dirty(&mut self, backend: &mut B) -> bool {
        if !self.storage.dirty || self.is_empty() {
          return false;
        }

        unsafe { backend.upload(&self.repr, $target, self.storage.used()) };
        self.storage.dirty = false;
        true
      }
    }
  };
}

impl_buffer!(
  /// `f32` vertex data, `rows` vertices of `columns` components each.
  VertexBuffer,
  f32,
  BufferTarget::Array
);

impl_buffer!(
  /// `u32` vertex indices, `rows` primitives of `columns` indices each.
  ElementBuffer,
  u32,
  BufferTarget::ElementArray
);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{Call, Recorder};

  #[test]
  fn too_few_values() {
    let mut ctx = Recorder::new();
    let err = VertexBuffer::new(&mut ctx, &[0., 1., 2.], 3, 2).err();

    assert_eq!(err, Some(BufferError::too_few_values(3, 6)));
    assert!(ctx.calls().is_empty());
  }

  #[test]
  fn overflowing_shape() {
    let mut ctx = Recorder::new();
    let err = VertexBuffer::new(&mut ctx, &[0.], usize::MAX, 2).err();

    assert_eq!(
      err,
      Some(BufferError::InvalidShape {
        columns: usize::MAX,
        rows: 2
      })
    );
    assert!(ctx.calls().is_empty());

    let mut indices = ElementBuffer::new(&mut ctx, &[0, 1], 2, 1).unwrap();
    assert!(indices.set_values(&[0], 2, usize::MAX).is_err());
    assert_eq!(indices.used_len(), 2);
  }

  #[test]
  fn uploads_only_used_values_once() {
    let mut ctx = Recorder::new();
    let mut buffer = VertexBuffer::new(&mut ctx, &[0., 0., 0., 1., 1., 1., 9.], 3, 2).unwrap();

    assert_eq!(buffer.len(), 7);
    assert_eq!(buffer.used_len(), 6);
    assert!(buffer.upload_dirty(&mut ctx));
    assert!(!buffer.upload_dirty(&mut ctx));

    assert_eq!(
      ctx.calls(),
      vec![
        Call::NewBuffer(1),
        Call::Upload {
          buffer: 1,
          target: BufferTarget::Array,
          len: 6,
          bytes: 24,
        },
      ]
    );
  }

  #[test]
  fn set_values_schedules_upload() {
    let mut ctx = Recorder::new();
    let mut buffer = ElementBuffer::new(&mut ctx, &[0, 1, 2], 3, 1).unwrap();
    buffer.upload_dirty(&mut ctx);

    buffer.set_values(&[0, 1, 2, 2, 3, 0], 3, 2).unwrap();
    assert!(buffer.is_dirty());
    assert!(buffer.upload_dirty(&mut ctx));

    assert_eq!(
      ctx.calls().last(),
      Some(&Call::Upload {
        buffer: 1,
        target: BufferTarget::ElementArray,
        len: 6,
        bytes: 24,
      })
    );
  }

  #[test]
  fn empty_buffer_is_never_uploaded() {
    let mut ctx = Recorder::new();
    let mut buffer = VertexBuffer::new(&mut ctx, &[], 3, 0).unwrap();

    assert!(buffer.is_empty());
    assert!(!buffer.upload_dirty(&mut ctx));
    assert_eq!(ctx.calls(), vec![Call::NewBuffer(1)]);
  }

  #[test]
  fn drop_releases_buffer() {
    let mut ctx = Recorder::new();
    let buffer = VertexBuffer::new(&mut ctx, &[1.], 1, 1).unwrap();
    drop(buffer);

    assert_eq!(ctx.calls(), vec![Call::NewBuffer(1), Call::DeleteBuffer(1)]);
  }
}
