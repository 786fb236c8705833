//! Draw objects.
//!
//! A [`DrawObject`] gathers everything needed to issue a draw call: a shader [`Program`], an
//! optional [`VertexBuffer`], an optional [`ElementBuffer`], the [`AttributeList`] describing the
//! vertices and a native vertex array. [`DrawObject::render`] runs the whole bind / upload / draw
//! sequence.

use crate::attribute::{AttributeError, AttributeLayout, AttributeList};
use crate::backend::vertex_array::VertexArrayError;
use crate::backend::Backend;
use crate::buffer::{ElementBuffer, VertexBuffer};
use crate::context::GraphicsContext;
use crate::shader::Program;
use log::{debug, trace};
use std::error;
use std::fmt;

/// Primitive mode.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
  /// A single point.
  Point,
  /// A line, defined by two vertices.
  Line,
  /// A strip line, defined by at least two vertices.
  LineStrip,
  /// A triangle, defined by three vertices.
  Triangle,
  /// A triangle strip, defined by at least three vertices.
  TriangleStrip,
  /// A triangle fan, defined by at least three vertices.
  TriangleFan,
}

impl Default for Mode {
  fn default() -> Self {
    Mode::Triangle
  }
}

/// A draw call, as issued to the backend.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DrawCall {
  /// Draw `count` vertices in order, starting at vertex `first`.
  Arrays { first: usize, count: usize },
  /// Draw `count` `u32` indices from the element buffer.
  Elements { count: usize },
}

/// Errors that might occur when creating or rendering a [`DrawObject`].
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum DrawError {
  /// The vertex array could not be created.
  VertexArray(VertexArrayError),
  /// The attribute list doesn’t fit the vertex buffer.
  Attribute(AttributeError),
  /// Attributes were set but there is no vertex buffer to read them from.
  AttributesWithoutVertices,
}

impl fmt::Display for DrawError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      DrawError::VertexArray(ref e) => write!(f, "vertex array error: {}", e),
      DrawError::Attribute(ref e) => write!(f, "attribute error: {}", e),
      DrawError::AttributesWithoutVertices => f.write_str("attributes set without vertex buffer"),
    }
  }
}

impl error::Error for DrawError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      DrawError::VertexArray(e) => Some(e),
      DrawError::Attribute(e) => Some(e),
      DrawError::AttributesWithoutVertices => None,
    }
  }
}

impl From<VertexArrayError> for DrawError {
  fn from(e: VertexArrayError) -> Self {
    DrawError::VertexArray(e)
  }
}

impl From<AttributeError> for DrawError {
  fn from(e: AttributeError) -> Self {
    DrawError::Attribute(e)
  }
}

/// A program along with the geometry it renders.
pub struct DrawObject<B>
where
  B: ?Sized + Backend,
{
  // fields are dropped in declaration order
  program: Program<B>,
  element_buffer: Option<ElementBuffer<B>>,
  vertex_buffer: Option<VertexBuffer<B>>,
  attributes: Option<AttributeList>,
  vertex_array: B::VertexArrayRepr,
  mode: Mode,
  layout_dirty: bool,
  // the element buffer isn’t attached to this vertex array yet
  elements_dirty: bool,
}

impl<B> DrawObject<B>
where
  B: ?Sized + Backend,
{
  /// Create a draw object rendering with `program`, with no geometry yet.
  pub fn new<C>(ctx: &mut C, program: Program<B>) -> Result<Self, DrawError>
  where
    C: ?Sized + GraphicsContext<Backend = B>,
  {
    let vertex_array = unsafe { ctx.backend().new_vertex_array()? };

    debug!("draw object created");

    Ok(DrawObject {
      program,
      element_buffer: None,
      vertex_buffer: None,
      attributes: None,
      vertex_array,
      mode: Mode::default(),
      layout_dirty: true,
      elements_dirty: true,
    })
  }

  pub fn program(&self) -> &Program<B> {
    &self.program
  }

  pub fn program_mut(&mut self) -> &mut Program<B> {
    &mut self.program
  }

  pub fn vertex_buffer(&self) -> Option<&VertexBuffer<B>> {
    self.vertex_buffer.as_ref()
  }

  pub fn vertex_buffer_mut(&mut self) -> Option<&mut VertexBuffer<B>> {
    self.vertex_buffer.as_mut()
  }

  /// Replace the vertex buffer, returning the previous one.
  pub fn set_vertex_buffer(
    &mut self,
    buffer: impl Into<Option<VertexBuffer<B>>>,
  ) -> Option<VertexBuffer<B>> {
    self.layout_dirty = true;
    std::mem::replace(&mut self.vertex_buffer, buffer.into())
  }

  pub fn element_buffer(&self) -> Option<&ElementBuffer<B>> {
    self.element_buffer.as_ref()
  }

  pub fn element_buffer_mut(&mut self) -> Option<&mut ElementBuffer<B>> {
    self.element_buffer.as_mut()
  }

  /// Replace the element buffer, returning the previous one.
  pub fn set_element_buffer(
    &mut self,
    buffer: impl Into<Option<ElementBuffer<B>>>,
  ) -> Option<ElementBuffer<B>> {
    self.elements_dirty = true;
    std::mem::replace(&mut self.element_buffer, buffer.into())
  }

  pub fn attributes(&self) -> Option<&AttributeList> {
    self.attributes.as_ref()
  }

  /// Replace the attribute list, returning the previous one.
  pub fn set_attributes(
    &mut self,
    attributes: impl Into<Option<AttributeList>>,
  ) -> Option<AttributeList> {
    self.layout_dirty = true;
    std::mem::replace(&mut self.attributes, attributes.into())
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn set_mode(&mut self, mode: Mode) {
    self.mode = mode;
  }

  /// Bind, upload what changed and draw.
  ///
  /// Returns the draw call that was issued, or `None` if both buffers are absent or empty. On
  /// error, no native call is made.
  pub fn render<C>(&mut self, ctx: &mut C) -> Result<Option<DrawCall>, DrawError>
  where
    C: ?Sized + GraphicsContext<Backend = B>,
  {
    let vertices_dirty = self
      .vertex_buffer
      .as_ref()
      .map_or(false, |vb| vb.is_dirty() && !vb.is_empty());
    let layouts = if self.layout_dirty || vertices_dirty {
      Some(self.attribute_layouts()?)
    } else {
      None
    };

    let backend = ctx.backend();

    unsafe { backend.bind_vertex_array(&self.vertex_array) };
    self.program.bind(backend);

    if let Some(ref mut vertex_buffer) = self.vertex_buffer {
      vertex_buffer.upload_dirty(backend);
    }

    if let Some(ref mut element_buffer) = self.element_buffer {
      // an upload binds the buffer to the vertex array; a clean buffer must be attached explicitly
      let uploaded = element_buffer.upload_dirty(backend);

      if self.elements_dirty && !uploaded && !element_buffer.is_empty() {
        unsafe { backend.bind_element_buffer(element_buffer.repr()) };
      }
    }

    self.elements_dirty = false;

    if let Some(layouts) = layouts {
      if let Some(ref vertex_buffer) = self.vertex_buffer {
        for layout in &layouts {
          unsafe { backend.set_vertex_attrib(vertex_buffer.repr(), layout) };
        }
      }

      self.layout_dirty = false;
    }

    self.program.upload_dirty(backend);

    let call = self.draw_call();

    if let Some(call) = call {
      trace!("drawing {:?} with {:?}", self.mode, call);
      unsafe { backend.draw(self.mode, call) };
    }

    Ok(call)
  }

  fn attribute_layouts(&self) -> Result<Vec<AttributeLayout>, DrawError> {
    match self.attributes {
      Some(ref attributes) if !attributes.is_empty() => {
        let vertex_buffer = self
          .vertex_buffer
          .as_ref()
          .ok_or(DrawError::AttributesWithoutVertices)?;

        Ok(attributes.layouts(vertex_buffer.columns())?)
      }

      _ => Ok(Vec::new()),
    }
  }

  fn draw_call(&self) -> Option<DrawCall> {
    let indices = self.element_buffer.as_ref().map_or(0, |eb| eb.used_len());

    if indices > 0 {
      return Some(DrawCall::Elements { count: indices });
    }

    match self.vertex_buffer {
      Some(ref vb) if !vb.is_empty() => Some(DrawCall::Arrays {
        first: 0,
        count: vb.rows(),
      }),
      _ => None,
    }
  }
}
