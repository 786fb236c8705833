//! Recording backend used by unit tests.
//!
//! Every backend call is appended to a shared log, and every representation pushes its deletion
//! to the same log when dropped. Handles are allocated from a single counter starting at 1, in
//! creation order, uniform locations included.

use crate::attribute::AttributeLayout;
use crate::backend::buffer::Buffer;
use crate::backend::pipeline::Pipeline;
use crate::backend::shader::Shader;
use crate::backend::vertex_array::{VertexArray, VertexArrayError};
use crate::buffer::{BufferError, BufferTarget};
use crate::context::GraphicsContext;
use crate::draw::{DrawCall, Mode};
use crate::pipeline::PipelineState;
use crate::shader::{ProgramError, StageError, StageType, UniformValue};
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
  NewStage(u32, StageType),
  DeleteStage(u32),
  NewProgram(u32, u32, u32),
  DeleteProgram(u32),
  UseProgram(u32),
  UniformLocation(u32, String),
  SetUniform(i32, UniformValue),
  NewBuffer(u32),
  DeleteBuffer(u32),
  Upload {
    buffer: u32,
    target: BufferTarget,
    len: usize,
    bytes: usize,
  },
  NewVertexArray(u32),
  DeleteVertexArray(u32),
  BindVertexArray(u32),
  SetVertexAttrib(u32, AttributeLayout),
  BindElementBuffer(u32),
  Draw(Mode, DrawCall),
  StartFrame(PipelineState, [u32; 2]),
}

type Log = Rc<RefCell<Vec<Call>>>;

#[derive(Clone, Copy, Debug)]
enum Kind {
  Stage,
  Program,
  Buffer,
  VertexArray,
}

#[derive(Debug)]
pub(crate) struct Handle {
  id: u32,
  kind: Kind,
  log: Log,
}

impl Drop for Handle {
  fn drop(&mut self) {
    let call = match self.kind {
      Kind::Stage => Call::DeleteStage(self.id),
      Kind::Program => Call::DeleteProgram(self.id),
      Kind::Buffer => Call::DeleteBuffer(self.id),
      Kind::VertexArray => Call::DeleteVertexArray(self.id),
    };

    self.log.borrow_mut().push(call);
  }
}

#[derive(Debug, Default)]
pub(crate) struct Recorder {
  log: Log,
  next_id: u32,
  failing_stage: Option<(StageType, String)>,
  failing_link: Option<String>,
  inactive_uniforms: Vec<String>,
}

impl Recorder {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn fail_stage(mut self, ty: StageType, log: &str) -> Self {
    self.failing_stage = Some((ty, log.to_owned()));
    self
  }

  pub(crate) fn fail_link(mut self, log: &str) -> Self {
    self.failing_link = Some(log.to_owned());
    self
  }

  pub(crate) fn inactive_uniform(mut self, name: &str) -> Self {
    self.inactive_uniforms.push(name.to_owned());
    self
  }

  pub(crate) fn calls(&self) -> Vec<Call> {
    self.log.borrow().clone()
  }

  pub(crate) fn take_calls(&mut self) -> Vec<Call> {
    mem::take(&mut *self.log.borrow_mut())
  }

  fn record(&self, call: Call) {
    self.log.borrow_mut().push(call);
  }

  fn next_id(&mut self) -> u32 {
    self.next_id += 1;
    self.next_id
  }

  fn handle(&mut self, kind: Kind) -> Handle {
    Handle {
      id: self.next_id(),
      kind,
      log: self.log.clone(),
    }
  }
}

unsafe impl GraphicsContext for Recorder {
  type Backend = Self;

  fn backend(&mut self) -> &mut Self::Backend {
    self
  }
}

unsafe impl Shader for Recorder {
  type StageRepr = Handle;
  type ProgramRepr = Handle;
  type UniformLocation = i32;

  unsafe fn new_stage(&mut self, ty: StageType, _: &str) -> Result<Self::StageRepr, StageError> {
    if let Some((failing_ty, ref log)) = self.failing_stage {
      if failing_ty == ty {
        return Err(StageError::compilation_failed(ty, log.as_str()));
      }
    }

    let handle = self.handle(Kind::Stage);
    self.record(Call::NewStage(handle.id, ty));
    Ok(handle)
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    if let Some(ref log) = self.failing_link {
      return Err(ProgramError::link_failed(log.as_str()));
    }

    let handle = self.handle(Kind::Program);
    self.record(Call::NewProgram(handle.id, vertex.id, fragment.id));
    Ok(handle)
  }

  unsafe fn use_program(&mut self, program: &Self::ProgramRepr) {
    self.record(Call::UseProgram(program.id));
  }

  unsafe fn uniform_location(
    &mut self,
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Option<Self::UniformLocation> {
    self.record(Call::UniformLocation(program.id, name.to_owned()));

    if self.inactive_uniforms.iter().any(|n| n == name) {
      None
    } else {
      Some(self.next_id() as i32)
    }
  }

  unsafe fn set_uniform(&mut self, location: Self::UniformLocation, value: &UniformValue) {
    self.record(Call::SetUniform(location, *value));
  }
}

unsafe impl Buffer for Recorder {
  type BufferRepr = Handle;

  unsafe fn new_buffer(&mut self) -> Result<Self::BufferRepr, BufferError> {
    let handle = self.handle(Kind::Buffer);
    self.record(Call::NewBuffer(handle.id));
    Ok(handle)
  }

  unsafe fn upload<T>(&mut self, buffer: &Self::BufferRepr, target: BufferTarget, values: &[T])
  where
    T: Copy,
  {
    self.record(Call::Upload {
      buffer: buffer.id,
      target,
      len: values.len(),
      bytes: mem::size_of_val(values),
    });
  }
}

unsafe impl VertexArray for Recorder {
  type VertexArrayRepr = Handle;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError> {
    let handle = self.handle(Kind::VertexArray);
    self.record(Call::NewVertexArray(handle.id));
    Ok(handle)
  }

  unsafe fn bind_vertex_array(&mut self, vertex_array: &Self::VertexArrayRepr) {
    self.record(Call::BindVertexArray(vertex_array.id));
  }

  unsafe fn set_vertex_attrib(&mut self, buffer: &Self::BufferRepr, layout: &AttributeLayout) {
    self.record(Call::SetVertexAttrib(buffer.id, *layout));
  }

  unsafe fn bind_element_buffer(&mut self, buffer: &Self::BufferRepr) {
    self.record(Call::BindElementBuffer(buffer.id));
  }

  unsafe fn draw(&mut self, mode: Mode, call: DrawCall) {
    self.record(Call::Draw(mode, call));
  }
}

unsafe impl Pipeline for Recorder {
  unsafe fn start_frame(&mut self, state: &PipelineState, size: [u32; 2]) {
    self.record(Call::StartFrame(state.clone(), size));
  }
}
