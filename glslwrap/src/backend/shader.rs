//! Shader backend interface.

use crate::shader::{ProgramError, StageError, StageType, UniformValue};

/// Shader backend.
///
/// Stage and program representations release their native objects when dropped.
pub unsafe trait Shader {
  /// Backend representation of a compiled shader stage.
  type StageRepr;

  /// Backend representation of a linked shader program.
  type ProgramRepr;

  /// Location of an active uniform inside a program.
  type UniformLocation: Copy;

  /// Create and compile a shader stage.
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Create a program, attach both stages and link it.
  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Make the program the current one.
  unsafe fn use_program(&mut self, program: &Self::ProgramRepr);

  /// Look up the location of an active uniform; `None` if the uniform is inactive or unknown.
  unsafe fn uniform_location(
    &mut self,
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Option<Self::UniformLocation>;

  /// Upload a value to a uniform location of the current program.
  unsafe fn set_uniform(&mut self, location: Self::UniformLocation, value: &UniformValue);
}
