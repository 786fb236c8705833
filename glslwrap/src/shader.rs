//! Shader programs and their uniform variables.
//!
//! A [`Program`] is made of a vertex stage and a fragment stage, compiled and linked in one go by
//! [`Program::compile`]. On top of the native program, it keeps a table of [`ShaderVariable`]s:
//! named uniform values that you set whenever you want and that get uploaded to the GPU by
//! [`Program::update`] (or automatically when rendering a [`DrawObject`]).
//!
//! Uniform state lives in the native program object, so a value is only uploaded again once it
//! has changed. Uniform locations are looked up once per name and cached.
//!
//! [`DrawObject`]: crate::draw::DrawObject

use crate::backend::shader::Shader;
use crate::context::GraphicsContext;
use log::{debug, error, warn};
use std::collections::btree_map::{BTreeMap, Entry};
use std::error;
use std::fmt;

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile. Carries the compiler log.
  CompilationFailed(StageType, String),
}

impl StageError {
  /// Occurs when a shader fails to compile.
  pub fn compilation_failed(ty: StageType, reason: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, reason.into())
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`Program`] can generate.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl ProgramError {
  /// Program link failed.
  pub fn link_failed(reason: impl Into<String>) -> Self {
    ProgramError::LinkFailed(reason.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      ProgramError::LinkFailed(_) => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// Value of a uniform variable.
///
/// Matrices are column-major, the same layout GLSL uses, and are uploaded untransposed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
  /// `int`.
  Int(i32),
  /// `float`.
  Float(f32),
  /// `vec2`.
  Vec2([f32; 2]),
  /// `vec3`.
  Vec3([f32; 3]),
  /// `vec4`.
  Vec4([f32; 4]),
  /// `mat3`.
  Mat3([[f32; 3]; 3]),
  /// `mat4`.
  Mat4([[f32; 4]; 4]),
}

macro_rules! impl_from_uniform_value {
  ($($t:ty => $v:ident),* $(,)?) => {
    $(
      impl From<$t> for UniformValue {
        fn from(x: $t) -> Self {
          UniformValue::$v(x)
        }
      }
    )*
  }
}

impl_from_uniform_value!(
  i32 => Int,
  f32 => Float,
  [f32; 2] => Vec2,
  [f32; 3] => Vec3,
  [f32; 4] => Vec4,
  [[f32; 3]; 3] => Mat3,
  [[f32; 4]; 4] => Mat4,
);

/// A named uniform value, to be stored in a [`Program`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderVariable {
  name: String,
  value: UniformValue,
}

impl ShaderVariable {
  /// Create a variable from any uniformable value.
  pub fn new(name: impl Into<String>, value: impl Into<UniformValue>) -> Self {
    ShaderVariable {
      name: name.into(),
      value: value.into(),
    }
  }

  /// Create a `mat4` variable.
  pub fn mat4(name: impl Into<String>, value: [[f32; 4]; 4]) -> Self {
    Self::new(name, value)
  }

  /// Create a `vec4` variable.
  pub fn vec4(name: impl Into<String>, value: [f32; 4]) -> Self {
    Self::new(name, value)
  }

  /// Name of the uniform this variable targets.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Value of the variable.
  pub fn value(&self) -> &UniformValue {
    &self.value
  }
}

// Where a variable lives in the program.
#[derive(Clone, Copy, Debug)]
enum Location<L> {
  Unresolved,
  Active(L),
  Inactive,
}

#[derive(Debug)]
struct Slot<L> {
  value: UniformValue,
  location: Location<L>,
  dirty: bool,
}

impl<L> Slot<L> {
  fn new(value: UniformValue) -> Self {
    Slot {
      value,
      location: Location::Unresolved,
      dirty: true,
    }
  }
}

/// A linked shader program along with its uniform variables.
pub struct Program<B>
where
  B: ?Sized + Shader,
{
  // drop order matters: the program goes before its stages
  repr: B::ProgramRepr,
  _vertex: B::StageRepr,
  _fragment: B::StageRepr,
  variables: BTreeMap<String, Slot<B::UniformLocation>>,
}

impl<B> Program<B>
where
  B: ?Sized + Shader,
{
  /// Compile a vertex and a fragment stage and link them into a new program.
  ///
  /// Native objects created before a failure are released before returning the error.
  pub fn compile<C>(ctx: &mut C, vertex_src: &str, fragment_src: &str) -> Result<Self, ProgramError>
  where
    C: ?Sized + GraphicsContext<Backend = B>,
  {
    let backend = ctx.backend();

    let vertex = unsafe { backend.new_stage(StageType::VertexShader, vertex_src) }
      .map_err(log_program_error)?;
    let fragment = unsafe { backend.new_stage(StageType::FragmentShader, fragment_src) }
      .map_err(log_program_error)?;
    let repr = unsafe { backend.new_program(&vertex, &fragment) }.map_err(log_program_error)?;

    debug!("shader program linked");

    Ok(Program {
      repr,
      _vertex: vertex,
      _fragment: fragment,
      variables: BTreeMap::new(),
    })
  }

  /// Backend representation of the program.
  pub fn repr(&self) -> &B::ProgramRepr {
    &self.repr
  }

  /// Store a variable, replacing any variable with the same name.
  ///
  /// Setting a value equal to the stored one doesn’t schedule a new upload.
  pub fn set(&mut self, variable: ShaderVariable) {
    let ShaderVariable { name, value } = variable;

    match self.variables.entry(name) {
      Entry::Occupied(mut entry) => {
        let slot = entry.get_mut();

        if slot.value != value {
          slot.value = value;
          slot.dirty = true;
        }
      }

      Entry::Vacant(entry) => {
        entry.insert(Slot::new(value));
      }
    }
  }

  /// Shortcut for [`Program::set`].
  pub fn set_uniform(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) {
    self.set(ShaderVariable::new(name, value));
  }

  /// Get the value of a variable.
  pub fn variable(&self, name: &str) -> Option<&UniformValue> {
    self.variables.get(name).map(|slot| &slot.value)
  }

  /// Iterate over all variables, ordered by name.
  pub fn variables(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
    self
      .variables
      .iter()
      .map(|(name, slot)| (name.as_str(), &slot.value))
  }

  /// Forget about a variable.
  ///
  /// The uniform keeps its last uploaded value on the GPU.
  pub fn remove(&mut self, name: &str) -> Option<UniformValue> {
    self.variables.remove(name).map(|slot| slot.value)
  }

  /// Whether some variables still have to be uploaded.
  pub fn is_dirty(&self) -> bool {
    self.variables.values().any(|slot| slot.dirty)
  }

  /// Make this program current and upload every variable that changed since the last update.
  pub fn update<C>(&mut self, ctx: &mut C)
  where
    C: ?Sized + GraphicsContext<Backend = B>,
  {
    let backend = ctx.backend();
    self.bind(backend);
    self.upload_dirty(backend);
  }

  pub(crate) fn bind(&self, backend: &mut B) {
    unsafe { backend.use_program(&self.repr) };
  }

  // expects the program to be current
  pub(crate) fn upload_dirty(&mut self, backend: &mut B) {
    let Program {
      repr, variables, ..
    } = self;

    for (name, slot) in variables.iter_mut().filter(|(_, slot)| slot.dirty) {
      slot.dirty = false;

      if let Location::Unresolved = slot.location {
        slot.location = match unsafe { backend.uniform_location(repr, name) } {
          Some(location) => Location::Active(location),
          None => {
            warn!("uniform {} is not active in the program; ignoring it", name);
            Location::Inactive
          }
        };
      }

      if let Location::Active(location) = slot.location {
        unsafe { backend.set_uniform(location, &slot.value) };
      }
    }
  }
}

fn log_program_error<E>(e: E) -> ProgramError
where
  E: Into<ProgramError>,
{
  let e = e.into();
  error!("{}", e);
  e
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{Call, Recorder};

  const VS: &str = "void main() {}";
  const FS: &str = "void main() {}";

  fn set_uniforms(calls: &[Call]) -> Vec<(i32, UniformValue)> {
    calls
      .iter()
      .filter_map(|call| match call {
        Call::SetUniform(l, v) => Some((*l, *v)),
        _ => None,
      })
      .collect()
  }

  #[test]
  fn compile_creates_stages_then_links() {
    let mut ctx = Recorder::new();
    let program = Program::compile(&mut ctx, VS, FS).unwrap();

    assert_eq!(
      ctx.calls(),
      vec![
        Call::NewStage(1, StageType::VertexShader),
        Call::NewStage(2, StageType::FragmentShader),
        Call::NewProgram(3, 1, 2),
      ]
    );

    drop(program);

    assert_eq!(
      &ctx.calls()[3..],
      &[
        Call::DeleteProgram(3),
        Call::DeleteStage(1),
        Call::DeleteStage(2)
      ]
    );
  }

  #[test]
  fn fragment_failure_releases_vertex_stage() {
    let mut ctx = Recorder::new().fail_stage(StageType::FragmentShader, "0:1: syntax error");
    let err = Program::compile(&mut ctx, VS, FS).err();

    assert_eq!(
      err,
      Some(ProgramError::StageError(StageError::CompilationFailed(
        StageType::FragmentShader,
        "0:1: syntax error".to_owned()
      )))
    );
    assert_eq!(
      ctx.calls(),
      vec![
        Call::NewStage(1, StageType::VertexShader),
        Call::DeleteStage(1)
      ]
    );
  }

  #[test]
  fn link_failure_releases_both_stages() {
    let mut ctx = Recorder::new().fail_link("missing main");
    let err = Program::compile(&mut ctx, VS, FS).err();

    assert_eq!(err, Some(ProgramError::link_failed("missing main")));
    assert_eq!(
      &ctx.calls()[2..],
      &[Call::DeleteStage(2), Call::DeleteStage(1)]
    );
  }

  #[test]
  fn error_messages() {
    let e = ProgramError::from(StageError::compilation_failed(
      StageType::VertexShader,
      "oops",
    ));

    assert_eq!(
      e.to_string(),
      "shader program has stage error: vertex shader compilation error: oops"
    );
    assert!(error::Error::source(&e).is_some());
  }

  #[test]
  fn set_replaces_by_name() {
    let mut ctx = Recorder::new();
    let mut program = Program::compile(&mut ctx, VS, FS).unwrap();

    program.set(ShaderVariable::vec4("color", [1., 1., 1., 1.]));
    program.set(ShaderVariable::vec4("color", [1., 0., 0., 1.]));
    program.set_uniform("scale", 2f32);

    let vars = program.variables().collect::<Vec<_>>();
    assert_eq!(
      vars,
      vec![
        ("color", &UniformValue::Vec4([1., 0., 0., 1.])),
        ("scale", &UniformValue::Float(2.))
      ]
    );
    assert_eq!(program.remove("scale"), Some(UniformValue::Float(2.)));
    assert_eq!(program.variable("scale"), None);
  }

  #[test]
  fn update_uploads_only_dirty_variables() {
    let mut ctx = Recorder::new();
    let mut program = Program::compile(&mut ctx, VS, FS).unwrap();
    ctx.take_calls();

    program.set(ShaderVariable::mat4("model", IDENTITY));
    program.set(ShaderVariable::vec4("color", [1., 1., 1., 1.]));
    program.update(&mut ctx);

    let first = ctx.take_calls();
    assert_eq!(first[0], Call::UseProgram(3));
    assert_eq!(
      set_uniforms(&first),
      vec![
        (4, UniformValue::Vec4([1., 1., 1., 1.])),
        (5, UniformValue::Mat4(IDENTITY))
      ]
    );
    assert!(!program.is_dirty());

    // unchanged value, nothing to upload
    program.set(ShaderVariable::vec4("color", [1., 1., 1., 1.]));
    program.update(&mut ctx);
    assert!(set_uniforms(&ctx.take_calls()).is_empty());

    program.set(ShaderVariable::vec4("color", [0., 1., 0., 1.]));
    program.update(&mut ctx);

    let calls = ctx.take_calls();
    // the location is cached
    assert!(!calls
      .iter()
      .any(|c| matches!(c, Call::UniformLocation(..))));
    assert_eq!(
      set_uniforms(&calls),
      vec![(4, UniformValue::Vec4([0., 1., 0., 1.]))]
    );
  }

  #[test]
  fn inactive_uniforms_are_looked_up_once() {
    let mut ctx = Recorder::new().inactive_uniform("unused");
    let mut program = Program::compile(&mut ctx, VS, FS).unwrap();

    program.set_uniform("unused", 1i32);
    program.update(&mut ctx);
    program.set_uniform("unused", 2i32);
    program.update(&mut ctx);

    let lookups = ctx
      .calls()
      .into_iter()
      .filter(|c| matches!(c, Call::UniformLocation(..)))
      .count();
    assert_eq!(lookups, 1);
    assert!(set_uniforms(&ctx.calls()).is_empty());
  }

  const IDENTITY: [[f32; 4]; 4] = [
    [1., 0., 0., 0.],
    [0., 1., 0., 0.],
    [0., 0., 1., 0.],
    [0., 0., 0., 1.],
  ];
}
