//! Graphics state.
//!
//! [`GLState`] mirrors the parts of the OpenGL context the backend touches, so that a setting or
//! a binding equal to the current one issues no GL call.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

use crate::gl33::depth_test::{depth_comparison_to_glenum, glenum_to_depth_comparison};
use glslwrap::blending::Factor;
use glslwrap::depth_test::DepthComparison;

// one state per thread; taken by the first `GLState::new`
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Last value sent to the context for a setting.
///
/// `None` means the context value is unknown and the next update always goes through.
#[derive(Debug)]
struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn new(initial: Option<T>) -> Self {
    Cached(initial)
  }

  /// Record `value`; returns whether it differs from the cached one.
  fn update(&mut self, value: T) -> bool {
    if self.0.as_ref() == Some(&value) {
      false
    } else {
      self.0 = Some(value);
      true
    }
  }
}

/// Cached view of the current OpenGL context.
///
/// The type is neither `Send` nor `Sync`, and only one can exist per thread.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>,

  viewport: Cached<[GLint; 4]>,
  clear_color: Cached<[GLfloat; 4]>,
  blending_state: Cached<BlendingState>,
  blending_funcs: Cached<BlendingFactors>,
  depth_test: Cached<DepthTest>,
  depth_test_comparison: Cached<DepthComparison>,

  bound_array_buffer: GLuint,
  // part of the bound vertex array
  bound_element_array_buffer: GLuint,
  bound_vertex_array: GLuint,
  current_program: GLuint,
}

impl GLState {
  /// Take this thread’s state, reading the initial values from the current context.
  ///
  /// Fails with [`StateQueryError::UnavailableGLState`] on the second call on a thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    let available = TLS_ACQUIRE_GFX_STATE.with(|rc| rc.borrow_mut().take().is_some());

    if available {
      unsafe { Self::from_context() }
    } else {
      Err(StateQueryError::UnavailableGLState)
    }
  }

  unsafe fn from_context() -> Result<Self, StateQueryError> {
    Ok(GLState {
      _a: PhantomData,
      viewport: Cached::new(Some(get_ctx_viewport())),
      clear_color: Cached::new(Some(get_ctx_clear_color())),
      blending_state: Cached::new(Some(get_ctx_blending_state()?)),
      blending_funcs: Cached::new(get_ctx_blending_factors()?),
      depth_test: Cached::new(Some(get_ctx_depth_test()?)),
      depth_test_comparison: Cached::new(Some(get_ctx_depth_test_comparison()?)),
      bound_array_buffer: get_ctx_binding(gl::ARRAY_BUFFER_BINDING),
      bound_element_array_buffer: get_ctx_binding(gl::ELEMENT_ARRAY_BUFFER_BINDING),
      bound_vertex_array: get_ctx_binding(gl::VERTEX_ARRAY_BINDING),
      current_program: get_ctx_binding(gl::CURRENT_PROGRAM),
    })
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: [GLint; 4]) {
    if self.viewport.update(viewport) {
      let [x, y, w, h] = viewport;
      gl::Viewport(x, y, w, h);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.update(clear_color) {
      let [r, g, b, a] = clear_color;
      gl::ClearColor(r, g, b, a);
    }
  }

  pub(crate) unsafe fn set_blending_state(&mut self, state: BlendingState) {
    if self.blending_state.update(state) {
      toggle(gl::BLEND, state == BlendingState::On);
    }
  }

  pub(crate) unsafe fn set_blending_func(&mut self, src: Factor, dst: Factor) {
    if self.blending_funcs.update(BlendingFactors { src, dst }) {
      gl::BlendFunc(from_blending_factor(src), from_blending_factor(dst));
    }
  }

  pub(crate) unsafe fn set_depth_test(&mut self, depth_test: DepthTest) {
    if self.depth_test.update(depth_test) {
      toggle(gl::DEPTH_TEST, depth_test == DepthTest::On);
    }
  }

  pub(crate) unsafe fn set_depth_test_comparison(&mut self, comparison: DepthComparison) {
    if self.depth_test_comparison.update(comparison) {
      gl::DepthFunc(depth_comparison_to_glenum(comparison));
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_array_buffer != handle {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.bound_array_buffer = handle;
    }
  }

  pub(crate) unsafe fn bind_element_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_element_array_buffer != handle {
      gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, handle);
      self.bound_element_array_buffer = handle;
    }
  }

  /// Forget `handle` if it’s bound, before it gets deleted.
  pub(crate) unsafe fn unbind_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer == handle {
      self.bind_array_buffer(0, Bind::Cached);
    } else if self.bound_element_array_buffer == handle {
      self.bind_element_array_buffer(0, Bind::Cached);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_vertex_array != handle {
      gl::BindVertexArray(handle);
      self.bound_vertex_array = handle;
      // unknown until the backend binds one into this vertex array
      self.bound_element_array_buffer = 0;
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self, handle: GLuint) {
    if self.bound_vertex_array == handle {
      self.bind_vertex_array(0, Bind::Cached)
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program != handle {
      gl::UseProgram(handle);
      self.current_program = handle;
    }
  }

  pub(crate) fn unuse_program(&mut self, handle: GLuint) {
    // a deleted program can hand its name to the next one
    if self.current_program == handle {
      self.current_program = 0;
    }
  }
}

/// Whether a binding goes through the cache or is always issued.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

unsafe fn toggle(cap: GLenum, enabled: bool) {
  if enabled {
    gl::Enable(cap);
  } else {
    gl::Disable(cap);
  }
}

fn from_blending_factor(factor: Factor) -> GLenum {
  match factor {
    Factor::One => gl::ONE,
    Factor::Zero => gl::ZERO,
    Factor::SrcColor => gl::SRC_COLOR,
    Factor::SrcColorComplement => gl::ONE_MINUS_SRC_COLOR,
    Factor::DestColor => gl::DST_COLOR,
    Factor::DestColorComplement => gl::ONE_MINUS_DST_COLOR,
    Factor::SrcAlpha => gl::SRC_ALPHA,
    Factor::SrcAlphaComplement => gl::ONE_MINUS_SRC_ALPHA,
    Factor::DstAlpha => gl::DST_ALPHA,
    Factor::DstAlphaComplement => gl::ONE_MINUS_DST_ALPHA,
  }
}

fn from_gl_blending_factor(factor: GLenum) -> Option<Factor> {
  let factor = match factor {
    gl::ONE => Factor::One,
    gl::ZERO => Factor::Zero,
    gl::SRC_COLOR => Factor::SrcColor,
    gl::ONE_MINUS_SRC_COLOR => Factor::SrcColorComplement,
    gl::DST_COLOR => Factor::DestColor,
    gl::ONE_MINUS_DST_COLOR => Factor::DestColorComplement,
    gl::SRC_ALPHA => Factor::SrcAlpha,
    gl::ONE_MINUS_SRC_ALPHA => Factor::SrcAlphaComplement,
    gl::DST_ALPHA => Factor::DstAlpha,
    gl::ONE_MINUS_DST_ALPHA => Factor::DstAlphaComplement,
    _ => return None,
  };

  Some(factor)
}

/// Errors raised while reading the initial state of the context.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// A state was already taken on this thread.
  UnavailableGLState,
  /// `GL_BLEND` is neither enabled nor disabled.
  UnknownBlendingState(GLboolean),
  /// Source blending factor the backend doesn’t know.
  UnknownBlendingSrcFactor(GLenum),
  /// Destination blending factor the backend doesn’t know.
  UnknownBlendingDstFactor(GLenum),
  /// `GL_DEPTH_TEST` is neither enabled nor disabled.
  UnknownDepthTestState(GLboolean),
  /// Depth function the backend doesn’t know.
  UnknownDepthTestComparison(GLenum),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => {
        f.write_str("graphics state already taken on this thread")
      }
      StateQueryError::UnknownBlendingState(s) => write!(f, "unknown blending state: {}", s),
      StateQueryError::UnknownBlendingSrcFactor(k) => {
        write!(f, "unknown blending source factor: {:#x}", k)
      }
      StateQueryError::UnknownBlendingDstFactor(k) => {
        write!(f, "unknown blending destination factor: {:#x}", k)
      }
      StateQueryError::UnknownDepthTestState(s) => write!(f, "unknown depth test state: {}", s),
      StateQueryError::UnknownDepthTestComparison(c) => {
        write!(f, "unknown depth test comparison: {:#x}", c)
      }
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_ctx_viewport() -> [GLint; 4] {
  let mut data = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_clear_color() -> [GLfloat; 4] {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_enum(pname: GLenum) -> GLenum {
  let mut value = 0 as GLint;
  gl::GetIntegerv(pname, &mut value);
  value as GLenum
}

unsafe fn get_ctx_binding(pname: GLenum) -> GLuint {
  get_ctx_enum(pname)
}

unsafe fn get_ctx_blending_state() -> Result<BlendingState, StateQueryError> {
  match gl::IsEnabled(gl::BLEND) {
    gl::TRUE => Ok(BlendingState::On),
    gl::FALSE => Ok(BlendingState::Off),
    state => Err(StateQueryError::UnknownBlendingState(state)),
  }
}

/// Blending factors of the context, or `None` if color and alpha use different ones.
unsafe fn get_ctx_blending_factors() -> Result<Option<BlendingFactors>, StateQueryError> {
  let src = |pname| {
    let k = get_ctx_enum(pname);
    from_gl_blending_factor(k).ok_or(StateQueryError::UnknownBlendingSrcFactor(k))
  };
  let dst = |pname| {
    let k = get_ctx_enum(pname);
    from_gl_blending_factor(k).ok_or(StateQueryError::UnknownBlendingDstFactor(k))
  };

  let rgb = BlendingFactors {
    src: src(gl::BLEND_SRC_RGB)?,
    dst: dst(gl::BLEND_DST_RGB)?,
  };
  let alpha = BlendingFactors {
    src: src(gl::BLEND_SRC_ALPHA)?,
    dst: dst(gl::BLEND_DST_ALPHA)?,
  };

  Ok(split_factors(rgb, alpha))
}

// `glBlendFunc` sets color and alpha factors together
fn split_factors(rgb: BlendingFactors, alpha: BlendingFactors) -> Option<BlendingFactors> {
  if rgb == alpha {
    Some(rgb)
  } else {
    None
  }
}

unsafe fn get_ctx_depth_test() -> Result<DepthTest, StateQueryError> {
  match gl::IsEnabled(gl::DEPTH_TEST) {
    gl::TRUE => Ok(DepthTest::On),
    gl::FALSE => Ok(DepthTest::Off),
    state => Err(StateQueryError::UnknownDepthTestState(state)),
  }
}

unsafe fn get_ctx_depth_test_comparison() -> Result<DepthComparison, StateQueryError> {
  let func = get_ctx_enum(gl::DEPTH_FUNC);
  glenum_to_depth_comparison(func).ok_or(StateQueryError::UnknownDepthTestComparison(func))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum BlendingState {
  On,
  Off,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct BlendingFactors {
  src: Factor,
  dst: Factor,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum DepthTest {
  On,
  Off,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cached_value_updates_only_on_change() {
    let mut cached = Cached::new(Some([0, 0, 640, 480]));

    assert!(!cached.update([0, 0, 640, 480]));
    assert!(cached.update([0, 0, 800, 600]));
    assert!(!cached.update([0, 0, 800, 600]));
  }

  #[test]
  fn unknown_value_always_updates() {
    let mut cached = Cached::new(None);

    assert!(cached.update(DepthTest::On));
    assert!(!cached.update(DepthTest::On));
  }

  #[test]
  fn split_blending_factors_are_unknown() {
    let alpha_blending = BlendingFactors {
      src: Factor::SrcAlpha,
      dst: Factor::SrcAlphaComplement,
    };
    let additive = BlendingFactors {
      src: Factor::One,
      dst: Factor::One,
    };

    assert_eq!(
      split_factors(alpha_blending, alpha_blending),
      Some(alpha_blending)
    );
    assert_eq!(split_factors(alpha_blending, additive), None);
  }

  #[test]
  fn blending_factors_to_glenum() {
    assert_eq!(from_blending_factor(Factor::SrcAlpha), gl::SRC_ALPHA);
    assert_eq!(
      from_blending_factor(Factor::SrcAlphaComplement),
      gl::ONE_MINUS_SRC_ALPHA
    );
    assert_eq!(from_gl_blending_factor(gl::ONE_MINUS_DST_ALPHA), Some(Factor::DstAlphaComplement));
    assert_eq!(from_gl_blending_factor(gl::SRC_ALPHA_SATURATE), None);
  }
}
