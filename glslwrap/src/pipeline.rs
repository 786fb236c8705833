//! Per-frame render state.
//!
//! A [`PipelineState`] gathers what has to be set once per frame before rendering
//! [`DrawObject`]s: the viewport, depth test, blending and the buffers to clear.
//!
//! [`DrawObject`]: crate::draw::DrawObject

use crate::backend::pipeline::Pipeline;
use crate::blending::Blending;
use crate::context::GraphicsContext;
use crate::depth_test::DepthComparison;

/// The viewport being part of the [`PipelineState`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Viewport {
  /// The whole viewport is used. The dimension of the viewport rectangle is the framebuffer’s.
  Whole,
  /// The viewport is specific and the rectangle area is user-defined.
  Specific {
    /// The lower position on the X axis to start the viewport rectangle at.
    x: u32,
    /// The lower position on the Y axis to start the viewport rectangle at.
    y: u32,
    /// The width of the viewport.
    width: u32,
    /// The height of the viewport.
    height: u32,
  },
}

impl Viewport {
  /// Resolve the viewport rectangle as `[x, y, width, height]` for a framebuffer of `size`.
  pub fn rect(&self, size: [u32; 2]) -> [u32; 4] {
    match *self {
      Viewport::Whole => [0, 0, size[0], size[1]],
      Viewport::Specific {
        x,
        y,
        width,
        height,
      } => [x, y, width, height],
    }
  }
}

/// Various customization options for a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineState {
  /// Color to use when clearing the color buffer; `None` doesn’t clear it.
  pub clear_color: Option<[f32; 4]>,
  /// Whether the depth buffer is cleared.
  pub clear_depth: bool,
  /// Viewport to use when rendering.
  pub viewport: Viewport,
  /// Depth test comparison; `None` disables the depth test.
  pub depth_test: Option<DepthComparison>,
  /// Blending factors; `None` disables blending.
  pub blending: Option<Blending>,
}

impl Default for PipelineState {
  /// Default [`PipelineState`]:
  ///
  /// - Clear color is `Some([0., 0., 0., 1.])`.
  /// - The depth buffer is cleared.
  /// - The viewport uses the whole framebuffer’s.
  /// - Depth test is disabled.
  /// - Blending is disabled.
  fn default() -> Self {
    PipelineState {
      clear_color: Some([0., 0., 0., 1.]),
      clear_depth: true,
      viewport: Viewport::Whole,
      depth_test: None,
      blending: None,
    }
  }
}

impl PipelineState {
  /// Create a default [`PipelineState`].
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_clear_color(self, clear_color: impl Into<Option<[f32; 4]>>) -> Self {
    Self {
      clear_color: clear_color.into(),
      ..self
    }
  }

  pub fn enable_clear_depth(self, clear_depth: bool) -> Self {
    Self {
      clear_depth,
      ..self
    }
  }

  pub fn set_viewport(self, viewport: Viewport) -> Self {
    Self { viewport, ..self }
  }

  pub fn set_depth_test(self, depth_test: impl Into<Option<DepthComparison>>) -> Self {
    Self {
      depth_test: depth_test.into(),
      ..self
    }
  }

  pub fn set_blending(self, blending: impl Into<Option<Blending>>) -> Self {
    Self {
      blending: blending.into(),
      ..self
    }
  }

  /// Apply the state and clear the requested buffers of a framebuffer of `size`.
  pub fn apply<C>(&self, ctx: &mut C, size: [u32; 2])
  where
    C: ?Sized + GraphicsContext,
    C::Backend: Pipeline,
  {
    unsafe { ctx.backend().start_frame(self, size) };
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{Call, Recorder};

  #[test]
  fn whole_viewport_follows_the_framebuffer() {
    assert_eq!(Viewport::Whole.rect([640, 480]), [0, 0, 640, 480]);

    let specific = Viewport::Specific {
      x: 10,
      y: 20,
      width: 100,
      height: 50,
    };
    assert_eq!(specific.rect([640, 480]), [10, 20, 100, 50]);
  }

  #[test]
  fn builder() {
    let state = PipelineState::new()
      .set_clear_color(None)
      .set_depth_test(DepthComparison::Less)
      .set_blending(Blending::alpha());

    assert_eq!(state.clear_color, None);
    assert!(state.clear_depth);
    assert_eq!(state.depth_test, Some(DepthComparison::Less));
    assert_eq!(state.blending, Some(Blending::alpha()));
  }

  #[test]
  fn apply_forwards_to_the_backend() {
    let mut ctx = Recorder::new();
    let state = PipelineState::new().set_depth_test(DepthComparison::Less);
    state.apply(&mut ctx, [640, 480]);

    assert_eq!(ctx.calls(), vec![Call::StartFrame(state, [640, 480])]);
  }
}
