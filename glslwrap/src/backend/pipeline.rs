//! Pipeline backend interface.

use crate::pipeline::PipelineState;

/// Pipeline backend.
pub unsafe trait Pipeline {
  /// Apply the per-frame state and clear the requested buffers.
  ///
  /// `size` is the size of the framebuffer being rendered to, used with
  /// [`Viewport::Whole`](crate::pipeline::Viewport::Whole).
  unsafe fn start_frame(&mut self, state: &PipelineState, size: [u32; 2]);
}
