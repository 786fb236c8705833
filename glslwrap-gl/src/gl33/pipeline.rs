use crate::gl33::{
  state::{BlendingState, DepthTest},
  GL33,
};
use gl::{self, types::*};
use glslwrap::{backend::pipeline::Pipeline, pipeline::PipelineState};

unsafe impl Pipeline for GL33 {
  unsafe fn start_frame(&mut self, pipeline_state: &PipelineState, size: [u32; 2]) {
    let mut state = self.state.borrow_mut();

    let PipelineState {
      clear_color,
      clear_depth,
      viewport,
      depth_test,
      blending,
    } = *pipeline_state;

    let [x, y, width, height] = viewport.rect(size);
    state.set_viewport([x as GLint, y as GLint, width as GLint, height as GLint]);

    match depth_test {
      Some(comparison) => {
        state.set_depth_test(DepthTest::On);
        state.set_depth_test_comparison(comparison);
      }

      None => state.set_depth_test(DepthTest::Off),
    }

    match blending {
      Some(blending) => {
        state.set_blending_state(BlendingState::On);
        state.set_blending_func(blending.src, blending.dst);
      }

      None => state.set_blending_state(BlendingState::Off),
    }

    if let Some(clear_color) = clear_color {
      state.set_clear_color(clear_color);
    }

    if clear_color.is_some() || clear_depth {
      let color_bit = if clear_color.is_some() {
        gl::COLOR_BUFFER_BIT
      } else {
        0
      };
      let depth_bit = if clear_depth {
        gl::DEPTH_BUFFER_BIT
      } else {
        0
      };
      gl::Clear(color_bit | depth_bit);
    }
  }
}
