//! Draw a colored quad out of four vertices and six indices.
//!
//! Each vertex carries a position and a color, fed through two attributes. The quad slowly pulses
//! through a `float` uniform updated every frame.
//!
//! Usage: `indexed-quad [WIDTH HEIGHT [TITLE]]`.
//!
//! Press <escape> to quit or close the window.

mod common;

use glslwrap::{
  Attribute, AttributeList, DrawObject, ElementBuffer, Mode, PipelineState, Program,
  VertexBuffer,
};
use glslwrap_glfw::GlfwSurface;
use log::{error, info};
use std::{error::Error, time::Instant};

const VS: &str = "#version 330 core
layout (location = 0) in vec2 co;
layout (location = 1) in vec3 color;

out vec3 v_color;

void main() {
  gl_Position = vec4(co, 0., 1.);
  v_color = color;
}";

const FS: &str = "#version 330 core
in vec3 v_color;

out vec4 frag;

uniform float time;

void main() {
  frag = vec4(v_color * (.75 + .25 * sin(time)), 1.);
}";

// x, y, r, g, b
#[rustfmt::skip]
const VERTICES: [f32; 20] = [
  -0.5, -0.5, 1., 0., 0.,
   0.5, -0.5, 0., 1., 0.,
   0.5,  0.5, 0., 0., 1.,
  -0.5,  0.5, 1., 1., 1.,
];

#[rustfmt::skip]
const INDICES: [u32; 6] = [
  0, 1, 2,
  0, 2, 3,
];

fn main() {
  env_logger::init();

  if let Err(e) = run() {
    error!("{}", e);
    std::process::exit(1);
  }
}

fn run() -> Result<(), Box<dyn Error>> {
  let args = common::Args::from_env(640, 480, "indexed quad");
  let mut surface = GlfwSurface::new_gl33(&args.title, args.window_opt())?;
  let ctx = &mut surface.context;

  let program = Program::compile(ctx, VS, FS)?;

  let mut quad = DrawObject::new(ctx, program)?;
  quad.set_vertex_buffer(VertexBuffer::new(ctx, &VERTICES, 5, 4)?);
  quad.set_element_buffer(ElementBuffer::new(ctx, &INDICES, 3, 2)?);
  quad.set_attributes(
    [Attribute::new(0, 2)?, Attribute::new(1, 3)?]
      .into_iter()
      .collect::<AttributeList>(),
  );
  quad.set_mode(Mode::Triangle);

  let pipeline_state = PipelineState::new().set_clear_color([0.1, 0.1, 0.1, 1.]);
  let start_t = Instant::now();

  info!("rendering; press escape to quit");

  'app: loop {
    surface.context.window.glfw.poll_events();
    for (_, event) in glfw::flush_messages(&surface.events_rx) {
      if common::is_quit_event(&event) {
        break 'app;
      }
    }

    let t = start_t.elapsed().as_secs_f32();
    quad.program_mut().set_uniform("time", t);

    let size = surface.context.framebuffer_size();
    pipeline_state.apply(&mut surface.context, size);
    quad.render(&mut surface.context)?;

    surface.context.swap_buffers();
  }

  Ok(())
}
