//! Draw a single white line across the window, in pixel coordinates.
//!
//! Usage: `line [WIDTH HEIGHT [TITLE]]`.
//!
//! Press <escape> to quit or close the window.

mod common;

use cgmath::{Matrix4, Vector3};
use glslwrap::{
  blending::Blending, depth_test::DepthComparison, Attribute, AttributeList, DrawObject, Mode,
  PipelineState, Program, ShaderVariable, VertexBuffer,
};
use glslwrap_glfw::GlfwSurface;
use log::{error, info};
use std::error::Error;

const VS: &str = "#version 330 core
layout (location = 0) in vec3 position;

uniform mat4 projection;
uniform mat4 view;
uniform mat4 model;

void main() {
  gl_Position = projection * view * model * vec4(position, 1.);
}";

const FS: &str = "#version 330 core
out vec4 frag;

uniform vec4 color;

void main() {
  frag = color;
}";

// two vertices of three components; the second one lies outside of smaller windows
const VERTICES: [f32; 6] = [0., 0., 0., 1920., 1080., 0.];

fn main() {
  env_logger::init();

  if let Err(e) = run() {
    error!("{}", e);
    std::process::exit(1);
  }
}

fn run() -> Result<(), Box<dyn Error>> {
  let args = common::Args::from_env(640, 480, "line");
  let mut surface = GlfwSurface::new_gl33(&args.title, args.window_opt())?;
  let ctx = &mut surface.context;

  let mut program = Program::compile(ctx, VS, FS)?;

  // origin at the top-left corner, y pointing down
  let projection: [[f32; 4]; 4] = cgmath::ortho(
    0.,
    args.width as f32,
    args.height as f32,
    0.,
    -100.,
    100.,
  )
  .into();
  let identity: [[f32; 4]; 4] = Matrix4::from_translation(Vector3::new(0., 0., 0.)).into();

  program.set(ShaderVariable::mat4("projection", projection));
  program.set(ShaderVariable::mat4("view", identity));
  program.set(ShaderVariable::mat4("model", identity));
  program.set(ShaderVariable::vec4("color", [1., 1., 1., 1.]));

  let mut line = DrawObject::new(ctx, program)?;
  line.set_vertex_buffer(VertexBuffer::new(ctx, &VERTICES, 3, 2)?);
  line.set_attributes(AttributeList::from(vec![Attribute::new(0, 3)?]));
  line.set_mode(Mode::Line);

  let pipeline_state = PipelineState::new()
    .set_depth_test(DepthComparison::Less)
    .set_blending(Blending::alpha());

  info!("rendering; press escape to quit");

  'app: loop {
    surface.context.window.glfw.poll_events();
    for (_, event) in glfw::flush_messages(&surface.events_rx) {
      if common::is_quit_event(&event) {
        break 'app;
      }
    }

    let size = surface.context.framebuffer_size();
    pipeline_state.apply(&mut surface.context, size);
    line.render(&mut surface.context)?;

    surface.context.swap_buffers();
  }

  Ok(())
}
