use glslwrap::{DrawObject, Program};
use glslwrap_glfw::GlfwSurface;
use glslwrap_windowing::WindowOpt;

const VS: &str = "#version 330 core
uniform float unused;

void main() {
  gl_Position = vec4(0., 0., 0., 1.);
}";

const FS: &str = "#version 330 core
out vec4 frag;

uniform vec4 color;

void main() {
  frag = color;
}";

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Inactive uniform", WindowOpt::default()).unwrap();
  let ctx = &mut surface.context;

  let mut program = Program::compile(ctx, VS, FS).unwrap();
  program.set_uniform("unused", 1f32);
  program.set_uniform("color", [1f32, 0., 0., 1.]);
  program.set_uniform("not_declared", 2i32);

  let mut draw_object = DrawObject::new(ctx, program).unwrap();

  // no geometry: uniforms are uploaded but nothing is drawn
  let call = draw_object.render(ctx).unwrap();
  assert_eq!(call, None);
  assert!(!draw_object.program().is_dirty());

  // inactive uniforms are not looked up again
  draw_object.program_mut().set_uniform("unused", 3f32);
  draw_object.render(ctx).unwrap();
  assert!(!draw_object.program().is_dirty());
}
