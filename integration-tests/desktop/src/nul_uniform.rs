use glslwrap::{DrawObject, Program};
use glslwrap_glfw::GlfwSurface;
use glslwrap_windowing::WindowOpt;

const VS: &str = "#version 330 core
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
  let mut surface = GlfwSurface::new_gl33("NUL in uniform name", WindowOpt::default()).unwrap();
  let ctx = &mut surface.context;

  let mut program = Program::compile(ctx, VS, FS).unwrap();
  program.set_uniform("col\0or", [1f32, 0., 0., 1.]);
  program.set_uniform("color", [0f32, 1., 0., 1.]);

  let mut draw_object = DrawObject::new(ctx, program).unwrap();

  // the name can’t reach the driver; it ends up like any inactive uniform
  assert_eq!(draw_object.render(ctx).unwrap(), None);
  assert!(!draw_object.program().is_dirty());

  draw_object.program_mut().set_uniform("col\0or", [0f32, 0., 1., 1.]);
  draw_object.render(ctx).unwrap();
  assert!(!draw_object.program().is_dirty());
}
