use gl::types::*;
use glslwrap::{
  draw::DrawCall, Attribute, AttributeList, DrawObject, ElementBuffer, Mode, PipelineState,
  Program, VertexBuffer,
};
use glslwrap_glfw::GlfwSurface;
use glslwrap_windowing::WindowOpt;

const VS: &str = "#version 330 core
layout (location = 0) in vec2 co;

void main() {
  gl_Position = vec4(co, 0., 1.);
}";

const FS: &str = "#version 330 core
out vec4 frag;

uniform vec4 color;

void main() {
  frag = color;
}";

// a quad covering the whole viewport
#[rustfmt::skip]
const VERTICES: [f32; 8] = [
  -1., -1.,
   1., -1.,
   1.,  1.,
  -1.,  1.,
];

const INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Indexed draw", WindowOpt::default()).unwrap();
  let ctx = &mut surface.context;

  let mut program = Program::compile(ctx, VS, FS).unwrap();
  program.set_uniform("color", [1f32, 0., 0., 1.]);

  let mut quad = DrawObject::new(ctx, program).unwrap();
  quad.set_vertex_buffer(VertexBuffer::new(ctx, &VERTICES, 2, 4).unwrap());
  quad.set_element_buffer(ElementBuffer::new(ctx, &INDICES, 3, 2).unwrap());
  quad.set_attributes(AttributeList::from(vec![Attribute::new(0, 2).unwrap()]));
  quad.set_mode(Mode::Triangle);

  let size = ctx.framebuffer_size();
  PipelineState::new().apply(ctx, size);

  let call = quad.render(ctx).unwrap();
  assert_eq!(call, Some(DrawCall::Elements { count: 6 }));

  let mut pixel = [0u8; 4];
  unsafe {
    gl::Finish();
    gl::ReadPixels(
      (size[0] / 2) as GLint,
      (size[1] / 2) as GLint,
      1,
      1,
      gl::RGBA,
      gl::UNSIGNED_BYTE,
      pixel.as_mut_ptr() as *mut _,
    );
  }

  assert_eq!(pixel, [255, 0, 0, 255]);
}
