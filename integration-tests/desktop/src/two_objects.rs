use gl::types::*;
use glslwrap::{
  draw::DrawCall, Attribute, AttributeList, DrawObject, ElementBuffer, PipelineState, Program,
  VertexBuffer,
};
use glslwrap_gl::GL33;
use glslwrap_glfw::{GL33Context, GlfwSurface};
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

// left half of the viewport
#[rustfmt::skip]
const LEFT: [f32; 8] = [
  -1., -1.,
   0., -1.,
   0.,  1.,
  -1.,  1.,
];

// right half of the viewport
#[rustfmt::skip]
const RIGHT: [f32; 8] = [
  0., -1.,
  1., -1.,
  1.,  1.,
  0.,  1.,
];

const INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

fn half(ctx: &mut GL33Context, vertices: &[f32], color: [f32; 4]) -> DrawObject<GL33> {
  let mut program = Program::compile(ctx, VS, FS).unwrap();
  program.set_uniform("color", color);

  let mut object = DrawObject::new(ctx, program).unwrap();
  object.set_vertex_buffer(VertexBuffer::new(ctx, vertices, 2, 4).unwrap());
  object.set_element_buffer(ElementBuffer::new(ctx, &INDICES, 3, 2).unwrap());
  object.set_attributes(AttributeList::from(vec![Attribute::new(0, 2).unwrap()]));
  object
}

fn read_pixel(x: u32, y: u32) -> [u8; 4] {
  let mut pixel = [0u8; 4];

  unsafe {
    gl::Finish();
    gl::ReadPixels(
      x as GLint,
      y as GLint,
      1,
      1,
      gl::RGBA,
      gl::UNSIGNED_BYTE,
      pixel.as_mut_ptr() as *mut _,
    );
  }

  pixel
}

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Two draw objects", WindowOpt::default()).unwrap();
  let ctx = &mut surface.context;

  let mut left = half(ctx, &LEFT, [1., 0., 0., 1.]);
  let mut right = half(ctx, &RIGHT, [0., 1., 0., 1.]);

  let size = ctx.framebuffer_size();
  let [w, h] = size;
  let frame = PipelineState::new();

  // both objects in one frame; each vertex array keeps its own element buffer
  frame.apply(ctx, size);
  assert_eq!(left.render(ctx).unwrap(), Some(DrawCall::Elements { count: 6 }));
  assert_eq!(right.render(ctx).unwrap(), Some(DrawCall::Elements { count: 6 }));
  assert_eq!(read_pixel(w / 4, h / 2), [255, 0, 0, 255]);
  assert_eq!(read_pixel(3 * w / 4, h / 2), [0, 255, 0, 255]);

  // nothing is uploaded again, only bound
  frame.apply(ctx, size);
  right.render(ctx).unwrap();
  left.render(ctx).unwrap();
  assert_eq!(read_pixel(w / 4, h / 2), [255, 0, 0, 255]);
  assert_eq!(read_pixel(3 * w / 4, h / 2), [0, 255, 0, 255]);

  // clean buffers moved into a fresh object get attached to its vertex array
  let vertices = right.set_vertex_buffer(None).unwrap();
  let indices = right.set_element_buffer(None).unwrap();
  let mut program = Program::compile(ctx, VS, FS).unwrap();
  program.set_uniform("color", [0f32, 0., 1., 1.]);

  let mut moved = DrawObject::new(ctx, program).unwrap();
  moved.set_vertex_buffer(vertices);
  moved.set_element_buffer(indices);
  moved.set_attributes(AttributeList::from(vec![Attribute::new(0, 2).unwrap()]));

  frame.apply(ctx, size);
  left.render(ctx).unwrap();
  assert_eq!(moved.render(ctx).unwrap(), Some(DrawCall::Elements { count: 6 }));
  assert_eq!(read_pixel(w / 4, h / 2), [255, 0, 0, 255]);
  assert_eq!(read_pixel(3 * w / 4, h / 2), [0, 0, 255, 255]);
}
