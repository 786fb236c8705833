use glslwrap_gl::{gl33::StateQueryError, GL33};
use glslwrap_glfw::GlfwSurface;
use glslwrap_windowing::WindowOpt;

pub fn fixture() {
  let _surface = GlfwSurface::new_gl33("Second backend", WindowOpt::default()).unwrap();

  match GL33::new() {
    Err(StateQueryError::UnavailableGLState) => (),
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("only one backend can be created per thread"),
  }
}
