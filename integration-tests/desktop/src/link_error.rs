use glslwrap::shader::ProgramError;
use glslwrap::Program;
use glslwrap_gl::GL33;
use glslwrap_glfw::GlfwSurface;
use glslwrap_windowing::WindowOpt;

const VS: &str = "#version 330 core
void main() {
  gl_Position = vec4(0., 0., 0., 1.);
}";

// reads an input no vertex stage writes
const FS: &str = "#version 330 core
in vec3 v_missing;

out vec4 frag;

void main() {
  frag = vec4(v_missing, 1.);
}";

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Link error", WindowOpt::default()).unwrap();
  let program = Program::<GL33>::compile(&mut surface.context, VS, FS);

  match program {
    Err(ProgramError::LinkFailed(_)) => (),
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("the program should not link"),
  }
}
