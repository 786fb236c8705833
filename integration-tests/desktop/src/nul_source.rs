use glslwrap::shader::{ProgramError, StageError, StageType};
use glslwrap::Program;
use glslwrap_gl::GL33;
use glslwrap_glfw::GlfwSurface;
use glslwrap_windowing::WindowOpt;

const VS: &str = "#version 330 core
void main() {\0
  gl_Position = vec4(0., 0., 0., 1.);
}";

const FS: &str = "#version 330 core
out vec4 frag;

void main() {
  frag = vec4(1.);
}";

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("NUL in source", WindowOpt::default()).unwrap();

  match Program::<GL33>::compile(&mut surface.context, VS, FS) {
    Err(ProgramError::StageError(StageError::CompilationFailed(StageType::VertexShader, _))) => (),
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("a source with a NUL byte should not compile"),
  }

  // same for the fragment stage
  match Program::<GL33>::compile(&mut surface.context, FS, VS) {
    Err(ProgramError::StageError(StageError::CompilationFailed(StageType::FragmentShader, _))) => {}
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("a source with a NUL byte should not compile"),
  }
}
