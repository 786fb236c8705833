use glslwrap::shader::{ProgramError, StageError, StageType};
use glslwrap::Program;
use glslwrap_gl::GL33;
use glslwrap_glfw::GlfwSurface;
use glslwrap_windowing::WindowOpt;

const VS: &str = "#version 330 core
void main() {
  gl_Position = vec4(0., 0., 0., 1.);
}";

const FS: &str = "#version 330 core
out vec4 frag;

void main() {
  frag = undeclared;
}";

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Compile error", WindowOpt::default()).unwrap();
  let program = Program::<GL33>::compile(&mut surface.context, VS, FS);

  match program {
    Err(ProgramError::StageError(StageError::CompilationFailed(StageType::FragmentShader, log))) => {
      assert!(!log.is_empty(), "the compilation log should not be empty");
    }

    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("the fragment stage should not compile"),
  }
}
