use crate::gl33::{state::GLState, GL33};
use gl::{self, types::*};
use glslwrap::{
  backend::shader::Shader,
  shader::{ProgramError, StageError, StageType, UniformValue},
};
use std::{
  cell::RefCell,
  ffi::CString,
  ptr::{null, null_mut},
  rc::Rc,
};

#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    self.state.borrow_mut().unuse_program(self.handle);

    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
        let mut written: GLsizei = 0;
        gl::GetProgramInfoLog(
          handle,
          log_len,
          &mut written,
          log.as_mut_ptr() as *mut GLchar,
        );

        log.truncate(written.max(0) as usize);

        Err(ProgramError::link_failed(String::from_utf8_lossy(&log)))
      }
    }
  }
}

unsafe impl Shader for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  type UniformLocation = GLint;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let c_src = CString::new(src.as_bytes())
      .map_err(|_| StageError::compilation_failed(ty, "shader source contains a null byte"))?;

    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::compilation_failed(
        ty,
        "unable to create shader stage",
      ));
    }

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      let mut written: GLsizei = 0;
      gl::GetShaderInfoLog(
        handle,
        log_len,
        &mut written,
        log.as_mut_ptr() as *mut GLchar,
      );

      gl::DeleteShader(handle);

      log.truncate(written.max(0) as usize);

      Err(StageError::compilation_failed(
        ty,
        String::from_utf8_lossy(&log),
      ))
    }
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl::CreateProgram();

    if handle == 0 {
      return Err(ProgramError::link_failed("unable to create shader program"));
    }

    gl::AttachShader(handle, vertex.handle);
    gl::AttachShader(handle, fragment.handle);

    let program = Program {
      handle,
      state: self.state.clone(),
    };
    program.link()?;

    // stages are only flagged for deletion while attached
    gl::DetachShader(handle, vertex.handle);
    gl::DetachShader(handle, fragment.handle);

    Ok(program)
  }

  unsafe fn use_program(&mut self, program: &Self::ProgramRepr) {
    self.state.borrow_mut().use_program(program.handle);
  }

  unsafe fn uniform_location(
    &mut self,
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Option<Self::UniformLocation> {
    let c_name = CString::new(name.as_bytes()).ok()?;
    let location = gl::GetUniformLocation(program.handle, c_name.as_ptr() as *const GLchar);

    if location < 0 {
      None
    } else {
      Some(location)
    }
  }

  unsafe fn set_uniform(&mut self, location: Self::UniformLocation, value: &UniformValue) {
    match *value {
      UniformValue::Int(x) => gl::Uniform1i(location, x),
      UniformValue::Float(x) => gl::Uniform1f(location, x),
      UniformValue::Vec2(ref v) => gl::Uniform2fv(location, 1, v.as_ptr()),
      UniformValue::Vec3(ref v) => gl::Uniform3fv(location, 1, v.as_ptr()),
      UniformValue::Vec4(ref v) => gl::Uniform4fv(location, 1, v.as_ptr()),
      UniformValue::Mat3(ref m) => {
        gl::UniformMatrix3fv(location, 1, gl::FALSE, m.as_ptr() as *const GLfloat)
      }
      UniformValue::Mat4(ref m) => {
        gl::UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr() as *const GLfloat)
      }
    }
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}
