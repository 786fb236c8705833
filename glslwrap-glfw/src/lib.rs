//! [GLFW](https://crates.io/crates/glfw) backend for glslwrap.

#![deny(missing_docs)]

use glfw::{self, Context as _, InitError, Window, WindowEvent, WindowMode};
use glslwrap::context::GraphicsContext;
pub use glslwrap_gl::gl33::StateQueryError;
use glslwrap_gl::GL33;
use glslwrap_windowing::{WindowDim, WindowOpt};
use log::debug;
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// Initialization of the surface went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// The window (or its graphics context) could not be created.
  WindowCreationFailed,

  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to create window"),
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl From<StateQueryError> for GlfwSurfaceError {
  fn from(e: StateQueryError) -> Self {
    GlfwSurfaceError::GraphicsStateError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::WindowCreationFailed => None,
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
    }
  }
}

/// GLFW surface.
///
/// This type is a helper that exposes two important concepts: the GLFW event receiver that you
/// can use to poll events and the [`GL33Context`], which allows you to perform the rendering part.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Wrapped glslwrap context.
  pub context: GL33Context,
}

impl GlfwSurface {
  /// Initialize GLFW, open a window and make its OpenGL context current on the calling thread.
  ///
  /// The OpenGL function pointers are loaded from the new context before the backend is created.
  pub fn new_gl33(title: &str, opt: WindowOpt) -> Result<Self, GlfwSurfaceError> {
    #[cfg(feature = "log-errors")]
    let error_cbk = glfw::LOG_ERRORS;
    #[cfg(not(feature = "log-errors"))]
    let error_cbk = glfw::FAIL_ON_ERRORS;

    let mut glfw = glfw::init(error_cbk)?;

    // OpenGL hints
    let version = opt.context_version();
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(version.major));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(version.minor));

    // window hints
    glfw.window_hint(glfw::WindowHint::Resizable(opt.is_resizable()));
    glfw.window_hint(glfw::WindowHint::Floating(opt.is_floating()));
    glfw.window_hint(glfw::WindowHint::Samples(opt.num_samples()));

    let (mut window, events_rx) = match opt.dim() {
      WindowDim::Windowed { width, height } => {
        glfw.create_window(width, height, title, WindowMode::Windowed)
      }

      WindowDim::Fullscreen => glfw.with_primary_monitor(|glfw, monitor| {
        let monitor = monitor?;
        let mode = monitor.get_video_mode()?;
        glfw.create_window(
          mode.width,
          mode.height,
          title,
          WindowMode::FullScreen(monitor),
        )
      }),
    }
    .ok_or(GlfwSurfaceError::WindowCreationFailed)?;

    window.make_current();
    window.set_all_polling(true);

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = GL33::new()?;
    let context = GL33Context { window, gl };
    let surface = GlfwSurface { events_rx, context };

    debug!(
      "created a {}.{} core context for “{}”",
      version.major, version.minor, title
    );

    Ok(surface)
  }
}

/// glslwrap OpenGL 3.3 context.
///
/// This type also re-exports the GLFW window, if you need access to it.
#[derive(Debug)]
pub struct GL33Context {
  /// Wrapped GLFW window.
  pub window: Window,

  /// OpenGL 3.3 state.
  gl: GL33,
}

impl GL33Context {
  /// Size of the framebuffer, in pixels.
  ///
  /// This can differ from the window size on high-DPI displays.
  pub fn framebuffer_size(&self) -> [u32; 2] {
    let (w, h) = self.window.get_framebuffer_size();
    [w.max(0) as u32, h.max(0) as u32]
  }

  /// Swap the back and front buffers.
  pub fn swap_buffers(&mut self) {
    self.window.swap_buffers();
  }
}

unsafe impl GraphicsContext for GL33Context {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }
}
