//! # glslwrap windowing
//!
//! This is the base, abstract crate for windowing common types in glslwrap. The `glslwrap` crate
//! wraps shader programs and geometry, but it doesn’t give you a way to create a graphics context.
//! Creating and managing a context is tightly related to the windowing library your application
//! uses, so that job is left to crates such as `glslwrap-glfw`, which all read the options defined
//! here.
//!
//! # What’s included
//!
//! - [`WindowDim`]: the dimension of a window and its mode (windowed or fullscreen).
//! - [`ContextVersion`]: the OpenGL version to request.
//! - [`WindowOpt`]: hints to customize the window integration, such as whether it can be resized.

#![deny(missing_docs)]

/// Dimension metrics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode with the wished resolution.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
  /// Fullscreen mode, using the primary monitor resolution.
  Fullscreen,
}

impl Default for WindowDim {
  /// A 960×540 window.
  fn default() -> Self {
    WindowDim::Windowed {
      width: 960,
      height: 540,
    }
  }
}

/// Version of the OpenGL context to request.
///
/// The context always uses the core profile.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ContextVersion {
  /// Major version number.
  pub major: u32,
  /// Minor version number.
  pub minor: u32,
}

impl ContextVersion {
  /// Create a new context version.
  pub fn new(major: u32, minor: u32) -> Self {
    ContextVersion { major, minor }
  }
}

impl Default for ContextVersion {
  /// OpenGL 3.3.
  fn default() -> Self {
    ContextVersion::new(3, 3)
  }
}

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to
/// start with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  resizable: bool,
  floating: bool,
  context_version: ContextVersion,
  num_samples: Option<u32>,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to `WindowDim::default()`.
  /// - `resizable` set to `false`.
  /// - `floating` set to `true`.
  /// - `context_version` set to OpenGL 3.3.
  /// - `num_samples` set to `None`.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::default(),
      resizable: false,
      floating: true,
      context_version: ContextVersion::default(),
      num_samples: None,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> WindowDim {
    self.dim
  }

  /// Allow or forbid resizing the window. Default to `false`.
  #[inline]
  pub fn set_resizable(self, resizable: bool) -> Self {
    WindowOpt { resizable, ..self }
  }

  /// Whether the window can be resized.
  #[inline]
  pub fn is_resizable(&self) -> bool {
    self.resizable
  }

  /// Keep the window above the others (useful for tiling window managers). Default to `true`.
  #[inline]
  pub fn set_floating(self, floating: bool) -> Self {
    WindowOpt { floating, ..self }
  }

  /// Whether the window floats above the others.
  #[inline]
  pub fn is_floating(&self) -> bool {
    self.floating
  }

  /// Set the OpenGL version to request.
  #[inline]
  pub fn set_context_version(self, context_version: ContextVersion) -> Self {
    WindowOpt {
      context_version,
      ..self
    }
  }

  /// Get the OpenGL version to request.
  #[inline]
  pub fn context_version(&self) -> ContextVersion {
    self.context_version
  }

  /// Set the number of samples to use for multisampling.
  ///
  /// Pass `None` to disable multisampling.
  #[inline]
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    WindowOpt {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Get the number of samples to use in multisampling, if any.
  #[inline]
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_options() {
    let opt = WindowOpt::default();

    assert_eq!(
      opt.dim(),
      WindowDim::Windowed {
        width: 960,
        height: 540
      }
    );
    assert!(!opt.is_resizable());
    assert!(opt.is_floating());
    assert_eq!(opt.context_version(), ContextVersion::new(3, 3));
    assert_eq!(opt.num_samples(), None);
  }

  #[test]
  fn builder_keeps_other_options() {
    let opt = WindowOpt::default()
      .set_dim(WindowDim::Fullscreen)
      .set_num_samples(4)
      .set_resizable(true);

    assert_eq!(opt.dim(), WindowDim::Fullscreen);
    assert_eq!(opt.num_samples(), Some(4));
    assert!(opt.is_resizable());
    assert!(opt.is_floating());
  }

  #[test]
  fn context_versions_are_ordered() {
    assert!(ContextVersion::new(3, 3) < ContextVersion::new(4, 1));
    assert!(ContextVersion::new(3, 3) > ContextVersion::new(3, 2));
  }
}
