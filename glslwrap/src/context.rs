//! Graphics context.
//!
//! A graphics context is an object that gives access to a backend, which is the type performing
//! the actual native calls. This crate doesn’t create contexts; windowing crates such as
//! `glslwrap-glfw` do it for you.
//!
//! # On context and threads
//!
//!   - An object which type implements `GraphicsContext` must be `!Send` and `!Sync`. The native
//!     context is current on a single thread only.
//!   - You can only create a single context per thread.

/// Class of graphics context.
///
/// Such a context must not be Send nor Sync, which means that you cannot share it between
/// threads in any way (move / borrow).
pub unsafe trait GraphicsContext {
  /// Backend type driven by this context.
  type Backend: ?Sized;

  /// Access the backend.
  fn backend(&mut self) -> &mut Self::Backend;
}
