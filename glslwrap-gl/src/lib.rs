//! OpenGL backends.
//!
//! This crate exports [OpenGL](https://www.khronos.org/opengl/) backends for
//! [glslwrap](https://crates.io/crates/glslwrap). The only backend so far is [`GL33`], which
//! targets OpenGL 3.3 core and newer contexts.

pub mod gl33;

pub use gl33::GL33;
