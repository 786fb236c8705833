//! # glslwrap
//!
//! A small, typed layer over a low-level graphics API. It wraps the few things every GLSL
//! program needs:
//!
//! - **Shader programs** ([`Program`]): a vertex and a fragment stage, compiled and linked in a
//!   single call. Compilation and link errors carry the driver’s log.
//! - **Uniform variables** ([`ShaderVariable`]): named values stored in a program and uploaded
//!   when they change. Uniform locations are resolved once and cached.
//! - **Buffers** ([`VertexBuffer`], [`ElementBuffer`]): host copies of vertex and index data,
//!   uploaded to the GPU when they change.
//! - **Attributes** ([`Attribute`], [`AttributeList`]): how the components of a vertex are fed to
//!   the vertex shader, packed one after another.
//! - **Draw objects** ([`DrawObject`]): a program, its geometry and a vertex array. Rendering one
//!   runs the bind / upload / draw sequence.
//! - **Per-frame state** ([`PipelineState`]): viewport, depth test, blending and buffer clearing.
//!
//! The types are generic over a *backend*, which performs the native calls. This crate only
//! defines the backend interfaces, in [`backend`]; the OpenGL implementation lives in
//! `glslwrap-gl` and contexts are created by windowing crates such as `glslwrap-glfw`.
//!
//! All types are tied to a single thread, the one on which the graphics context is current.

//#![deny(missing_docs)]
#![allow(clippy::missing_safety_doc)]

pub mod attribute;
pub mod backend;
pub mod blending;
pub mod buffer;
pub mod context;
pub mod depth_test;
pub mod draw;
pub mod pipeline;
pub mod shader;

#[cfg(test)]
mod testing;

pub use crate::attribute::{Attribute, AttributeList};
pub use crate::buffer::{ElementBuffer, VertexBuffer};
pub use crate::context::GraphicsContext;
pub use crate::draw::{DrawObject, Mode};
pub use crate::pipeline::PipelineState;
pub use crate::shader::{Program, ShaderVariable, UniformValue};
