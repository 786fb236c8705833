//! Backend interfaces.
//!
//! Backends implement these traits on their backend type to be usable with the API types of
//! this crate. All methods are `unsafe`: they issue native calls and assume a current context on
//! the calling thread.

pub mod buffer;
pub mod pipeline;
pub mod shader;
pub mod vertex_array;

use self::buffer::Buffer;
use self::pipeline::Pipeline;
use self::shader::Shader;
use self::vertex_array::VertexArray;

/// Everything a [`DrawObject`](crate::draw::DrawObject) needs from a backend.
pub trait Backend: Shader + Buffer + VertexArray + Pipeline {}

impl<B> Backend for B where B: ?Sized + Shader + Buffer + VertexArray + Pipeline {}
