//! Shape rendering.
//!
//! Per visible shape and frame:
//! 1. [`compose`] builds the shape, camera and combined matrices into
//!    caller-owned [`ScratchMatrices`]
//! 2. [`render_shape`] emits fill triangles, then stroke segments, into a
//!    [`ShapeBatch`]
//!
//! After the pass, [`FlatTintRenderer`] uploads a [`TriangleBatch`] and
//! draws it.
//!
//! Convention:
//! - batch vertices are view-space pixels (top-left origin, +Y down)
//! - the vertex shader converts to NDC using a viewport uniform

mod batch;
mod common;
mod composer;
mod ctx;
mod emit;
mod flat_tint;

#[cfg(test)]
mod recording;

pub use batch::{BatchConfig, BatchVertex, LineSegment, ShapeBatch, TriangleBatch};
pub use composer::{compose, ScratchMatrices};
pub use ctx::{RenderCtx, RenderTarget};
pub use emit::{emit_fill, emit_stroke, render_shape};
pub use flat_tint::FlatTintRenderer;
