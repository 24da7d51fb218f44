//! Coordinate and transform types shared by the scene and the renderers.
//!
//! Canonical CPU space:
//! - Pixels, origin top-left
//! - +X right, +Y down
//!
//! Local shape geometry is mapped to view space by a [`TransformMatrix`];
//! the GPU stage converts view space to NDC with a viewport uniform.

mod matrix;
mod vec2;

pub use matrix::TransformMatrix;
pub use vec2::Vec2;
