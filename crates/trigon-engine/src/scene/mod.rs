//! Scene-side state read by the render path.
//!
//! Responsibilities:
//! - shape entities: transform, styles, outline and cached local geometry
//! - camera model and its per-frame snapshot
//!
//! Ownership of shapes (display lists, containers, culling) stays with the
//! caller; the render path only borrows them.

mod camera;
mod geometry;
mod shape;

pub use camera::{Camera, CameraSnapshot};
pub use geometry::{ShapeGeometry, ShapeKind};
pub use shape::{FillStyle, Shape, StrokeStyle, Transform};
