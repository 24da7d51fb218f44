//! Trigon engine crate.
//!
//! Batched 2D shape rendering: shapes with local fill/stroke geometry are
//! projected through object, parent and camera transforms and emitted as
//! flat-tinted triangles into a single vertex stream.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
