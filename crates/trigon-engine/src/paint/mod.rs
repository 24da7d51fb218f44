//! Paint model shared between shapes and the batch.
//!
//! Shape colors are `0xRRGGBB` integers with a separate float alpha. The
//! batch consumes them as packed per-corner [`Tint`] values.

mod tint;

pub use tint::{pack_tint, unpack_tint, Tint};
