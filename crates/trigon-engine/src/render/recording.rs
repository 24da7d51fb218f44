//! Test double that records batch calls instead of building vertices.

use crate::coords::{TransformMatrix, Vec2};
use crate::paint::Tint;

use super::batch::{LineSegment, ShapeBatch};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BatchCall {
    FillTriangle {
        triangle: [Vec2; 3],
        shape: TransformMatrix,
        camera: TransformMatrix,
        tint: Tint,
    },
    Line {
        segment: LineSegment,
        calc: TransformMatrix,
        tint: Tint,
    },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBatch {
    pub calls: Vec<BatchCall>,
}

impl RecordingBatch {
    pub fn fills(&self) -> impl Iterator<Item = &BatchCall> {
        self.calls.iter().filter(|c| matches!(c, BatchCall::FillTriangle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineSegment> {
        self.calls.iter().filter_map(|c| match c {
            BatchCall::Line { segment, .. } => Some(segment),
            BatchCall::FillTriangle { .. } => None,
        })
    }
}

impl ShapeBatch for RecordingBatch {
    fn batch_fill_triangle(
        &mut self,
        triangle: [Vec2; 3],
        shape: &TransformMatrix,
        camera: &TransformMatrix,
        tint: &Tint,
    ) {
        self.calls.push(BatchCall::FillTriangle {
            triangle,
            shape: *shape,
            camera: *camera,
            tint: *tint,
        });
    }

    fn batch_line(&mut self, segment: &LineSegment, calc: &TransformMatrix, tint: &Tint) {
        self.calls.push(BatchCall::Line {
            segment: *segment,
            calc: *calc,
            tint: *tint,
        });
    }
}
