use crate::coords::{TransformMatrix, Vec2};
use crate::paint::Tint;
use crate::scene::{CameraSnapshot, FillStyle, Shape, ShapeGeometry, StrokeStyle};

use super::batch::{LineSegment, ShapeBatch};
use super::composer::{compose, ScratchMatrices};

/// Renders one shape into `batch`: fill triangles first, then the stroke.
///
/// `scratch` is overwritten; on return it holds this shape's matrices.
/// Geometry is read as-is; run [`Shape::prepare`] before the pass if the
/// outline changed.
pub fn render_shape<B: ShapeBatch + ?Sized>(
    batch: &mut B,
    shape: &Shape,
    camera: &CameraSnapshot,
    parent: Option<&TransformMatrix>,
    scratch: &mut ScratchMatrices,
) {
    if shape.is_geometry_dirty() {
        log::trace!("rendering shape with stale geometry");
    }

    compose(&shape.transform, camera, parent, scratch);

    let alpha = camera.alpha * shape.alpha;
    let origin = shape.display_origin();

    if let Some(fill) = &shape.fill {
        emit_fill(batch, shape.geometry(), origin, fill, alpha, scratch);
    }

    if let Some(stroke) = &shape.stroke {
        emit_stroke(batch, shape.geometry().stroke_path(), origin, stroke, alpha, &scratch.calc);
    }
}

/// Submits every fill triangle with a flat tint.
///
/// `alpha` is the inherited camera × shape alpha; it multiplies the fill's
/// own alpha.
pub fn emit_fill<B: ShapeBatch + ?Sized>(
    batch: &mut B,
    geometry: &ShapeGeometry,
    origin: Vec2,
    fill: &FillStyle,
    alpha: f32,
    matrices: &ScratchMatrices,
) {
    let tint = Tint::solid(fill.color, fill.alpha * alpha);

    for triangle in geometry.fill_triangles() {
        batch.batch_fill_triangle(
            triangle.map(|p| p - origin),
            &matrices.shape,
            &matrices.camera,
            &tint,
        );
    }
}

/// Walks `path` pairwise and submits one segment per consecutive pair.
///
/// A path of `n` points yields `n - 1` segments; fewer than two points
/// yield none. Closed outlines already repeat their first point at the
/// end, so the last segment is the closing edge.
pub fn emit_stroke<B: ShapeBatch + ?Sized>(
    batch: &mut B,
    path: &[Vec2],
    origin: Vec2,
    stroke: &StrokeStyle,
    alpha: f32,
    calc: &TransformMatrix,
) {
    let Some((&first, rest)) = path.split_first() else { return };

    let tint = Tint::solid(stroke.color, stroke.alpha * alpha);
    let half_width = stroke.line_width / 2.0;
    let last = rest.len().saturating_sub(1);

    let mut start = first - origin;
    for (index, &point) in rest.iter().enumerate() {
        let end = point - origin;
        batch.batch_line(
            &LineSegment {
                start,
                end,
                start_half_width: half_width,
                end_half_width: half_width,
                width: stroke.line_width,
                index,
                is_last: index == last,
            },
            calc,
            &tint,
        );
        start = end;
    }
}
