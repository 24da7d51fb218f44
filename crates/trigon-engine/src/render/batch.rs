use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::{TransformMatrix, Vec2};
use crate::paint::Tint;

/// One stroke segment in local (origin-adjusted) space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub start_half_width: f32,
    pub end_half_width: f32,
    /// Full stroke width; decides whether joins are generated.
    pub width: f32,
    /// Ordinal of this segment within its path. `0` starts a new path.
    pub index: usize,
    /// Set on the final segment of a path.
    pub is_last: bool,
}

/// Append-only sink for shape primitives.
///
/// Implementations turn primitives into vertices for a single draw stream.
/// Calls arrive in paint order and are never concurrent.
pub trait ShapeBatch {
    /// Appends one filled triangle given in shape-local space.
    ///
    /// The vertices are projected by `camera ∘ shape`.
    fn batch_fill_triangle(
        &mut self,
        triangle: [Vec2; 3],
        shape: &TransformMatrix,
        camera: &TransformMatrix,
        tint: &Tint,
    );

    /// Appends one stroke segment projected by `calc`.
    ///
    /// Consecutive calls of the same path share endpoints; the batch uses
    /// `index`/`is_last` to stitch joins between them.
    fn batch_line(&mut self, segment: &LineSegment, calc: &TransformMatrix, tint: &Tint);
}

/// GPU vertex: view-space position plus packed `0xAABBGGRR` tint.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BatchVertex {
    pub pos: [f32; 2],
    pub tint: u32,
}

impl BatchVertex {
    #[inline]
    pub fn new(pos: Vec2, tint: u32) -> Self {
        Self { pos: [pos.x, pos.y], tint }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.pos[0], self.pos[1])
    }
}

/// Batch tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Upper bound on vertices per draw call. Rounded down to whole quads.
    pub max_vertices_per_draw: usize,
    /// Strokes this wide or thinner skip join geometry.
    pub min_join_width: f32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_vertices_per_draw: 12_000,
            min_join_width: 2.0,
        }
    }
}

/// CPU-side triangle list with flat per-vertex tints.
///
/// Performance characteristics:
/// - appends are amortized O(1)
/// - `clear()` keeps capacity; no per-frame allocation once warmed
///
/// The vertex stream is split into draw ranges no longer than the configured
/// limit. A quad is never split across two ranges.
#[derive(Debug, Clone)]
pub struct TriangleBatch {
    config: BatchConfig,
    draw_limit: usize,

    vertices: Vec<BatchVertex>,
    closed_draws: Vec<Range<u32>>,
    draw_start: usize,

    // Stroke join state: (TL, BL) of the path's first quad and (BR, TR) of
    // the previous one.
    first_edge: Option<[Vec2; 2]>,
    prev_edge: Option<[Vec2; 2]>,
}

impl Default for TriangleBatch {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

impl TriangleBatch {
    pub fn new(config: BatchConfig) -> Self {
        let draw_limit = (config.max_vertices_per_draw / 6).max(1) * 6;
        Self {
            config,
            draw_limit,
            vertices: Vec::new(),
            closed_draws: Vec::new(),
            draw_start: 0,
            first_edge: None,
            prev_edge: None,
        }
    }

    /// Drops recorded geometry. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.closed_draws.clear();
        self.draw_start = 0;
        self.first_edge = None;
        self.prev_edge = None;
    }

    #[inline]
    pub fn vertices(&self) -> &[BatchVertex] {
        &self.vertices
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Vertex ranges to draw, one draw call each, in paint order.
    pub fn draw_ranges(&self) -> impl Iterator<Item = Range<u32>> + '_ {
        let tail = (self.vertices.len() > self.draw_start)
            .then(|| self.draw_start as u32..self.vertices.len() as u32);
        self.closed_draws.iter().cloned().chain(tail)
    }

    #[inline]
    pub fn draw_count(&self) -> usize {
        self.draw_ranges().count()
    }

    fn reserve_in_draw(&mut self, count: usize) {
        let pending = self.vertices.len() - self.draw_start;
        if pending > 0 && pending + count > self.draw_limit {
            let end = self.vertices.len();
            self.closed_draws.push(self.draw_start as u32..end as u32);
            self.draw_start = end;
            log::trace!("batch draw range closed at {pending} vertices");
        }
    }

    fn push_triangle(&mut self, p: [Vec2; 3], tint: &Tint) {
        self.reserve_in_draw(3);
        self.vertices.extend_from_slice(&[
            BatchVertex::new(p[0], tint.top_left),
            BatchVertex::new(p[1], tint.top_right),
            BatchVertex::new(p[2], tint.bottom_left),
        ]);
    }

    /// Pushes a quad given as TL, BL, BR, TR.
    fn push_quad(&mut self, tl: Vec2, bl: Vec2, br: Vec2, tr: Vec2, tint: &Tint) {
        self.reserve_in_draw(6);
        self.vertices.extend_from_slice(&[
            BatchVertex::new(tl, tint.top_left),
            BatchVertex::new(bl, tint.bottom_left),
            BatchVertex::new(br, tint.bottom_right),
            BatchVertex::new(tl, tint.top_left),
            BatchVertex::new(br, tint.bottom_right),
            BatchVertex::new(tr, tint.top_right),
        ]);
    }
}

impl ShapeBatch for TriangleBatch {
    fn batch_fill_triangle(
        &mut self,
        triangle: [Vec2; 3],
        shape: &TransformMatrix,
        camera: &TransformMatrix,
        tint: &Tint,
    ) {
        let calc = camera.multiply(shape);
        self.push_triangle(triangle.map(|p| calc.transform_point(p)), tint);
    }

    fn batch_line(&mut self, segment: &LineSegment, calc: &TransformMatrix, tint: &Tint) {
        let delta = segment.end - segment.start;
        let len = delta.length();
        // Zero-length segments collapse to a zero-area quad.
        let inv_len = if len > 0.0 { 1.0 / len } else { 0.0 };
        let normal = Vec2::new(delta.y * inv_len, -delta.x * inv_len);
        let n_start = normal * segment.start_half_width;
        let n_end = normal * segment.end_half_width;

        let br = calc.transform_point(segment.end - n_end);
        let bl = calc.transform_point(segment.start - n_start);
        let tr = calc.transform_point(segment.end + n_end);
        let tl = calc.transform_point(segment.start + n_start);

        self.push_quad(tl, bl, br, tr, tint);

        if segment.width <= self.config.min_join_width {
            return;
        }

        match self.prev_edge {
            Some([prev_br, prev_tr]) if segment.index > 0 => {
                self.push_quad(tl, bl, prev_br, prev_tr, tint);
            }
            _ => self.first_edge = Some([tl, bl]),
        }

        match self.first_edge {
            Some([first_tl, first_bl]) if segment.is_last => {
                self.push_quad(br, tr, first_tl, first_bl, tint);
            }
            _ => self.prev_edge = Some([br, tr]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: Vec2, end: Vec2, width: f32, index: usize, is_last: bool) -> LineSegment {
        LineSegment {
            start,
            end,
            start_half_width: width / 2.0,
            end_half_width: width / 2.0,
            width,
            index,
            is_last,
        }
    }

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    // ── vertex layout ─────────────────────────────────────────────────────

    #[test]
    fn vertex_is_twelve_bytes() {
        assert_eq!(std::mem::size_of::<BatchVertex>(), 12);
    }

    // ── fill ──────────────────────────────────────────────────────────────

    #[test]
    fn fill_triangle_projects_through_camera_after_shape() {
        let mut batch = TriangleBatch::default();
        let shape = TransformMatrix::translation(10.0, 0.0);
        let camera = TransformMatrix::from_itrs(0.0, 0.0, 0.0, 2.0, 2.0);
        batch.batch_fill_triangle(
            [v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)],
            &shape,
            &camera,
            &Tint::uniform(7),
        );

        let pos: Vec<Vec2> = batch.vertices().iter().map(BatchVertex::position).collect();
        assert_eq!(pos, vec![v(20.0, 0.0), v(22.0, 0.0), v(20.0, 2.0)]);
        assert!(batch.vertices().iter().all(|vx| vx.tint == 7));
        assert_eq!(batch.triangle_count(), 1);
    }

    // ── lines ─────────────────────────────────────────────────────────────

    #[test]
    fn horizontal_line_quad_spans_half_width_each_side() {
        let mut batch = TriangleBatch::default();
        batch.batch_line(
            &seg(v(0.0, 0.0), v(10.0, 0.0), 2.0, 0, true),
            &TransformMatrix::identity(),
            &Tint::uniform(1),
        );

        // Thin line: quad only, no joins.
        assert_eq!(batch.vertices().len(), 6);
        let ys: Vec<f32> = batch.vertices().iter().map(|vx| vx.pos[1]).collect();
        assert!(ys.iter().all(|y| (y.abs() - 1.0).abs() < 1e-6));
    }

    #[test]
    fn zero_length_segment_is_finite_and_degenerate() {
        let mut batch = TriangleBatch::default();
        batch.batch_line(
            &seg(v(3.0, 3.0), v(3.0, 3.0), 8.0, 0, false),
            &TransformMatrix::identity(),
            &Tint::uniform(1),
        );
        assert!(batch.vertices().iter().all(|vx| vx.position() == v(3.0, 3.0)));
    }

    #[test]
    fn thick_closed_path_adds_inner_and_closing_joins() {
        let mut batch = TriangleBatch::default();
        let pts = [v(0.0, 0.0), v(10.0, 0.0), v(5.0, 8.0), v(0.0, 0.0)];
        let n = pts.len() - 1;
        for i in 0..n {
            batch.batch_line(
                &seg(pts[i], pts[i + 1], 4.0, i, i == n - 1),
                &TransformMatrix::identity(),
                &Tint::uniform(1),
            );
        }
        // 3 segment quads + 2 inner joins + 1 closing join.
        assert_eq!(batch.vertices().len(), 6 * 6);
    }

    #[test]
    fn thin_path_has_no_joins() {
        let mut batch = TriangleBatch::default();
        for i in 0..3 {
            batch.batch_line(
                &seg(v(i as f32, 0.0), v(i as f32 + 1.0, 0.0), 2.0, i, i == 2),
                &TransformMatrix::identity(),
                &Tint::uniform(1),
            );
        }
        assert_eq!(batch.vertices().len(), 3 * 6);
    }

    #[test]
    fn new_path_does_not_join_to_previous_path() {
        let mut batch = TriangleBatch::default();
        let id = TransformMatrix::identity();
        let t = Tint::uniform(1);
        batch.batch_line(&seg(v(0.0, 0.0), v(10.0, 0.0), 4.0, 0, false), &id, &t);
        batch.batch_line(&seg(v(10.0, 0.0), v(10.0, 10.0), 4.0, 1, false), &id, &t);
        let before = batch.vertices().len();

        // Index 0 starts over: one quad, no join back to the open path above.
        batch.batch_line(&seg(v(50.0, 50.0), v(60.0, 50.0), 4.0, 0, false), &id, &t);
        assert_eq!(batch.vertices().len() - before, 6);
    }

    // ── draw ranges ───────────────────────────────────────────────────────

    #[test]
    fn empty_batch_has_no_draws() {
        let batch = TriangleBatch::default();
        assert!(batch.is_empty());
        assert_eq!(batch.draw_count(), 0);
    }

    #[test]
    fn ranges_split_at_limit_without_splitting_quads() {
        let mut batch = TriangleBatch::new(BatchConfig {
            max_vertices_per_draw: 14,
            min_join_width: 2.0,
        });
        let id = TransformMatrix::identity();
        for i in 0..5 {
            batch.batch_line(
                &seg(v(0.0, i as f32), v(1.0, i as f32), 1.0, 0, true),
                &id,
                &Tint::uniform(1),
            );
        }
        // Limit rounds down to 12 vertices: two quads per draw.
        let ranges: Vec<_> = batch.draw_ranges().collect();
        assert_eq!(ranges, vec![0..12, 12..24, 24..30]);
    }

    #[test]
    fn clear_resets_geometry_and_ranges() {
        let mut batch = TriangleBatch::default();
        batch.batch_fill_triangle(
            [v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)],
            &TransformMatrix::identity(),
            &TransformMatrix::identity(),
            &Tint::uniform(1),
        );
        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.draw_count(), 0);
    }
}
