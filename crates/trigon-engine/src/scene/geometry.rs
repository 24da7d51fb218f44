use anyhow::{bail, Context, Result};
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

use crate::coords::Vec2;

/// Local outline of a shape.
///
/// Coordinates are in the shape's local space, before the display origin is
/// subtracted.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Triangle([Vec2; 3]),
    /// Axis-aligned rectangle spanning `(0, 0)..size`.
    Rectangle(Vec2),
    /// Simple polygon; the closing edge back to the first point is implicit.
    Polygon(Vec<Vec2>),
}

/// Render-ready local geometry derived from a [`ShapeKind`].
///
/// Buffers are reused across rebuilds; a rebuild only reallocates when a
/// shape grows past its previous vertex count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeGeometry {
    fill_vertices: Vec<Vec2>,
    stroke_path: Vec<Vec2>,
    size: Vec2,
}

impl ShapeGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds geometry for `kind` from scratch.
    pub fn from_kind(kind: &ShapeKind) -> Result<Self> {
        let mut geometry = Self::new();
        geometry.rebuild(kind)?;
        Ok(geometry)
    }

    /// Fill triangles, three vertices each.
    #[inline]
    pub fn fill_vertices(&self) -> &[Vec2] {
        &self.fill_vertices
    }

    /// Iterates fill triangles.
    #[inline]
    pub fn fill_triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.fill_vertices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Stroke path. Closed outlines repeat their first point at the end.
    #[inline]
    pub fn stroke_path(&self) -> &[Vec2] {
        &self.stroke_path
    }

    /// Bounding width/height of the outline.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn clear(&mut self) {
        self.fill_vertices.clear();
        self.stroke_path.clear();
        self.size = Vec2::zero();
    }

    /// Regenerates fill triangles, stroke path and size for `kind`.
    ///
    /// On error the geometry is left empty.
    pub fn rebuild(&mut self, kind: &ShapeKind) -> Result<()> {
        self.clear();

        match kind {
            ShapeKind::Triangle(points) => {
                self.fill_vertices.extend_from_slice(points);
                self.push_closed_outline(points);
                self.size = bounds_size(points);
            }
            ShapeKind::Rectangle(size) => {
                let (w, h) = (size.x, size.y);
                let corners = [
                    Vec2::new(0.0, 0.0),
                    Vec2::new(w, 0.0),
                    Vec2::new(w, h),
                    Vec2::new(0.0, h),
                ];
                self.fill_vertices.extend_from_slice(&[
                    corners[0], corners[1], corners[2],
                    corners[0], corners[2], corners[3],
                ]);
                self.push_closed_outline(&corners);
                self.size = Vec2::new(w.abs(), h.abs());
            }
            ShapeKind::Polygon(points) => {
                if points.len() >= 3 {
                    if let Err(e) = tessellate_polygon(points, &mut self.fill_vertices) {
                        self.clear();
                        let n = points.len();
                        return Err(e)
                            .with_context(|| format!("failed to fill polygon of {n} points"));
                    }
                }
                self.push_closed_outline(points);
                self.size = bounds_size(points);
            }
        }

        Ok(())
    }

    fn push_closed_outline(&mut self, points: &[Vec2]) {
        let Some(&first) = points.first() else { return };
        self.stroke_path.extend_from_slice(points);
        self.stroke_path.push(first);
    }
}

fn bounds_size(points: &[Vec2]) -> Vec2 {
    let Some(&first) = points.first() else { return Vec2::zero() };
    let (mut min, mut max) = (first, first);
    for p in &points[1..] {
        min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
        max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
    }
    max - min
}

fn tessellate_polygon(points: &[Vec2], out: &mut Vec<Vec2>) -> Result<()> {
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        bail!("point {i} is not finite: {:?}", points[i]);
    }

    let mut builder = Path::builder();
    builder.begin(point(points[0].x, points[0].y));
    for p in &points[1..] {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(true);
    let path = builder.build();

    let mut geom: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default(),
            &mut BuffersBuilder::new(&mut geom, |v: FillVertex| {
                let p = v.position();
                Vec2::new(p.x, p.y)
            }),
        )
        .map_err(|e| anyhow::anyhow!("tessellation error: {e:?}"))?;

    out.extend(geom.indices.iter().map(|&i| geom.vertices[i as usize]));
    Ok(())
}
