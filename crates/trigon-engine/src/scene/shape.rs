use anyhow::{Context, Result};

use crate::coords::Vec2;

use super::geometry::{ShapeGeometry, ShapeKind};

/// Object-level transform of a shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Radians, clockwise on screen (+Y down).
    pub rotation: f32,
    pub scale: Vec2,
    /// Parallax multiplier for camera scroll: 1 follows the world, 0 is
    /// pinned to the screen.
    pub scroll_factor: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            rotation: 0.0,
            scale: Vec2::splat(1.0),
            scroll_factor: Vec2::splat(1.0),
        }
    }
}

/// Solid fill. `color` is `0xRRGGBB`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FillStyle {
    pub color: u32,
    pub alpha: f32,
}

impl FillStyle {
    #[inline]
    pub const fn new(color: u32, alpha: f32) -> Self {
        Self { color, alpha }
    }
}

/// Outline stroke. `color` is `0xRRGGBB`; `line_width` is in local units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: u32,
    pub alpha: f32,
    pub line_width: f32,
}

impl StrokeStyle {
    #[inline]
    pub const fn new(line_width: f32, color: u32, alpha: f32) -> Self {
        Self { color, alpha, line_width }
    }
}

/// A filled and/or stroked shape game object.
///
/// Geometry is derived from [`ShapeKind`] and cached. Changing the kind marks
/// the cache dirty; [`Shape::prepare`] must run before the next render pass
/// to pick the change up.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub transform: Transform,
    pub alpha: f32,
    /// `None` disables the fill pass.
    pub fill: Option<FillStyle>,
    /// `None` disables the stroke pass.
    pub stroke: Option<StrokeStyle>,

    origin: Vec2,
    display_origin: Vec2,
    /// Per-axis: display origin was set explicitly while that axis had no
    /// extent, so `origin` could not follow it.
    display_origin_pinned: (bool, bool),

    kind: ShapeKind,
    geometry: ShapeGeometry,
    geometry_dirty: bool,
}

impl Shape {
    /// Creates a shape and builds its geometry.
    ///
    /// The origin defaults to the center of the outline bounds.
    pub fn new(kind: ShapeKind) -> Result<Self> {
        let geometry =
            ShapeGeometry::from_kind(&kind).context("failed to build shape geometry")?;
        Ok(Self::with_geometry(kind, geometry))
    }

    // Triangle and rectangle outlines never touch the tessellator, so their
    // rebuild cannot fail.
    pub fn triangle(p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        let kind = ShapeKind::Triangle([p1, p2, p3]);
        let geometry = ShapeGeometry::from_kind(&kind).unwrap_or_default();
        Self::with_geometry(kind, geometry)
    }

    pub fn rectangle(width: f32, height: f32) -> Self {
        let kind = ShapeKind::Rectangle(Vec2::new(width, height));
        let geometry = ShapeGeometry::from_kind(&kind).unwrap_or_default();
        Self::with_geometry(kind, geometry)
    }

    pub fn polygon(points: Vec<Vec2>) -> Result<Self> {
        Self::new(ShapeKind::Polygon(points))
    }

    fn with_geometry(kind: ShapeKind, geometry: ShapeGeometry) -> Self {
        let origin = Vec2::splat(0.5);
        Self {
            transform: Transform::default(),
            alpha: 1.0,
            fill: None,
            stroke: None,
            origin,
            display_origin: origin.scale(geometry.size()),
            display_origin_pinned: (false, false),
            kind,
            geometry,
            geometry_dirty: false,
        }
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn with_fill(mut self, color: u32, alpha: f32) -> Self {
        self.fill = Some(FillStyle::new(color, alpha));
        self
    }

    pub fn with_stroke(mut self, line_width: f32, color: u32, alpha: f32) -> Self {
        self.stroke = Some(StrokeStyle::new(line_width, color, alpha));
        self
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.set_origin(x, y);
        self
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[inline]
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.transform.position = Vec2::new(x, y);
    }

    #[inline]
    pub fn set_rotation(&mut self, radians: f32) {
        self.transform.rotation = radians;
    }

    #[inline]
    pub fn set_scale(&mut self, x: f32, y: f32) {
        self.transform.scale = Vec2::new(x, y);
    }

    #[inline]
    pub fn set_scroll_factor(&mut self, x: f32, y: f32) {
        self.transform.scroll_factor = Vec2::new(x, y);
    }

    #[inline]
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    // ── style ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn set_fill_style(&mut self, fill: Option<FillStyle>) {
        self.fill = fill;
    }

    #[inline]
    pub fn set_stroke_style(&mut self, stroke: Option<StrokeStyle>) {
        self.stroke = stroke;
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }

    #[inline]
    pub fn is_stroked(&self) -> bool {
        self.stroke.is_some()
    }

    // ── origin ────────────────────────────────────────────────────────────

    /// Normalized origin; `(0.5, 0.5)` is the center of the outline bounds.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Origin in local units. Subtracted from every local vertex at render time.
    #[inline]
    pub fn display_origin(&self) -> Vec2 {
        self.display_origin
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = Vec2::new(x, y);
        self.display_origin = self.origin.scale(self.geometry.size());
        self.display_origin_pinned = (false, false);
    }

    /// Sets the origin in local units.
    ///
    /// The normalized origin follows when the outline has a non-zero size on
    /// that axis, so later geometry rebuilds keep the same relative anchor.
    /// On a zero-size axis the value is kept as given until a rebuild gives
    /// that axis an extent.
    pub fn set_display_origin(&mut self, x: f32, y: f32) {
        self.display_origin = Vec2::new(x, y);
        let size = self.geometry.size();
        self.display_origin_pinned = (size.x == 0.0, size.y == 0.0);
        if size.x != 0.0 {
            self.origin.x = x / size.x;
        }
        if size.y != 0.0 {
            self.origin.y = y / size.y;
        }
    }

    fn refresh_display_origin(&mut self) {
        let size = self.geometry.size();
        let (px, py) = &mut self.display_origin_pinned;
        refresh_axis(&mut self.origin.x, &mut self.display_origin.x, px, size.x);
        refresh_axis(&mut self.origin.y, &mut self.display_origin.y, py, size.y);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Replaces the outline and marks geometry dirty.
    pub fn set_kind(&mut self, kind: ShapeKind) {
        if self.kind != kind {
            self.kind = kind;
            self.geometry_dirty = true;
        }
    }

    #[inline]
    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    #[inline]
    pub fn is_geometry_dirty(&self) -> bool {
        self.geometry_dirty
    }

    /// Rebuilds cached geometry if the outline changed.
    ///
    /// On failure the geometry is left empty and the flag is cleared, so a
    /// broken outline renders nothing instead of being retried every frame.
    pub fn prepare(&mut self) -> Result<()> {
        if !self.geometry_dirty {
            return Ok(());
        }
        self.geometry_dirty = false;

        let result = self
            .geometry
            .rebuild(&self.kind)
            .context("failed to rebuild shape geometry");
        self.refresh_display_origin();

        log::trace!(
            "shape geometry rebuilt: {} fill vertices, {} path points",
            self.geometry.fill_vertices().len(),
            self.geometry.stroke_path().len()
        );
        result
    }
}

fn refresh_axis(origin: &mut f32, display: &mut f32, pinned: &mut bool, size: f32) {
    if !*pinned {
        *display = *origin * size;
    } else if size != 0.0 {
        *origin = *display / size;
        *pinned = false;
    }
}
