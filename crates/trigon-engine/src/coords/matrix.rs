use super::Vec2;

/// 2D affine transform.
///
/// Maps a point as:
/// - `x' = a*x + c*y + e`
/// - `y' = b*x + d*y + f`
///
/// `a`/`b` are the transformed X axis, `c`/`d` the transformed Y axis and
/// `e`/`f` the translation. Values are plain `f32` and are never validated;
/// NaN input propagates to every coefficient it touches.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformMatrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformMatrix {
    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn translation(x: f32, y: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Builds an identity-translate-rotate-scale matrix.
    ///
    /// The result scales, then rotates about the local origin, then
    /// translates to `(x, y)`.
    #[inline]
    pub fn from_itrs(x: f32, y: f32, rotation: f32, scale_x: f32, scale_y: f32) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self {
            a: cos * scale_x,
            b: sin * scale_x,
            c: -sin * scale_y,
            d: cos * scale_y,
            e: x,
            f: y,
        }
    }

    /// Returns the translation component.
    #[inline]
    pub fn translation_part(&self) -> Vec2 {
        Vec2::new(self.e, self.f)
    }

    /// Overwrites the translation component.
    #[inline]
    pub fn set_translation(&mut self, x: f32, y: f32) {
        self.e = x;
        self.f = y;
    }

    /// Post-translates in local space: `self ∘ translate(x, y)`.
    #[inline]
    pub fn translate(&mut self, x: f32, y: f32) {
        self.e = self.a * x + self.c * y + self.e;
        self.f = self.b * x + self.d * y + self.f;
    }

    /// Returns `self ∘ rhs`: applying the result equals applying `rhs` first,
    /// then `self`.
    ///
    /// Order matters. `camera.multiply(&shape)` maps shape-local points to
    /// view space; the reverse product does not.
    #[inline]
    pub fn multiply(&self, rhs: &TransformMatrix) -> TransformMatrix {
        TransformMatrix {
            a: rhs.a * self.a + rhs.b * self.c,
            b: rhs.a * self.b + rhs.b * self.d,
            c: rhs.c * self.a + rhs.d * self.c,
            d: rhs.c * self.b + rhs.d * self.d,
            e: rhs.e * self.a + rhs.f * self.c + self.e,
            f: rhs.e * self.b + rhs.f * self.d + self.f,
        }
    }

    /// Returns `self ∘ translate(offset_x, offset_y) ∘ rhs`.
    ///
    /// Used to fold a world-space offset (camera scroll) in between a camera
    /// and a parent transform in one step.
    #[inline]
    pub fn multiply_with_offset(
        &self,
        rhs: &TransformMatrix,
        offset_x: f32,
        offset_y: f32,
    ) -> TransformMatrix {
        let pe = offset_x * self.a + offset_y * self.c + self.e;
        let pf = offset_x * self.b + offset_y * self.d + self.f;

        TransformMatrix {
            a: rhs.a * self.a + rhs.b * self.c,
            b: rhs.a * self.b + rhs.b * self.d,
            c: rhs.c * self.a + rhs.d * self.c,
            d: rhs.c * self.b + rhs.d * self.d,
            e: rhs.e * self.a + rhs.f * self.c + pe,
            f: rhs.e * self.b + rhs.f * self.d + pf,
        }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.e.is_finite()
            && self.f.is_finite()
    }
}
