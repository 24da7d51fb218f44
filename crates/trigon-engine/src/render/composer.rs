use crate::coords::TransformMatrix;
use crate::scene::{CameraSnapshot, Transform};

/// Working matrices for one shape.
///
/// Owned by the caller and reused across shapes. [`compose`] overwrites all
/// three on every call, so nothing carries over between shapes.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScratchMatrices {
    /// Local → world, scroll-adjusted unless a parent is present.
    pub shape: TransformMatrix,
    /// World → view, with parent and scroll folded in when a parent is present.
    pub camera: TransformMatrix,
    /// Local → view: `camera ∘ shape`.
    pub calc: TransformMatrix,
}

impl ScratchMatrices {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builds the shape, camera and combined matrices for one shape.
///
/// Camera scroll, scaled by the shape's scroll factor, is applied exactly
/// once in world units:
/// - with a parent it is folded into the camera matrix between camera and
///   parent, and the shape translation stays raw
/// - without a parent it is subtracted from the shape translation
///
/// Either way it never passes through the shape's rotation or scale.
pub fn compose(
    transform: &Transform,
    camera: &CameraSnapshot,
    parent: Option<&TransformMatrix>,
    out: &mut ScratchMatrices,
) {
    let pos = transform.position;
    let scroll = camera.scroll.scale(transform.scroll_factor);

    out.shape = TransformMatrix::from_itrs(
        pos.x,
        pos.y,
        transform.rotation,
        transform.scale.x,
        transform.scale.y,
    );

    match parent {
        Some(parent) => {
            out.camera = camera.matrix.multiply_with_offset(parent, -scroll.x, -scroll.y);
            out.shape.set_translation(pos.x, pos.y);
        }
        None => {
            out.camera = camera.matrix;
            out.shape.e -= scroll.x;
            out.shape.f -= scroll.y;
        }
    }

    out.calc = out.camera.multiply(&out.shape);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::scene::Camera;

    const EPS: f32 = 1e-3;

    fn assert_near(a: Vec2, b: Vec2) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "expected {b:?}, got {a:?}"
        );
    }

    fn transform(x: f32, y: f32, rotation: f32, sx: f32, sy: f32) -> Transform {
        Transform {
            position: Vec2::new(x, y),
            rotation,
            scale: Vec2::new(sx, sy),
            ..Transform::default()
        }
    }

    fn camera(scroll_x: f32, scroll_y: f32, zoom: f32) -> CameraSnapshot {
        let mut cam = Camera::new(0.0, 0.0, 640.0, 480.0);
        cam.zoom = zoom;
        cam.rotation = 0.25;
        cam.set_scroll(scroll_x, scroll_y);
        cam.snapshot()
    }

    // ── composition order ─────────────────────────────────────────────────

    #[test]
    fn no_parent_matches_manual_shape_then_camera() {
        let t = transform(100.0, 50.0, 0.6, 2.0, 0.5);
        let cam = camera(30.0, -20.0, 1.5);
        let mut m = ScratchMatrices::new();
        compose(&t, &cam, None, &mut m);

        let p = Vec2::new(7.0, -3.0);

        // Apply the shape by hand, subtract scroll, then apply the camera.
        let (sin, cos) = 0.6f32.sin_cos();
        let local = Vec2::new(p.x * 2.0, p.y * 0.5);
        let rotated = Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos);
        let world = rotated + Vec2::new(100.0 - 30.0, 50.0 + 20.0);
        let expected = cam.matrix.transform_point(world);

        assert_near(m.calc.transform_point(p), expected);
        assert_near(m.camera.transform_point(m.shape.transform_point(p)), expected);
    }

    #[test]
    fn reversed_product_differs() {
        let t = transform(100.0, 50.0, 0.6, 2.0, 0.5);
        let cam = camera(0.0, 0.0, 1.5);
        let mut m = ScratchMatrices::new();
        compose(&t, &cam, None, &mut m);

        let wrong = m.shape.multiply(&m.camera);
        let p = Vec2::new(10.0, 10.0);
        let a = m.calc.transform_point(p);
        let b = wrong.transform_point(p);
        assert!((a.x - b.x).abs() > 1.0 || (a.y - b.y).abs() > 1.0);
    }

    // ── scroll compensation ───────────────────────────────────────────────

    #[test]
    fn identity_parent_does_not_change_output() {
        let t = transform(120.0, 80.0, 0.3, 1.5, 1.5);
        let cam = camera(45.0, 60.0, 1.0);

        let mut plain = ScratchMatrices::new();
        compose(&t, &cam, None, &mut plain);

        let mut nested = ScratchMatrices::new();
        compose(&t, &cam, Some(&TransformMatrix::identity()), &mut nested);

        for p in [Vec2::zero(), Vec2::new(10.0, -4.0), Vec2::new(-25.0, 33.0)] {
            assert_near(nested.calc.transform_point(p), plain.calc.transform_point(p));
        }
        // Scroll went into the camera matrix, not the shape translation.
        assert_eq!(nested.shape.translation_part(), Vec2::new(120.0, 80.0));
    }

    #[test]
    fn scroll_factor_zero_pins_shape_to_screen() {
        let mut t = transform(10.0, 20.0, 0.0, 1.0, 1.0);
        t.scroll_factor = Vec2::zero();
        let cam = CameraSnapshot {
            scroll: Vec2::new(500.0, 500.0),
            ..CameraSnapshot::default()
        };
        let mut m = ScratchMatrices::new();
        compose(&t, &cam, None, &mut m);
        assert_eq!(m.calc.transform_point(Vec2::zero()), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn scroll_offset_ignores_shape_scale_and_rotation() {
        let cam = CameraSnapshot {
            scroll: Vec2::new(40.0, 10.0),
            ..CameraSnapshot::default()
        };
        let mut plain = ScratchMatrices::new();
        compose(&transform(0.0, 0.0, 0.0, 1.0, 1.0), &cam, None, &mut plain);
        let mut scaled = ScratchMatrices::new();
        compose(&transform(0.0, 0.0, 1.2, 3.0, 3.0), &cam, None, &mut scaled);

        // The local origin lands at -scroll regardless of the shape's own transform.
        assert_near(plain.calc.transform_point(Vec2::zero()), Vec2::new(-40.0, -10.0));
        assert_near(scaled.calc.transform_point(Vec2::zero()), Vec2::new(-40.0, -10.0));
    }

    #[test]
    fn parent_translation_is_applied_after_shape() {
        let t = transform(5.0, 5.0, 0.0, 1.0, 1.0);
        let cam = CameraSnapshot {
            scroll: Vec2::new(1.0, 2.0),
            ..CameraSnapshot::default()
        };
        let parent = TransformMatrix::translation(100.0, 200.0);
        let mut m = ScratchMatrices::new();
        compose(&t, &cam, Some(&parent), &mut m);
        assert_eq!(m.calc.transform_point(Vec2::zero()), Vec2::new(104.0, 203.0));
    }

    // ── scratch reuse ─────────────────────────────────────────────────────

    #[test]
    fn compose_fully_overwrites_scratch() {
        let cam = camera(12.0, 34.0, 2.0);
        let t = transform(1.0, 2.0, 0.1, 1.0, 1.0);

        let mut fresh = ScratchMatrices::new();
        compose(&t, &cam, None, &mut fresh);

        let mut reused = ScratchMatrices::new();
        compose(
            &transform(999.0, -999.0, 2.0, 7.0, 7.0),
            &cam,
            Some(&TransformMatrix::translation(50.0, 50.0)),
            &mut reused,
        );
        compose(&t, &cam, None, &mut reused);

        assert_eq!(reused, fresh);
    }
}
