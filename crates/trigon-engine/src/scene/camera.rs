use crate::coords::{TransformMatrix, Vec2};

/// 2D camera.
///
/// `position`/`size` describe the camera's viewport on the render target.
/// Zoom and rotation pivot around the viewport center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub size: Vec2,
    pub scroll: Vec2,
    pub zoom: f32,
    pub rotation: f32,
    pub alpha: f32,
}

impl Camera {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            scroll: Vec2::zero(),
            zoom: 1.0,
            rotation: 0.0,
            alpha: 1.0,
        }
    }

    #[inline]
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll = Vec2::new(x, y);
    }

    /// Captures the read-only state a render pass needs.
    pub fn snapshot(&self) -> CameraSnapshot {
        let half = self.size * 0.5;
        let mut matrix = TransformMatrix::from_itrs(
            self.position.x + half.x,
            self.position.y + half.y,
            self.rotation,
            self.zoom,
            self.zoom,
        );
        matrix.translate(-half.x, -half.y);

        CameraSnapshot {
            matrix,
            scroll: self.scroll,
            alpha: self.alpha,
        }
    }
}

/// Per-frame camera state consumed by the render path.
///
/// `matrix` maps scroll-compensated world space to view space. Scroll is
/// kept separate because each shape scales it by its own scroll factor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraSnapshot {
    pub matrix: TransformMatrix,
    pub scroll: Vec2,
    pub alpha: f32,
}

impl Default for CameraSnapshot {
    fn default() -> Self {
        Self {
            matrix: TransformMatrix::identity(),
            scroll: Vec2::zero(),
            alpha: 1.0,
        }
    }
}
