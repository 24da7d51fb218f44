use anyhow::Result;

use trigon_engine::coords::{TransformMatrix, Vec2};
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::render::{render_shape, BatchConfig, ScratchMatrices, TriangleBatch};
use trigon_engine::scene::{Camera, Shape, ShapeKind};

/// Shapes nested under one container transform.
struct Group {
    matrix: TransformMatrix,
    children: Vec<Shape>,
}

fn build_scene() -> Result<(Vec<Shape>, Group)> {
    let mut roots = vec![
        Shape::triangle(Vec2::new(0.0, -50.0), Vec2::new(43.0, 25.0), Vec2::new(-43.0, 25.0))
            .with_position(100.0, 100.0)
            .with_fill(0xff0000, 1.0)
            .with_stroke(4.0, 0xffffff, 1.0),
        Shape::rectangle(120.0, 60.0)
            .with_position(320.0, 120.0)
            .with_fill(0x3366ff, 0.8),
        Shape::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(60.0, 10.0),
            Vec2::new(80.0, 70.0),
            Vec2::new(30.0, 40.0),
            Vec2::new(-10.0, 60.0),
        ])?
        .with_position(520.0, 300.0)
        .with_stroke(1.5, 0x00ff99, 1.0),
    ];

    // HUD element: ignores camera scroll.
    let mut hud = Shape::rectangle(200.0, 24.0)
        .with_origin(0.0, 0.0)
        .with_position(8.0, 8.0)
        .with_fill(0x000000, 0.5);
    hud.set_scroll_factor(0.0, 0.0);
    roots.push(hud);

    let mut children = Vec::new();
    for i in 0..6 {
        let mut s = Shape::rectangle(16.0, 16.0)
            .with_position(i as f32 * 24.0, 0.0)
            .with_fill(0xffcc00, 1.0)
            .with_stroke(3.0, 0x222222, 1.0);
        s.set_rotation(i as f32 * 0.15);
        children.push(s);
    }
    let group = Group {
        matrix: TransformMatrix::from_itrs(200.0, 400.0, -0.2, 1.5, 1.5),
        children,
    };

    Ok((roots, group))
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let (mut roots, mut group) = build_scene()?;

    let mut camera = Camera::new(0.0, 0.0, 800.0, 600.0);
    let mut batch = TriangleBatch::new(BatchConfig::default());
    let mut scratch = ScratchMatrices::new();

    for frame in 0..3u32 {
        // Grow the first group child each frame to exercise geometry rebuilds.
        if let Some(first) = group.children.first_mut() {
            let side = 16.0 + frame as f32 * 4.0;
            first.set_kind(ShapeKind::Rectangle(Vec2::new(side, side)));
        }
        for shape in roots.iter_mut().chain(group.children.iter_mut()) {
            if let Err(e) = shape.prepare() {
                log::warn!("shape skipped: {e:#}");
            }
        }

        camera.set_scroll(frame as f32 * 15.0, frame as f32 * 5.0);
        camera.alpha = 1.0 - frame as f32 * 0.25;
        let snapshot = camera.snapshot();

        batch.clear();
        for shape in &roots {
            render_shape(&mut batch, shape, &snapshot, None, &mut scratch);
        }
        for shape in &group.children {
            render_shape(&mut batch, shape, &snapshot, Some(&group.matrix), &mut scratch);
        }

        log::info!(
            "frame {frame}: {} triangles, {} vertices, {} draw call(s)",
            batch.triangle_count(),
            batch.vertices().len(),
            batch.draw_count()
        );
    }

    Ok(())
}
