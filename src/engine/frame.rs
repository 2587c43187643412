//! Per-frame draw-call builders: the column sweep and the minimap overlay.

use glam::DVec2;

use crate::{
    engine::{caster::RayCaster, projection, types::Screen},
    renderer::{DrawCall, LineSpan, Rgba},
    world::{Camera, Wall},
};

/// Top-left corner of the minimap on screen.
pub const MINIMAP_OFFSET: DVec2 = DVec2::new(10.0, 10.0);
pub const MINIMAP_COLOR: Rgba = 0x00_FFFFFF;

/// Player marker: an arrow head pointing along +X before rotation.
const ARROW: [(DVec2, DVec2); 2] = [
    (DVec2::new(3.0, 0.0), DVec2::new(-3.0, -3.0)),
    (DVec2::new(3.0, 0.0), DVec2::new(-3.0, 3.0)),
];

/// Angle of the ray through screen column `column`.
///
/// Columns span exactly `fov` radians starting at `angle − fov/2`.
#[inline]
pub fn ray_angle(camera: &Camera, column: usize, width: usize) -> f64 {
    camera.first_ray() + column as f64 * (camera.fov / width as f64)
}

/// Cast one ray per column and push a [`DrawCall::Column`] for every hit.
/// Returns the number of columns that hit a wall.
pub fn column_sweep(
    walls: &[Wall],
    camera: &Camera,
    screen: &Screen,
    caster: &RayCaster,
    out: &mut Vec<DrawCall>,
) -> usize {
    let before = out.len();
    for x in 0..screen.w {
        let hit = caster.cast(walls, camera.pos, ray_angle(camera, x, screen.w));
        if let Some(span) = projection::project_hit(x, hit.as_ref(), screen) {
            out.push(DrawCall::Column(span));
        }
    }
    out.len() - before
}

/// Top-down view of the walls and the player, straight from map units.
pub fn minimap(walls: &[Wall], camera: &Camera, out: &mut Vec<DrawCall>) {
    for w in walls {
        out.push(DrawCall::Line(LineSpan {
            from: MINIMAP_OFFSET + w.from(),
            to: MINIMAP_OFFSET + w.to(),
            color: MINIMAP_COLOR,
        }));
    }

    let rot = DVec2::from_angle(camera.angle);
    let origin = MINIMAP_OFFSET + camera.pos;
    for (a, b) in ARROW {
        out.push(DrawCall::Line(LineSpan {
            from: origin + rot.rotate(a),
            to: origin + rot.rotate(b),
            color: MINIMAP_COLOR,
        }));
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
