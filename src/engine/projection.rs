use crate::{
    engine::{caster::RayHit, types::Screen},
    renderer::{ColumnSpan, Rgba},
};

/// Pixel height of a wall one map unit away.  A tuning constant, not a
/// focal length: map-scale distances give columns about a screen tall.
pub const PROJECTION_SCALE: f64 = 7500.0;

/// Distances below this are clamped so a viewer standing on a wall line
/// never divides by zero.
pub const MIN_DISTANCE: f64 = 0.001;

/// On-screen height of a wall `distance` map units away.
///
/// Every column uses the same scale regardless of its angle inside the
/// FoV, so straight walls bow slightly (fisheye).
#[inline]
pub fn column_height(distance: f64) -> f64 {
    PROJECTION_SCALE / distance.max(MIN_DISTANCE)
}

/// Vertically centred span for screen column `x`.
///
/// Near walls produce spans taller than the screen (negative `y_top`);
/// clipping is the renderer's job.
pub fn project(x: usize, distance: f64, color: Rgba, screen: &Screen) -> ColumnSpan {
    let tall = column_height(distance);
    let padding = (screen.h as f64 - tall) * 0.5;
    ColumnSpan {
        x,
        y_top: padding,
        y_bot: padding + tall,
        color,
    }
}

/// [`project`] for a cast result; `None` draws nothing.
#[inline]
pub fn project_hit(x: usize, hit: Option<&RayHit<'_>>, screen: &Screen) -> Option<ColumnSpan> {
    hit.map(|h| project(x, h.distance, h.wall.color(), screen))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
