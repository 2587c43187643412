use glam::{DVec2, dvec2};

/// Player view-point on the map plane.
///
/// * Only **yaw** exists – there is no pitch or eye height.
/// * `angle` is left unwrapped; the caster normalises every ray itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: DVec2, // map units
    pub angle: f64, // radians (0 = +X, counter-clockwise)
    pub fov: f64,   // full horizontal FoV (radians)
}

impl Default for Camera {
    /// Start pose of the built-in sample map.
    fn default() -> Self {
        Self::new(dvec2(30.0, 50.0), std::f64::consts::PI, std::f64::consts::PI / 6.0)
    }
}

impl Camera {
    pub fn new(pos: DVec2, angle: f64, fov: f64) -> Self {
        Self { pos, angle, fov }
    }

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.angle)
    }

    /// Move `dist` map units along the facing direction (negative = back).
    /// Walls do not block movement.
    pub fn step(&mut self, dist: f64) {
        self.pos += self.forward() * dist;
    }

    /// Add `delta` radians to the heading.
    pub fn turn(&mut self, delta: f64) {
        self.angle += delta;
    }

    /// Angle of the leftmost ray of the view cone.
    #[inline]
    pub fn first_ray(&self) -> f64 {
        self.angle - self.fov * 0.5
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
