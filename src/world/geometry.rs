use glam::{DVec2, dvec2};
use thiserror::Error;

use crate::renderer::Rgba;

/// Distance of the helper point used to turn (point, angle) into a line.
/// Any non-zero value yields the same infinite line.
pub const RAY_PROBE_LEN: f64 = 10.0;

/*---------------------------- lines ---------------------------------*/

/// Infinite 2-D line in implicit form `a·x + b·y + c = 0`.
///
/// Works for vertical lines without any special casing, which is why the
/// caster uses it instead of slope/intercept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    /// Line through `from` and `to`.  Degenerate (`a = b = 0`) when the two
    /// points coincide – callers must not do that.
    #[inline]
    pub fn from_points(from: DVec2, to: DVec2) -> Self {
        let a = to.y - from.y;
        let b = from.x - to.x;
        let c = -(a * from.x + b * from.y);
        Self { a, b, c }
    }

    /// Line through `point` heading along `angle` (radians, 0 = +X, CCW).
    #[inline]
    pub fn from_point_angle(point: DVec2, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let probe = point + dvec2(c, s) * RAY_PROBE_LEN;
        Self::from_points(probe, point)
    }

    /// Unique crossing point of two lines, `None` when they are parallel or
    /// coincident.
    ///
    /// Coordinates are rounded to `f32` precision so that repeated frames
    /// see the same values for hits that sit exactly on a wall's bounds.
    pub fn intersects(&self, other: &Line) -> Option<DVec2> {
        let det = self.a * other.b - other.a * self.b;
        if det == 0.0 {
            return None;
        }

        let x = (other.b * -self.c - self.b * -other.c) / det;
        let y = (self.a * -other.c - other.a * -self.c) / det;
        Some(dvec2(round_f32(x), round_f32(y)))
    }

    /// True for the zero-vector line produced by two equal points.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }
}

#[inline(always)]
fn round_f32(v: f64) -> f64 {
    v as f32 as f64
}

/*---------------------------- walls ---------------------------------*/

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WallError {
    /// Both endpoints are the same point, so the wall spans no line.
    #[error("degenerate wall: both endpoints at ({}, {})", .at.x, .at.y)]
    Degenerate { at: DVec2 },

    /// An endpoint is NaN or infinite.
    #[error("wall endpoint is not finite: ({}, {})", .at.x, .at.y)]
    NonFinite { at: DVec2 },
}

/// Axis-aligned bounds of a wall, inclusive on every side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// One solid, single-colour wall segment of the map.
///
/// Immutable after construction; the implicit line is derived once.
#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    color: Rgba,
    from: DVec2,
    to: DVec2,
    line: Line,
}

impl Wall {
    pub fn new(color: Rgba, from: DVec2, to: DVec2) -> Result<Self, WallError> {
        for p in [from, to] {
            if !p.is_finite() {
                return Err(WallError::NonFinite { at: p });
            }
        }
        if from == to {
            return Err(WallError::Degenerate { at: from });
        }
        Ok(Self {
            color,
            from,
            to,
            line: Line::from_points(from, to),
        })
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    #[inline]
    pub fn from(&self) -> DVec2 {
        self.from
    }

    #[inline]
    pub fn to(&self) -> DVec2 {
        self.to
    }

    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.from.min(self.to),
            max: self.from.max(self.to),
        }
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn from_points_coefficients() {
        let l = Line::from_points(dvec2(1.0, 2.0), dvec2(4.0, 6.0));
        assert_eq!((l.a, l.b, l.c), (4.0, -3.0, 2.0));
        // both points satisfy the equation
        assert_eq!(l.a * 1.0 + l.b * 2.0 + l.c, 0.0);
        assert_eq!(l.a * 4.0 + l.b * 6.0 + l.c, 0.0);
    }

    #[test]
    fn parallel_lines_do_not_meet() {
        let l1 = Line::from_points(dvec2(0.0, 0.0), dvec2(10.0, 0.0));
        let l2 = Line::from_points(dvec2(0.0, 5.0), dvec2(10.0, 5.0));
        assert_eq!(l1.intersects(&l2), None);
    }

    #[test]
    fn coincident_lines_do_not_meet() {
        let l1 = Line::from_points(dvec2(0.0, 0.0), dvec2(10.0, 10.0));
        let l2 = Line::from_points(dvec2(2.0, 2.0), dvec2(7.0, 7.0));
        assert_eq!(l1.intersects(&l2), None);
    }

    #[test]
    fn probe_recovers_point_on_segment() {
        let diag = Line::from_points(dvec2(0.0, 0.0), dvec2(10.0, 10.0));
        let vertical = Line::from_points(dvec2(4.0, -1.0), dvec2(4.0, 1.0));
        let horizontal = Line::from_points(dvec2(-3.0, 7.0), dvec2(3.0, 7.0));

        assert_eq!(diag.intersects(&vertical), Some(dvec2(4.0, 4.0)));
        assert_eq!(diag.intersects(&horizontal), Some(dvec2(7.0, 7.0)));
    }

    #[test]
    fn point_angle_line_passes_through_point() {
        let p = dvec2(30.0, 50.0);
        let ray = Line::from_point_angle(p, 0.7);
        assert!((ray.a * p.x + ray.b * p.y + ray.c).abs() < 1e-9);
        assert!(!ray.is_degenerate());
    }

    #[test]
    fn intersection_is_rounded_to_single_precision() {
        let l1 = Line::from_points(dvec2(0.0, 0.0), dvec2(3.0, 1.0));
        let l2 = Line::from_points(dvec2(1.0, 0.0), dvec2(1.0, 1.0));
        let p = l1.intersects(&l2).unwrap();
        assert_eq!(p.y, (1.0f64 / 3.0) as f32 as f64);
    }

    #[test]
    fn wall_rejects_degenerate_endpoints() {
        let p = dvec2(3.0, 3.0);
        assert_eq!(Wall::new(0, p, p).unwrap_err(), WallError::Degenerate { at: p });
    }

    #[test]
    fn wall_rejects_nan() {
        let err = Wall::new(0, dvec2(f64::NAN, 0.0), dvec2(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, WallError::NonFinite { .. }));
    }

    #[test]
    fn wall_bounds_are_ordered() {
        let w = Wall::new(0x00_0000FF, dvec2(60.0, 30.0), dvec2(60.0, 0.0)).unwrap();
        let b = w.bounds();
        assert_eq!(b.min, dvec2(60.0, 0.0));
        assert_eq!(b.max, dvec2(60.0, 30.0));
        assert!(b.contains(dvec2(60.0, 15.0)));
        assert!(!b.contains(dvec2(60.0, 31.0)));
        assert_eq!(w.length(), 30.0);
        assert_eq!(*w.line(), Line::from_points(w.from(), w.to()));
    }

    #[test]
    fn intersection_symmetry_examples() {
        let l1 = Line::from_points(dvec2(0.0, 0.0), dvec2(10.0, 3.0));
        let l2 = Line::from_point_angle(dvec2(5.0, -2.0), 1.1);
        let p = l1.intersects(&l2).unwrap();
        let q = l2.intersects(&l1).unwrap();
        assert!(close(p, q), "{p} vs {q}");
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(
            x1 in -100.0f64..100.0, y1 in -100.0f64..100.0,
            a1 in 0.0f64..std::f64::consts::TAU,
            x2 in -100.0f64..100.0, y2 in -100.0f64..100.0,
            a2 in 0.0f64..std::f64::consts::TAU,
        ) {
            // keep well away from the parallel case
            let diff = (a1 - a2).rem_euclid(std::f64::consts::PI);
            prop_assume!(diff > 0.1 && diff < std::f64::consts::PI - 0.1);

            let l1 = Line::from_point_angle(dvec2(x1, y1), a1);
            let l2 = Line::from_point_angle(dvec2(x2, y2), a2);
            let p = l1.intersects(&l2).unwrap();
            let q = l2.intersects(&l1).unwrap();
            let tol = 1e-4 * (1.0 + p.length());
            prop_assert!((p - q).length() <= tol, "{} vs {}", p, q);
        }
    }
}
