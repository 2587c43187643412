//! Nearest-wall ray casting.
//!
//! A ray is an infinite [`Line`] through the viewer, so every wall whose line
//! crosses it yields a candidate point.  Candidates are kept only if they lie
//! on the wall itself (*containment*) and in front of the viewer (*facing*);
//! the closest survivor wins.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

use crate::world::{Line, Wall};

/// Slack (map units) accepted by [`Containment::Segment`] to absorb the
/// single-precision rounding of intersection points.
pub const SEGMENT_TOLERANCE: f64 = 1e-4;

/// How a line/line crossing is checked against the finite wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Containment {
    /// Point inside the wall's axis-aligned bounding box (inclusive).
    /// The point is already on the wall's line, so this is exact up to
    /// rounding; a hit landing on an endpoint can slip just outside.
    #[default]
    BoundingBox,
    /// Parametric `0 ≤ t ≤ 1` test along the wall with
    /// [`SEGMENT_TOLERANCE`] slack at both ends.
    Segment,
}

/// How hits behind the viewer are rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Facing {
    /// 90° sectors aligned to the axes; the hit must sit on the matching
    /// side of the viewer along both X and Y.
    #[default]
    Quadrant,
    /// `(hit − origin) · dir ≥ 0`.
    HalfPlane,
}

/// Closest wall along one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit<'w> {
    pub wall: &'w Wall,
    pub point: DVec2,
    pub distance: f64,
}

impl RayHit<'_> {
    /// Hit distance with the "no hit = ∞" convention.
    #[inline]
    pub fn distance_or_inf(hit: Option<&Self>) -> f64 {
        hit.map_or(f64::INFINITY, |h| h.distance)
    }
}

/// Stateless caster; only carries the filtering strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RayCaster {
    pub containment: Containment,
    pub facing: Facing,
}

/// Cast with the default (bounding box + quadrant) filters.
#[inline]
pub fn cast(walls: &[Wall], origin: DVec2, angle: f64) -> Option<RayHit<'_>> {
    RayCaster::default().cast(walls, origin, angle)
}

/// Fold `angle` into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid may round a tiny negative input up to exactly TAU
    if a >= TAU { 0.0 } else { a }
}

impl RayCaster {
    pub fn new(containment: Containment, facing: Facing) -> Self {
        Self {
            containment,
            facing,
        }
    }

    /// Nearest wall hit by the ray leaving `origin` at `angle`.
    ///
    /// Ties keep the earliest wall in `walls`.  `None` when nothing is hit,
    /// including for an empty wall list.
    pub fn cast<'w>(&self, walls: &'w [Wall], origin: DVec2, angle: f64) -> Option<RayHit<'w>> {
        let angle = normalize_angle(angle);
        let ray = Line::from_point_angle(origin, angle);
        let dir = DVec2::from_angle(angle);

        let mut nearest: Option<RayHit<'w>> = None;

        for wall in walls {
            let Some(point) = wall.line().intersects(&ray) else {
                continue; // parallel
            };
            if !self.on_wall(wall, point) || !self.in_front(origin, angle, dir, point) {
                continue;
            }

            let distance = point.distance(origin);
            if nearest.is_none_or(|n| distance < n.distance) {
                nearest = Some(RayHit {
                    wall,
                    point,
                    distance,
                });
            }
        }

        nearest
    }

    fn on_wall(&self, wall: &Wall, p: DVec2) -> bool {
        match self.containment {
            Containment::BoundingBox => wall.bounds().contains(p),
            Containment::Segment => {
                let seg = wall.to() - wall.from();
                let len = seg.length();
                let rel = p - wall.from();
                // along-wall position in map units and perpendicular offset
                let along = rel.dot(seg) / len;
                let across = seg.perp_dot(rel).abs() / len;
                along >= -SEGMENT_TOLERANCE
                    && along <= len + SEGMENT_TOLERANCE
                    && across <= SEGMENT_TOLERANCE
            }
        }
    }

    fn in_front(&self, origin: DVec2, angle: f64, dir: DVec2, p: DVec2) -> bool {
        match self.facing {
            Facing::Quadrant => {
                let (px, py) = (p.x, p.y);
                let (ox, oy) = (origin.x, origin.y);
                if angle <= FRAC_PI_2 {
                    px >= ox && py >= oy
                } else if angle <= PI {
                    px <= ox && py >= oy
                } else if angle <= 3.0 * FRAC_PI_2 {
                    px <= ox && py <= oy
                } else {
                    px >= ox && py <= oy
                }
            }
            Facing::HalfPlane => (p - origin).dot(dir) >= 0.0,
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Map;
    use glam::dvec2;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64) -> Wall {
        Wall::new(0x00_FFFFFF, dvec2(x0, y0), dvec2(x1, y1)).unwrap()
    }

    fn all_casters() -> [RayCaster; 4] {
        [
            RayCaster::new(Containment::BoundingBox, Facing::Quadrant),
            RayCaster::new(Containment::BoundingBox, Facing::HalfPlane),
            RayCaster::new(Containment::Segment, Facing::Quadrant),
            RayCaster::new(Containment::Segment, Facing::HalfPlane),
        ]
    }

    #[test]
    fn empty_map_has_no_hit() {
        assert!(cast(&[], dvec2(1.0, 2.0), 0.5).is_none());
        assert_eq!(RayHit::distance_or_inf(None), f64::INFINITY);
    }

    #[test]
    fn off_segment_crossing_is_ignored() {
        // the ray's line crosses y = 0 at x = 20, past the end of the wall
        let walls = [wall(0.0, 0.0, 10.0, 0.0)];
        for caster in all_casters() {
            assert!(caster.cast(&walls, dvec2(20.0, 5.0), 1.5 * PI).is_none());
        }
        // sanity: the same ray over the wall does hit
        let hit = cast(&walls, dvec2(5.0, 5.0), 1.5 * PI).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-9);
    }

    #[test]
    fn walls_behind_the_viewer_are_ignored() {
        let walls = [wall(2.0, 0.0, 2.0, 10.0)];
        for caster in all_casters() {
            assert!(caster.cast(&walls, dvec2(5.0, 5.0), 0.0).is_none());
        }
        // turned around it is visible
        let hit = cast(&walls, dvec2(5.0, 5.0), PI).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-9);
    }

    #[test]
    fn nearest_wall_wins() {
        let walls = [
            wall(15.0, 0.0, 15.0, 10.0), // 10 away
            wall(10.0, 0.0, 10.0, 10.0), // 5 away
            wall(25.0, 0.0, 25.0, 10.0), // 20 away
        ];
        for caster in all_casters() {
            let hit = caster.cast(&walls, dvec2(5.0, 5.0), 0.0).unwrap();
            assert!(std::ptr::eq(hit.wall, &walls[1]));
            assert!((hit.distance - 5.0).abs() < 1e-9);
            assert_eq!(hit.point, dvec2(10.0, 5.0));
        }
    }

    #[test]
    fn ties_keep_first_wall() {
        let walls = [
            Wall::new(1, dvec2(10.0, 0.0), dvec2(10.0, 10.0)).unwrap(),
            Wall::new(2, dvec2(10.0, 10.0), dvec2(10.0, 0.0)).unwrap(),
        ];
        let hit = cast(&walls, dvec2(5.0, 5.0), 0.0).unwrap();
        assert_eq!(hit.wall.color(), 1);
    }

    #[test]
    fn parallel_walls_are_skipped() {
        let walls = [wall(0.0, 5.0, 10.0, 5.0), wall(8.0, 0.0, 8.0, 10.0)];
        let hit = cast(&walls, dvec2(0.0, 5.0), 0.0).unwrap();
        assert_eq!(hit.wall.from(), dvec2(8.0, 0.0));
    }

    #[test]
    fn angles_are_normalised() {
        let walls = [wall(10.0, 0.0, 10.0, 10.0)];
        let origin = dvec2(5.0, 5.0);
        for angle in [0.0, TAU, -TAU, 3.0 * TAU] {
            let hit = cast(&walls, origin, angle).unwrap();
            assert!((hit.distance - 5.0).abs() < 1e-6, "angle {angle}");
        }
        assert!((normalize_angle(-FRAC_PI_2) - 1.5 * PI).abs() < 1e-12);
        assert!(normalize_angle(-1e-300) < TAU);
    }

    #[test]
    fn containment_modes_agree_on_diagonal_walls() {
        let walls = [wall(0.0, 0.0, 10.0, 10.0)];
        let bbox = RayCaster::new(Containment::BoundingBox, Facing::HalfPlane);
        let seg = RayCaster::new(Containment::Segment, Facing::HalfPlane);

        // heading down-right from (0, 5) crosses y = x at (2.5, 2.5)
        let down = 1.75 * PI;
        let a = bbox.cast(&walls, dvec2(0.0, 5.0), down).unwrap();
        let b = seg.cast(&walls, dvec2(0.0, 5.0), down).unwrap();
        assert!((a.point - dvec2(2.5, 2.5)).length() < 1e-4);
        assert_eq!(a.point, b.point);

        // crossing the wall's line past its far end
        assert!(bbox.cast(&walls, dvec2(0.0, 30.0), down).is_none());
        assert!(seg.cast(&walls, dvec2(0.0, 30.0), down).is_none());
    }

    #[test]
    fn segment_containment_tolerates_rounding_at_endpoints() {
        let w = wall(0.0, 0.0, 10.0, 0.0);
        let bbox = RayCaster::new(Containment::BoundingBox, Facing::Quadrant);
        let seg = RayCaster::new(Containment::Segment, Facing::Quadrant);

        let just_past = dvec2(10.0 + SEGMENT_TOLERANCE * 0.5, 0.0);
        assert!(!bbox.on_wall(&w, just_past));
        assert!(seg.on_wall(&w, just_past));

        let far_past = dvec2(10.0 + SEGMENT_TOLERANCE * 10.0, 0.0);
        assert!(!seg.on_wall(&w, far_past));
        assert!(!seg.on_wall(&w, dvec2(5.0, 0.01)));
    }

    #[test]
    fn enclosed_viewer_always_hits() {
        let map = Map::sample();
        let origin = dvec2(30.0, 50.0);

        let hit = cast(&map.walls, origin, PI).unwrap();
        assert!(hit.distance.is_finite());
        assert!((hit.distance - 30.0).abs() < 1e-6);
        assert_eq!(hit.wall.from(), dvec2(0.0, 0.0));

        for caster in all_casters() {
            for i in 0..360 {
                let angle = (i as f64).to_radians();
                let hit = caster.cast(&map.walls, origin, angle);
                assert!(hit.is_some(), "{caster:?} missed at {i}°");
            }
        }
    }
}
