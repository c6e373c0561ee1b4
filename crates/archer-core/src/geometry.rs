//! Steering and collision geometry.
//!
//! All functions here are pure. Angles are in degrees; the arena's y axis
//! points down, so an angle of 90° points towards the bottom edge.
//!
//! # Example
//!
//! ```
//! use archer_core::geometry::{angle_to_target, step_along};
//! use glam::DVec2;
//!
//! let archer = DVec2::new(100.0, 100.0);
//! let goblin = DVec2::new(100.0, 300.0);
//!
//! // The goblin is straight below the archer: -270° is the same bearing as 90°.
//! let heading = angle_to_target(archer, goblin);
//! assert!((heading + 270.0).abs() < 1e-9);
//!
//! let next = step_along(archer, heading, 4.0, 1.0);
//! assert!((next.y - 104.0).abs() < 1e-9);
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Heading, in degrees, that points from `from` towards `target`.
///
/// The raw arctangent of `dy / dx` (with `dx = from.x - target.x`,
/// `dy = from.y - target.y`) is corrected only when `dx >= 0`: by `+180°` if
/// `dy >= 0`, otherwise by `-180°`. Headings for `dx < 0` stay in
/// `(-90°, 90°)`. Rendering and steering both consume these exact values, so
/// the result is deliberately not normalised into `[0, 360)`.
///
/// Coincident points yield `0°`.
#[must_use]
pub fn angle_to_target(from: DVec2, target: DVec2) -> f64 {
    let dx = from.x - target.x;
    let dy = from.y - target.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }

    let raw = (dy / dx).atan().to_degrees();
    if dy >= 0.0 && dx >= 0.0 {
        raw + 180.0
    } else if dy <= 0.0 && dx >= 0.0 {
        raw - 180.0
    } else {
        raw
    }
}

/// Integrates `position` along `angle` (degrees) for one tick.
///
/// `speed` is in arena units per normalised tick and `delta` is the tick's
/// normalised duration (`1.0` for an on-schedule tick).
#[must_use]
pub fn step_along(position: DVec2, angle: f64, speed: f64, delta: f64) -> DVec2 {
    let radians = angle.to_radians();
    DVec2::new(
        position.x + radians.cos() * speed * delta,
        position.y + radians.sin() * speed * delta,
    )
}

/// Collision radius for a body of the given size: half its shorter side.
#[must_use]
pub fn collision_radius(size: DVec2) -> f64 {
    size.x.min(size.y) / 2.0
}

/// Averages two headings along the shorter arc between them.
///
/// When the raw difference exceeds 180°, 360° is added to the sum before
/// halving.
///
/// ```
/// use archer_core::geometry::blend_headings;
///
/// assert_eq!(blend_headings(0.0, 90.0), 45.0);
/// // Right (0°) and Up (270°) blend to up-right.
/// assert_eq!(blend_headings(0.0, 270.0), 315.0);
/// ```
#[must_use]
pub fn blend_headings(a: f64, b: f64) -> f64 {
    let mut sum = a + b;
    if (a - b).abs() > 180.0 {
        sum += 360.0;
    }
    sum / 2.0
}

/// A collision circle in arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre of the circle.
    pub center: DVec2,
    /// Radius of the circle.
    pub radius: f64,
}

impl Circle {
    /// Creates a circle from a centre and radius.
    #[must_use]
    pub const fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Creates the collision circle of a body centred at `center`.
    #[must_use]
    pub fn for_body(center: DVec2, size: DVec2) -> Self {
        Self::new(center, collision_radius(size))
    }
}

/// True iff the centres are strictly closer than the sum of the radii.
///
/// Touching circles do not overlap.
#[must_use]
pub fn circles_overlap(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    mod angle_tests {
        use super::*;

        #[test]
        fn target_to_the_right_is_zero() {
            let angle = angle_to_target(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
            assert!(angle.abs() < EPS);
        }

        #[test]
        fn target_to_the_left_is_180() {
            let angle = angle_to_target(DVec2::new(10.0, 0.0), DVec2::new(0.0, 0.0));
            assert!((angle - 180.0).abs() < EPS);
        }

        #[test]
        fn target_below_is_minus_270() {
            // dx == 0, dy < 0: atan(-inf) = -90, corrected by -180.
            let angle = angle_to_target(DVec2::new(0.0, 0.0), DVec2::new(0.0, 10.0));
            assert!((angle + 270.0).abs() < EPS);
            assert!((angle.rem_euclid(360.0) - 90.0).abs() < EPS);
        }

        #[test]
        fn target_above_is_270() {
            let angle = angle_to_target(DVec2::new(0.0, 10.0), DVec2::new(0.0, 0.0));
            assert!((angle - 270.0).abs() < EPS);
        }

        #[test]
        fn upper_left_target_keeps_positive_correction() {
            // dx > 0, dy > 0: atan(1) = 45, corrected by +180.
            let angle = angle_to_target(DVec2::new(10.0, 10.0), DVec2::new(0.0, 0.0));
            assert!((angle - 225.0).abs() < EPS);
        }

        #[test]
        fn lower_left_target_keeps_negative_correction() {
            // dx > 0, dy < 0: atan(-1) = -45, corrected by -180.
            let angle = angle_to_target(DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0));
            assert!((angle + 225.0).abs() < EPS);
        }

        #[test]
        fn right_side_targets_are_uncorrected() {
            // dx < 0, dy > 0: target up and to the right.
            let angle = angle_to_target(DVec2::new(0.0, 10.0), DVec2::new(10.0, 0.0));
            assert!((angle + 45.0).abs() < EPS);
        }

        #[test]
        fn coincident_points_yield_zero() {
            let p = DVec2::new(3.0, 4.0);
            assert_eq!(angle_to_target(p, p), 0.0);
        }
    }

    mod step_tests {
        use super::*;

        #[test]
        fn step_scales_with_speed_and_delta() {
            let next = step_along(DVec2::ZERO, 0.0, 5.0, 0.5);
            assert!((next.x - 2.5).abs() < EPS);
            assert!(next.y.abs() < EPS);
        }

        #[test]
        fn zero_delta_does_not_move() {
            let start = DVec2::new(7.0, 9.0);
            assert_eq!(step_along(start, 123.0, 10.0, 0.0), start);
        }

        #[test]
        fn stepping_toward_target_reaches_it() {
            let from = DVec2::new(0.0, 0.0);
            let target = DVec2::new(30.0, 40.0);
            let heading = angle_to_target(from, target);
            let next = step_along(from, heading, 50.0, 1.0);
            assert!(next.distance(target) < 1e-6);
        }
    }

    mod blend_tests {
        use super::*;

        #[test]
        fn adjacent_quadrants_average_directly() {
            assert_eq!(blend_headings(90.0, 180.0), 135.0);
            assert_eq!(blend_headings(180.0, 270.0), 225.0);
        }

        #[test]
        fn wraparound_takes_short_arc() {
            assert_eq!(blend_headings(270.0, 0.0), 315.0);
        }
    }

    mod collision_tests {
        use super::*;

        #[test]
        fn radius_uses_shorter_side() {
            assert_eq!(collision_radius(DVec2::new(30.0, 8.0)), 4.0);
            assert_eq!(collision_radius(DVec2::new(40.0, 40.0)), 20.0);
        }

        #[test]
        fn touching_circles_do_not_overlap() {
            let a = Circle::new(DVec2::new(0.0, 0.0), 5.0);
            let b = Circle::new(DVec2::new(10.0, 0.0), 5.0);
            assert!(!circles_overlap(a, b));
        }

        #[test]
        fn concentric_circles_overlap() {
            let a = Circle::new(DVec2::new(1.0, 1.0), 1.0);
            assert!(circles_overlap(a, a));
        }
    }

    proptest! {
        #[test]
        fn overlap_matches_distance_rule(
            ax in -500.0f64..500.0, ay in -500.0f64..500.0,
            bx in -500.0f64..500.0, by in -500.0f64..500.0,
            aw in 1.0f64..100.0, ah in 1.0f64..100.0,
            bw in 1.0f64..100.0, bh in 1.0f64..100.0,
        ) {
            let a = Circle::for_body(DVec2::new(ax, ay), DVec2::new(aw, ah));
            let b = Circle::for_body(DVec2::new(bx, by), DVec2::new(bw, bh));

            prop_assert_eq!(a.radius, aw.min(ah) / 2.0);
            prop_assert_eq!(b.radius, bw.min(bh) / 2.0);

            let distance = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
            prop_assert_eq!(circles_overlap(a, b), distance < a.radius + b.radius);
            prop_assert_eq!(circles_overlap(a, b), circles_overlap(b, a));
        }

        #[test]
        fn steering_closes_distance_to_stationary_target(
            sx in 0.0f64..600.0, sy in 0.0f64..600.0,
            tx in 0.0f64..600.0, ty in 0.0f64..600.0,
            speed in 0.5f64..8.0,
        ) {
            prop_assume!((sx - tx).abs() > 1e-6);

            let target = DVec2::new(tx, ty);
            let mut position = DVec2::new(sx, sy);
            let mut distance = position.distance(target);

            // Stop once a full step could overshoot.
            while distance > speed {
                let heading = angle_to_target(position, target);
                position = step_along(position, heading, speed, 1.0);
                let next = position.distance(target);
                prop_assert!(next < distance, "moved away: {} -> {}", distance, next);
                distance = next;
            }
        }
    }
}
