//! Small 2D vector helpers shared by the force model, the curve sampler
//! and the ribbon renderer.
//!
//! Everything here is a pure function over [`Vec2`].

use glam::Vec2;

/// Unit vector in the direction of `v`.
///
/// A zero-length input yields [`Vec2::ZERO`] rather than NaN.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len == 0.0 {
        return Vec2::ZERO;
    }
    v / len
}

/// `v` rotated a quarter turn counter-clockwise: `(-y, x)`.
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Uniform Catmull-Rom interpolation between `p1` and `p2`.
///
/// `p0` and `p3` are the outer neighbours that shape the tangents.
/// At `t = 0` the result is exactly `p1`; it approaches `p2` as `t -> 1`.
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;

    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_3_4() {
        assert!(close(normalize(Vec2::new(3.0, 4.0)), Vec2::new(0.6, 0.8)));
    }

    #[test]
    fn test_perpendicular() {
        assert_eq!(perpendicular(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
        assert_eq!(perpendicular(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_catmull_rom_starts_at_p1() {
        let p0 = Vec2::new(-3.0, 7.0);
        let p1 = Vec2::new(1.5, -2.0);
        let p2 = Vec2::new(4.0, 9.0);
        let p3 = Vec2::new(12.0, 0.5);
        assert_eq!(catmull_rom(p0, p1, p2, p3, 0.0), p1);
    }

    #[test]
    fn test_catmull_rom_approaches_p2() {
        let p0 = Vec2::new(0.0, 0.0);
        let p1 = Vec2::new(10.0, 0.0);
        let p2 = Vec2::new(20.0, 5.0);
        let p3 = Vec2::new(30.0, 5.0);
        let near_end = catmull_rom(p0, p1, p2, p3, 0.9999);
        assert!((near_end - p2).length() < 0.01);
    }

    #[test]
    fn test_catmull_rom_is_continuous() {
        let p0 = Vec2::new(-50.0, 20.0);
        let p1 = Vec2::new(0.0, 0.0);
        let p2 = Vec2::new(100.0, 40.0);
        let p3 = Vec2::new(160.0, -10.0);
        let eps = 1e-3;
        let mut t = 0.0;
        while t < 0.99 {
            let a = catmull_rom(p0, p1, p2, p3, t);
            let b = catmull_rom(p0, p1, p2, p3, t + eps);
            // Derivative of the cubic is bounded by a few hundred for these points.
            assert!((a - b).length() < 500.0 * eps, "jump at t={t}");
            t += 0.05;
        }
    }

    #[test]
    fn test_catmull_rom_collinear_stays_on_line() {
        let p = |x: f32| Vec2::new(x, 2.0 * x);
        let mid = catmull_rom(p(0.0), p(1.0), p(2.0), p(3.0), 0.5);
        assert!(close(mid, p(1.5)));
    }
}
