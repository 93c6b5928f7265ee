use crate::pose::Point;

/// Fold an arbitrary signed angle in degrees into `[0, 180]`.
fn fold(degrees: f32) -> f32 {
    let d = degrees.abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

#[inline]
fn is_degenerate(v: Point) -> bool {
    v.x() == 0.0 && v.y() == 0.0
}

#[inline]
fn heading(v: Point) -> f32 {
    v.y().atan2(v.x()).to_degrees()
}

pub fn joint_angle(vertex: Point, a: Point, b: Point) -> f32 {
    let (va, vb) = (a - vertex, b - vertex);
    if is_degenerate(va) || is_degenerate(vb) {
        return 0.0;
    }
    fold(heading(va) - heading(vb))
}

/// Angle of the ray `from -> to` away from the downward vertical. Image y
/// grows down the frame.
pub fn inclination(from: Point, to: Point) -> f32 {
    let v = to - from;
    if is_degenerate(v) {
        return 0.0;
    }
    fold(heading(v) - 90.0)
}

#[cfg(test)]
mod tests {
    use super::{fold, inclination, joint_angle};
    use crate::pose::Point;
    use assert_approx_eq::assert_approx_eq;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn fold_wraps_into_half_turn() {
        assert_approx_eq!(fold(-90.0), 90.0);
        assert_approx_eq!(fold(270.0), 90.0);
        assert_approx_eq!(fold(360.0), 0.0);
        assert_approx_eq!(fold(180.0), 180.0);
    }

    #[test]
    fn straight_joint() {
        assert_approx_eq!(joint_angle(p(0.5, 0.0), p(0.0, 0.0), p(1.0, 0.0)), 180.0);
    }

    #[test]
    fn right_angle_joint() {
        assert_approx_eq!(joint_angle(p(0.5, 0.0), p(0.0, 0.0), p(0.5, 0.5)), 90.0);
    }

    #[test]
    fn joint_angle_is_symmetric() {
        let (v, a, b) = (p(0.2, 0.3), p(0.9, 0.1), p(-0.4, 0.8));
        assert_approx_eq!(joint_angle(v, a, b), joint_angle(v, b, a));
    }

    #[test]
    fn reflex_difference_is_folded() {
        // headings of 170 and -170 differ by 340, which is 20 the short way
        let v = p(0.0, 0.0);
        let a = p((170.0_f32).to_radians().cos(), (170.0_f32).to_radians().sin());
        let b = p((-170.0_f32).to_radians().cos(), (-170.0_f32).to_radians().sin());
        assert_approx_eq!(joint_angle(v, a, b), 20.0, 1e-3);
    }

    #[test]
    fn degenerate_points_are_zero() {
        assert_eq!(joint_angle(p(1.0, 1.0), p(1.0, 1.0), p(2.0, 2.0)), 0.0);
        assert_eq!(inclination(p(1.0, 1.0), p(1.0, 1.0)), 0.0);
    }

    #[test]
    fn vertical_and_horizontal_inclination() {
        let top = p(0.5, 0.2);
        assert_approx_eq!(inclination(top, p(0.5, 0.6)), 0.0);
        assert_approx_eq!(inclination(top, p(0.9, 0.2)), 90.0);
        assert_approx_eq!(inclination(top, p(0.1, 0.2)), 90.0);
        assert_approx_eq!(inclination(top, p(0.5, 0.0)), 180.0);
    }

    #[test]
    fn inclination_of_diagonal() {
        assert_approx_eq!(inclination(p(0.0, 0.0), p(1.0, 1.0)), 45.0, 1e-4);
        assert_approx_eq!(inclination(p(0.0, 0.0), p(-1.0, -1.0)), 135.0, 1e-4);
    }
}
