// seeker_core/src/utils/angles.rs

use num_traits::{Float, FloatConst};

/// Wraps an angle into `(-pi, pi]`.
pub fn wrap_angle<T: Float + FloatConst>(angle: T) -> T {
    let two_pi = T::TAU();
    let mut a = angle % two_pi;
    if a <= -T::PI() {
        a = a + two_pi;
    } else if a > T::PI() {
        a = a - two_pi;
    }
    a
}

/// Smallest signed rotation that takes `from` onto `to`.
/// Positive means turn left.
pub fn shortest_angle<T: Float + FloatConst>(from: T, to: T) -> T {
    wrap_angle(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        assert_abs_diff_eq!(wrap_angle(3.5 * PI), -0.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(-PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(2.5 * PI), 0.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(-0.25f32), -0.25f32, epsilon = 1e-6);
    }

    #[test]
    fn shortest_angle_takes_the_short_way_round() {
        assert_abs_diff_eq!(shortest_angle(3.0, -3.0), 2.0 * PI - 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(shortest_angle(-0.5, 0.5), 1.0, epsilon = 1e-12);
    }
}
