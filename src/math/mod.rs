pub mod trig;
pub mod util_2d;

pub use trig::{fast_cos, fast_sin, fast_tan, TrigTable, TRIG};
pub use util_2d::{find_angle_in_triangle, iso_to_screen, rotate_around_center, screen_to_iso};

/// Number of entries in each trig lookup table (one per integer degree).
pub const TRIG_TABLE_SIZE: usize = 360;

/// Quantization factor applied to every table entry (three decimal digits).
pub const TRIG_PRECISION: f64 = 1000.0;

/// Below this value of `sin(half_angle)` a quaternion axis is considered undefined.
pub const AXIS_ANGLE_EPSILON: f64 = 1e-4;

/// Multiply degrees by this to get radians.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Multiply radians by this to get degrees.
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Returns the smallest power of two strictly greater than `value`.
///
/// Values below `1` yield `1`, `1` yields `2`, and any power of two `t` yields `2 * t`.
#[must_use]
pub fn next_power_of_2(value: f64) -> f64 {
    let mut num = 1.0;
    while num <= value {
        num *= 2.0;
    }
    num
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_power_of_2_doubles_powers() {
        let mut t = 1.0;
        for _ in 1..=30 {
            t *= 2.0;
            assert_eq!(next_power_of_2(t), t * 2.0);
        }
    }

    #[test]
    fn next_power_of_2_small_values() {
        assert_eq!(next_power_of_2(0.0), 1.0);
        assert_eq!(next_power_of_2(1.0), 2.0);
        assert_eq!(next_power_of_2(3.0), 4.0);
        assert_eq!(next_power_of_2(-5.0), 1.0);
    }

    #[test]
    fn conversion_constants_are_reciprocal() {
        assert!((DEG_TO_RAD * RAD_TO_DEG - 1.0).abs() < 1e-15);
    }
}
