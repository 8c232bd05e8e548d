use serde::{Deserialize, Serialize};

use super::Matrix4x4;
use crate::error::Result;
use crate::geometry::Vector3D;
use crate::math::{AXIS_ANGLE_EPSILON, TRIG};

/// A rotation quaternion `(x, y, z, w)`, identity `(0, 0, 0, 1)`.
///
/// The axis-angle setter and the `rotate_*` helpers use the quantized trig table with an
/// integer half angle; [`Quaternion::get_axis_angle`] and [`Quaternion::set_euler`] use the
/// exact trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Builds a quaternion from Euler angles in degrees, see [`Quaternion::set_euler`].
    #[must_use]
    pub fn from_euler(x: f64, y: f64, z: f64) -> Self {
        let mut q = Self::identity();
        q.set_euler(x, y, z);
        q
    }

    pub fn set_identity(&mut self) -> &mut Self {
        self.x = 0.0;
        self.y = 0.0;
        self.z = 0.0;
        self.w = 1.0;
        self
    }

    /// Sets a rotation of `angle` degrees around `axis`.
    ///
    /// The half angle is `|angle|` truncated to an integer and shifted right once, so the sign
    /// of `angle` is discarded: `-90` and `90` give the same quaternion.
    pub fn set_axis_angle(&mut self, axis: &Vector3D, angle: f64) -> &mut Self {
        let half = half_angle(angle);
        let s = TRIG.sin(half);
        self.x = s * axis.x;
        self.y = s * axis.y;
        self.z = s * axis.z;
        self.w = TRIG.cos(half);
        self
    }

    /// Returns the rotation axis and the angle in radians.
    ///
    /// When `sin(angle / 2)` is below [`AXIS_ANGLE_EPSILON`] the axis is undefined and
    /// `(1, 0, 0)` is returned.
    #[must_use]
    pub fn get_axis_angle(&self) -> (Vector3D, f64) {
        let rad = self.w.acos() * 2.0;
        let s = (rad / 2.0).sin();
        let axis = if s > AXIS_ANGLE_EPSILON {
            Vector3D::new(self.x / s, self.y / s, self.z / s, 1.0)
        } else {
            Vector3D::new(1.0, 0.0, 0.0, 1.0)
        };
        (axis, rad)
    }

    /// Hamilton product `self = self * q`.
    pub fn multiply(&mut self, q: &Quaternion) -> &mut Self {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (q.x, q.y, q.z, q.w);

        self.x = ax * bw + aw * bx + ay * bz - az * by;
        self.y = ay * bw + aw * by + az * bx - ax * bz;
        self.z = az * bw + aw * bz + ax * by - ay * bx;
        self.w = aw * bw - ax * bx - ay * by - az * bz;
        self
    }

    /// Post-multiplies by a rotation of `angle` degrees around X.
    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        let half = half_angle(angle);
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let bx = TRIG.sin(half);
        let bw = TRIG.cos(half);

        self.x = ax * bw + aw * bx;
        self.y = ay * bw + az * bx;
        self.z = az * bw - ay * bx;
        self.w = aw * bw - ax * bx;
        self
    }

    /// Post-multiplies by a rotation of `angle` degrees around Y.
    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        let half = half_angle(angle);
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let by = TRIG.sin(half);
        let bw = TRIG.cos(half);

        self.x = ax * bw - az * by;
        self.y = ay * bw + aw * by;
        self.z = az * bw + ax * by;
        self.w = aw * bw - ay * by;
        self
    }

    /// Post-multiplies by a rotation of `angle` degrees around Z.
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        let half = half_angle(angle);
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let bz = TRIG.sin(half);
        let bw = TRIG.cos(half);

        self.x = ax * bw + ay * bz;
        self.y = ay * bw - ax * bz;
        self.z = az * bw + aw * bz;
        self.w = aw * bw - az * bz;
        self
    }

    /// Replaces `self` with its inverse, the conjugate over the squared norm.
    ///
    /// A zero quaternion stays all zeros instead of producing `NaN`.
    pub fn invert(&mut self) -> &mut Self {
        let (a0, a1, a2, a3) = (self.x, self.y, self.z, self.w);
        let dot = a0 * a0 + a1 * a1 + a2 * a2 + a3 * a3;
        let inv_dot = if dot == 0.0 {
            tracing::debug!("inverting a zero quaternion");
            0.0
        } else {
            1.0 / dot
        };

        self.x = -a0 * inv_dot;
        self.y = -a1 * inv_dot;
        self.z = -a2 * inv_dot;
        self.w = a3 * inv_dot;
        self
    }

    /// Sets the rotation from XYZ Euler angles in degrees.
    pub fn set_euler(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        let half_to_rad = 0.5 * std::f64::consts::PI / 180.0;
        let x = x * half_to_rad;
        let y = y * half_to_rad;
        let z = z * half_to_rad;

        let (sx, cx) = x.sin_cos();
        let (sy, cy) = y.sin_cos();
        let (sz, cz) = z.sin_cos();

        self.x = sx * cy * cz - cx * sy * sz;
        self.y = cx * sy * cz + sx * cy * sz;
        self.z = cx * cy * sz - sx * sy * cz;
        self.w = cx * cy * cz + sx * sy * sz;
        self
    }

    /// Scales to unit length. A zero quaternion is left as is.
    pub fn normalize(&mut self) -> &mut Self {
        let mut len = self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w;
        if len > 0.0 {
            len = 1.0 / len.sqrt();
        }

        self.x *= len;
        self.y *= len;
        self.z *= len;
        self.w *= len;
        self
    }

    /// Expands to a rotation matrix with zero translation and bottom row `(0, 0, 0, 1)`.
    #[must_use]
    pub fn to_matrix4x4(&self) -> Matrix4x4 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;

        let xx = x * x2;
        let yx = y * x2;
        let yy = y * y2;
        let zx = z * x2;
        let zy = z * y2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Matrix4x4::new([
            1.0 - yy - zz,
            yx + wz,
            zx - wy,
            0.0,
            yx - wz,
            1.0 - xx - zz,
            zy + wx,
            0.0,
            zx + wy,
            zy - wx,
            1.0 - xx - yy,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if `json` is not a valid quaternion object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `|angle|` truncated, halved with a right shift, reduced modulo 360.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn half_angle(angle: f64) -> f64 {
    let whole = angle.abs().trunc() as i64;
    ((whole >> 1) % 360) as f64
}

impl From<Quaternion> for nalgebra::Quaternion<f64> {
    fn from(q: Quaternion) -> Self {
        nalgebra::Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::Quaternion<f64>> for Quaternion {
    fn from(q: nalgebra::Quaternion<f64>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn assert_quat_close(q: &Quaternion, expected: (f64, f64, f64, f64), eps: f64) {
        assert_abs_diff_eq!(q.x, expected.0, epsilon = eps);
        assert_abs_diff_eq!(q.y, expected.1, epsilon = eps);
        assert_abs_diff_eq!(q.z, expected.2, epsilon = eps);
        assert_abs_diff_eq!(q.w, expected.3, epsilon = eps);
    }

    #[test]
    fn identity_values() {
        let q = Quaternion::identity();
        assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.0, 0.0, 1.0));
        assert_eq!(Quaternion::default(), q);
        let copy = q;
        assert_eq!(copy, q);
    }

    #[test]
    fn set_identity_resets() {
        let mut q = Quaternion::identity();
        q.rotate_x(90.0);
        assert_ne!(q, Quaternion::identity());
        q.set_identity();
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn rotate_x_uses_half_angle_table() {
        let mut q = Quaternion::identity();
        q.rotate_x(90.0);
        assert_eq!((q.x, q.y, q.z, q.w), (0.707, 0.0, 0.0, 0.707));
    }

    #[test]
    fn rotate_y_and_z_post_multiply() {
        let mut q = Quaternion::identity();
        q.rotate_y(60.0);
        assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.5, 0.0, 0.866));

        let mut q = Quaternion::identity();
        q.rotate_z(60.0);
        assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.0, 0.5, 0.866));
    }

    #[test]
    fn inline_rotations_match_multiply() {
        let axes = [
            Vector3D::new(1.0, 0.0, 0.0, 1.0),
            Vector3D::new(0.0, 1.0, 0.0, 1.0),
            Vector3D::new(0.0, 0.0, 1.0, 1.0),
        ];
        let start = Quaternion::from_euler(10.0, 20.0, 30.0);

        for (i, axis) in axes.iter().enumerate() {
            let mut inline = start;
            match i {
                0 => inline.rotate_x(70.0),
                1 => inline.rotate_y(70.0),
                _ => inline.rotate_z(70.0),
            };
            let mut step = Quaternion::identity();
            step.set_axis_angle(axis, 70.0);
            let mut multiplied = start;
            multiplied.multiply(&step);
            assert_quat_close(&inline, (multiplied.x, multiplied.y, multiplied.z, multiplied.w), 1e-15);
        }
    }

    #[test]
    fn invert_then_multiply_is_identity() {
        let mut q = Quaternion::identity();
        q.rotate_x(90.0);
        let mut inverse = q;
        inverse.invert();
        q.multiply(&inverse);
        assert_quat_close(&q, (0.0, 0.0, 0.0, 1.0), 1e-15);
    }

    #[test]
    fn invert_zero_quaternion_is_guarded() {
        let mut q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        q.invert();
        assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.0, 0.0, 0.0));
        assert!(!q.w.is_nan());
    }

    #[test]
    fn set_axis_angle_discards_sign_and_odd_degree() {
        let axis = Vector3D::new(0.0, 0.0, 1.0, 1.0);
        let mut pos = Quaternion::identity();
        pos.set_axis_angle(&axis, 90.0);
        let mut neg = Quaternion::identity();
        neg.set_axis_angle(&axis, -90.0);
        let mut odd = Quaternion::identity();
        odd.set_axis_angle(&axis, 91.7);
        assert_eq!(pos, neg);
        assert_eq!(pos, odd);
        assert_eq!((pos.z, pos.w), (0.707, 0.707));
    }

    #[test]
    fn axis_angle_round_trip() {
        let axis = Vector3D::new(0.0, 1.0, 0.0, 1.0);
        let mut q = Quaternion::identity();
        q.set_axis_angle(&axis, 120.0);
        let (got_axis, rad) = q.get_axis_angle();
        assert_abs_diff_eq!(rad, 120.0_f64.to_radians(), epsilon = 1e-3);
        assert_abs_diff_eq!(got_axis.y, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(got_axis.x, 0.0);
    }

    #[test]
    fn axis_angle_of_identity_falls_back_to_x() {
        let (axis, rad) = Quaternion::identity().get_axis_angle();
        assert_eq!(rad, 0.0);
        assert_eq!((axis.x, axis.y, axis.z), (1.0, 0.0, 0.0));
    }

    #[test]
    fn euler_single_axis() {
        let q = Quaternion::from_euler(90.0, 0.0, 0.0);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert_quat_close(&q, (h, 0.0, 0.0, h), 1e-12);

        let q = Quaternion::from_euler(0.0, 0.0, 180.0);
        assert_quat_close(&q, (0.0, 0.0, 1.0, 0.0), 1e-12);
    }

    #[test]
    fn euler_sign_convention() {
        let q = Quaternion::from_euler(90.0, 90.0, 0.0);
        assert_quat_close(&q, (0.5, 0.5, -0.5, 0.5), 1e-12);
    }

    #[test]
    fn normalize_scales_to_unit_length() {
        let mut q = Quaternion::new(0.0, 3.0, 0.0, 4.0);
        q.normalize();
        assert_quat_close(&q, (0.0, 0.6, 0.0, 0.8), 1e-15);
    }

    #[test]
    fn normalize_zero_stays_zero() {
        let mut q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        q.normalize();
        assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn identity_to_matrix_is_identity() {
        assert_eq!(Quaternion::identity().to_matrix4x4(), Matrix4x4::identity());
    }

    #[test]
    fn to_matrix_layout() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let m = Quaternion::new(0.0, 0.0, h, h).to_matrix4x4();
        assert_abs_diff_eq!(m.data[0], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(m.data[1], 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(m.data[4], -1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(m.data[5], 0.0, epsilon = 1e-15);
        assert_eq!(m.data[10], 1.0);
        assert_eq!(&m.data[12..], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!((m.data[3], m.data[7], m.data[11]), (0.0, 0.0, 0.0));
    }

    #[test]
    fn multiply_matches_nalgebra() {
        let a = Quaternion::from_euler(15.0, -40.0, 75.0);
        let b = Quaternion::from_euler(-5.0, 25.0, 130.0);
        let expected = nalgebra::Quaternion::from(a) * nalgebra::Quaternion::from(b);
        let mut got = a;
        got.multiply(&b);
        let expected = Quaternion::from(expected);
        assert_quat_close(&got, (expected.x, expected.y, expected.z, expected.w), 1e-12);
    }

    #[test]
    fn json_round_trip() {
        let q = Quaternion::new(0.25, 0.5, 0.75, 1.0);
        let json = q.to_json().unwrap();
        assert_eq!(json, r#"{"x":0.25,"y":0.5,"z":0.75,"w":1.0}"#);
        assert_eq!(Quaternion::from_json(&json).unwrap(), q);
    }
}
