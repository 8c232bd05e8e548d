use serde::{Deserialize, Serialize};

/// A 3D vector with a homogeneous `w` component.
///
/// `w` defaults to `1` and never takes part in the vector algebra; the cross product copies
/// it through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Vector3D {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Vector3D {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Replaces `self` with `self × other` and returns a copy of the result.
    pub fn cross_product(&mut self, other: &Vector3D) -> Vector3D {
        let x = self.y * other.z - self.z * other.y;
        let y = self.z * other.x - self.x * other.z;
        let z = self.x * other.y - self.y * other.x;

        self.x = x;
        self.y = y;
        self.z = z;
        Vector3D::new(x, y, z, self.w)
    }
}

impl From<Vector3D> for nalgebra::Vector3<f64> {
    fn from(v: Vector3D) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3D {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_w_is_one() {
        let v = Vector3D::default();
        assert_eq!((v.x, v.y, v.z, v.w), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn cross_of_x_and_y_is_z() {
        let mut x = Vector3D::new(1.0, 0.0, 0.0, 1.0);
        let y = Vector3D::new(0.0, 1.0, 0.0, 1.0);
        let result = x.cross_product(&y);
        assert_eq!(result, Vector3D::new(0.0, 0.0, 1.0, 1.0));
        // The receiver is overwritten too.
        assert_eq!(x, result);
    }

    #[test]
    fn cross_keeps_receiver_w() {
        let mut a = Vector3D::new(2.0, 3.0, 4.0, 7.0);
        let b = Vector3D::new(5.0, 6.0, 7.0, 0.0);
        let result = a.cross_product(&b);
        assert_eq!(result, Vector3D::new(-3.0, 6.0, -3.0, 7.0));
    }

    #[test]
    fn cross_matches_nalgebra() {
        let a = Vector3D::new(1.5, -2.0, 0.25, 1.0);
        let b = Vector3D::new(-4.0, 0.5, 3.0, 1.0);
        let expected = nalgebra::Vector3::from(a).cross(&nalgebra::Vector3::from(b));
        let mut a = a;
        let got: nalgebra::Vector3<f64> = a.cross_product(&b).into();
        assert_eq!(got, expected);
    }
}
