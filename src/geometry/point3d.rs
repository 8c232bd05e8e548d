use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A 3D point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_between(a: &Point3D, b: &Point3D) -> f64 {
        let dist_x = (b.x - a.x) * (b.x - a.x);
        let dist_y = (b.y - a.y) * (b.y - a.y);
        let dist_z = (b.z - a.z) * (b.z - a.z);
        (dist_x + dist_y + dist_z).sqrt()
    }

    /// Serializes the point as `{"x":..,"y":..,"z":..}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if `json` is not a valid point object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<nalgebra::Point3<f64>> for Point3D {
    fn from(p: nalgebra::Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Point3D> for nalgebra::Point3<f64> {
    fn from(p: Point3D) -> Self {
        nalgebra::Point3::new(p.x, p.y, p.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(3.0, 5.0, 9.0);
        assert_eq!(Point3D::distance_between(&a, &b), 7.0);
    }

    #[test]
    fn json_mirrors_fields() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        let json = p.to_json().unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"z":3.0}"#);
        assert_eq!(Point3D::from_json(&json).unwrap(), p);
    }

    #[test]
    fn nalgebra_round_trip() {
        let p = Point3D::new(-1.0, 0.5, 4.0);
        let n: nalgebra::Point3<f64> = p.into();
        assert_eq!(n, nalgebra::Point3::new(-1.0, 0.5, 4.0));
        assert_eq!(Point3D::from(n), p);
    }
}
