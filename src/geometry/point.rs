use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A 2D point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_between(a: &Point, b: &Point) -> f64 {
        let dist_x = (b.x - a.x) * (b.x - a.x);
        let dist_y = (b.y - a.y) * (b.y - a.y);
        (dist_x + dist_y).sqrt()
    }

    /// Serializes the point as `{"x":..,"y":..}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a point from the shape produced by [`Point::to_json`].
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid point object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<nalgebra::Point2<f64>> for Point {
    fn from(p: nalgebra::Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for nalgebra::Point2<f64> {
    fn from(p: Point) -> Self {
        nalgebra::Point2::new(p.x, p.y)
    }
}
