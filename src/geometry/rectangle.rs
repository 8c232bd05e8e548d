use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An axis-aligned rectangle.
///
/// `left`, `top`, `right` and `bottom` are computed once by [`Rectangle::new`]. Mutating `x`,
/// `y`, `width` or `height` afterwards does not update them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rectangle {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            left: x,
            right: x + width,
            top: y,
            bottom: y + height,
        }
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if `json` is not a valid rectangle object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn edges_derived_at_construction() {
        let r = Rectangle::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left, 10.0);
        assert_eq!(r.top, 20.0);
        assert_eq!(r.right, 40.0);
        assert_eq!(r.bottom, 60.0);
    }

    #[test]
    fn edges_are_frozen_snapshot() {
        let mut r = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        r.x = 5.0;
        r.width = 100.0;
        assert_eq!(r.left, 0.0);
        assert_eq!(r.right, 10.0);
    }

    #[test]
    fn json_contains_all_fields() {
        let r = Rectangle::new(1.0, 2.0, 3.0, 4.0);
        let value: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
        assert_eq!(value["right"], 4.0);
        assert_eq!(value["bottom"], 6.0);
        assert_eq!(Rectangle::from_json(&r.to_json().unwrap()).unwrap(), r);
    }
}
