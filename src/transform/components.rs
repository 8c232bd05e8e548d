use serde::{Deserialize, Serialize};

/// Display-object style parameters for [`Matrix2D::append_transform`] and the output of
/// [`Matrix2D::decompose`].
///
/// Angles are in degrees. The default is the neutral transform: no offset, unit scale, no
/// rotation, no skew, pivot at the origin.
///
/// [`Matrix2D::append_transform`]: super::Matrix2D::append_transform
/// [`Matrix2D::decompose`]: super::Matrix2D::decompose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform2D {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub pivot_x: f64,
    pub pivot_y: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }
}

impl Transform2D {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x: f64,
        y: f64,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
        skew_x: f64,
        skew_y: f64,
        pivot_x: f64,
        pivot_y: f64,
    ) -> Self {
        Self {
            x,
            y,
            scale_x,
            scale_y,
            rotation,
            skew_x,
            skew_y,
            pivot_x,
            pivot_y,
        }
    }
}

/// Parameters for [`Matrix4x4::append_transform`]. Rotations are in degrees.
///
/// [`Matrix4x4::append_transform`]: super::Matrix4x4::append_transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub rotation_z: f64,
    pub pivot_x: f64,
    pub pivot_y: f64,
    pub pivot_z: f64,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            rotation_z: 0.0,
            pivot_x: 0.0,
            pivot_y: 0.0,
            pivot_z: 0.0,
        }
    }
}

impl Transform3D {
    /// Sets the translation.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self.scale_z = z;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation_x = x;
        self.rotation_y = y;
        self.rotation_z = z;
        self
    }

    #[must_use]
    pub fn with_pivot(mut self, x: f64, y: f64, z: f64) -> Self {
        self.pivot_x = x;
        self.pivot_y = y;
        self.pivot_z = z;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_neutral() {
        let t = Transform2D::default();
        assert_eq!((t.scale_x, t.scale_y), (1.0, 1.0));
        assert_eq!((t.x, t.rotation, t.pivot_y), (0.0, 0.0, 0.0));

        let t = Transform3D::default();
        assert_eq!((t.scale_x, t.scale_y, t.scale_z), (1.0, 1.0, 1.0));
    }

    #[test]
    fn builders_set_groups() {
        let t = Transform3D::default()
            .with_position(1.0, 2.0, 3.0)
            .with_scale(4.0, 5.0, 6.0)
            .with_rotation(7.0, 8.0, 9.0)
            .with_pivot(10.0, 11.0, 12.0);
        assert_eq!((t.x, t.y, t.z), (1.0, 2.0, 3.0));
        assert_eq!((t.scale_x, t.scale_y, t.scale_z), (4.0, 5.0, 6.0));
        assert_eq!((t.rotation_x, t.rotation_y, t.rotation_z), (7.0, 8.0, 9.0));
        assert_eq!((t.pivot_x, t.pivot_y, t.pivot_z), (10.0, 11.0, 12.0));
    }

    #[test]
    fn json_uses_camel_case_names() {
        let json = serde_json::to_string(&Transform2D::default()).unwrap();
        assert!(json.contains("\"scaleX\":1.0"));
        assert!(json.contains("\"skewY\":0.0"));
    }
}
