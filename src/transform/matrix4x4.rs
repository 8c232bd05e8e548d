use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Matrix2D, Transform3D};
use crate::error::Result;
use crate::geometry::Point3D;
use crate::math::TRIG;

const IDENTITY: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// A 4x4 homogeneous matrix stored row-major as `[a00, a01, a02, a03, a10, .., a33]`.
///
/// Translation lives in the last column (indices 3, 7, 11), so points are transformed as
/// column vectors: `p' = M * [x y z 1]ᵗ`. The elementary builders (`translate`, `scale`,
/// `rotate_*`) construct their matrix on the stack and right-multiply it onto `self`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4x4 {
    pub data: [f64; 16],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4x4 {
    #[must_use]
    pub fn new(data: [f64; 16]) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::new(IDENTITY)
    }

    /// Translation by `(tx, ty, tz)`.
    #[must_use]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        let mut m = Self::identity();
        m.data[3] = tx;
        m.data[7] = ty;
        m.data[11] = tz;
        m
    }

    /// Axis-aligned scale by `(sx, sy, sz)`.
    #[must_use]
    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Self::identity();
        m.data[0] = sx;
        m.data[5] = sy;
        m.data[10] = sz;
        m
    }

    /// Rotation of `degrees` around the X axis, read from the trig table.
    #[must_use]
    pub fn rotation_x(degrees: f64) -> Self {
        let c = TRIG.cos(degrees);
        let s = TRIG.sin(degrees);
        let mut m = Self::identity();
        m.data[5] = c;
        m.data[6] = -s;
        m.data[9] = s;
        m.data[10] = c;
        m
    }

    /// Rotation of `degrees` around the Y axis, read from the trig table.
    #[must_use]
    pub fn rotation_y(degrees: f64) -> Self {
        let c = TRIG.cos(degrees);
        let s = TRIG.sin(degrees);
        let mut m = Self::identity();
        m.data[0] = c;
        m.data[2] = -s;
        m.data[8] = s;
        m.data[10] = c;
        m
    }

    /// Rotation of `degrees` around the Z axis, read from the trig table.
    #[must_use]
    pub fn rotation_z(degrees: f64) -> Self {
        let c = TRIG.cos(degrees);
        let s = TRIG.sin(degrees);
        let mut m = Self::identity();
        m.data[0] = c;
        m.data[1] = -s;
        m.data[4] = s;
        m.data[5] = c;
        m
    }

    /// Overwrites the whole buffer.
    pub fn init(&mut self, data: [f64; 16]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn set_identity(&mut self) -> &mut Self {
        self.init(IDENTITY)
    }

    pub fn translate(&mut self, tx: f64, ty: f64, tz: f64) -> &mut Self {
        self.append_matrix(&Self::translation(tx, ty, tz))
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) -> &mut Self {
        self.append_matrix(&Self::scaling(sx, sy, sz))
    }

    /// Appends X, then Y, then Z rotations, each a separate multiplication.
    pub fn rotate(&mut self, rx: f64, ry: f64, rz: f64) -> &mut Self {
        self.rotate_x(rx).rotate_y(ry).rotate_z(rz)
    }

    pub fn rotate_x(&mut self, degrees: f64) -> &mut Self {
        self.append_matrix(&Self::rotation_x(degrees))
    }

    pub fn rotate_y(&mut self, degrees: f64) -> &mut Self {
        self.append_matrix(&Self::rotation_y(degrees))
    }

    pub fn rotate_z(&mut self, degrees: f64) -> &mut Self {
        self.append_matrix(&Self::rotation_z(degrees))
    }

    /// Multiplies every entry by `value`.
    pub fn multiply_by_scalar(&mut self, value: f64) -> &mut Self {
        for v in &mut self.data {
            *v *= value;
        }
        self
    }

    /// Translates to `position + pivot`, scales, rotates (X, Y, Z) and translates back by
    /// the pivot.
    pub fn append_transform(&mut self, t: &Transform3D) -> &mut Self {
        self.translate(t.x + t.pivot_x, t.y + t.pivot_y, t.z + t.pivot_z)
            .scale(t.scale_x, t.scale_y, t.scale_z)
            .rotate(t.rotation_x, t.rotation_y, t.rotation_z)
            .translate(-t.pivot_x, -t.pivot_y, -t.pivot_z)
    }

    /// `self = m * self`.
    pub fn prepend_matrix(&mut self, m: &Matrix4x4) -> &mut Self {
        self.data = multiply(&m.data, &self.data);
        self
    }

    /// `self = self * m`.
    pub fn append_matrix(&mut self, m: &Matrix4x4) -> &mut Self {
        self.data = multiply(&self.data, &m.data);
        self
    }

    /// Determinant by closed-form cofactor expansion.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.data;

        a30 * a21 * a12 * a03 - a20 * a31 * a12 * a03 - a30 * a11 * a22 * a03
            + a10 * a31 * a22 * a03
            + a20 * a11 * a32 * a03
            - a10 * a21 * a32 * a03
            - a30 * a21 * a02 * a13
            + a20 * a31 * a02 * a13
            + a30 * a01 * a22 * a13
            - a00 * a31 * a22 * a13
            - a20 * a01 * a32 * a13
            + a00 * a21 * a32 * a13
            + a30 * a11 * a02 * a23
            - a10 * a31 * a02 * a23
            - a30 * a01 * a12 * a23
            + a00 * a31 * a12 * a23
            + a10 * a01 * a32 * a23
            - a00 * a11 * a32 * a23
            - a20 * a11 * a02 * a33
            + a10 * a21 * a02 * a33
            + a20 * a01 * a12 * a33
            - a00 * a21 * a12 * a33
            - a10 * a01 * a22 * a33
            + a00 * a11 * a22 * a33
    }

    /// Inverts in place via the adjugate.
    ///
    /// A zero determinant is not rejected; the result is filled with infinities and `NaN`s.
    pub fn invert(&mut self) -> &mut Self {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.data;

        let b00 = a00 * a11 - a01 * a10;
        let b01 = a00 * a12 - a02 * a10;
        let b02 = a00 * a13 - a03 * a10;
        let b03 = a01 * a12 - a02 * a11;
        let b04 = a01 * a13 - a03 * a11;
        let b05 = a02 * a13 - a03 * a12;
        let b06 = a20 * a31 - a21 * a30;
        let b07 = a20 * a32 - a22 * a30;
        let b08 = a20 * a33 - a23 * a30;
        let b09 = a21 * a32 - a22 * a31;
        let b10 = a21 * a33 - a23 * a31;
        let b11 = a22 * a33 - a23 * a32;

        let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
        if det == 0.0 {
            tracing::debug!("inverting a singular Matrix4x4");
        }
        let id = 1.0 / det;

        self.data = [
            (a11 * b11 - a12 * b10 + a13 * b09) * id,
            (-a01 * b11 + a02 * b10 - a03 * b09) * id,
            (a31 * b05 - a32 * b04 + a33 * b03) * id,
            (-a21 * b05 + a22 * b04 - a23 * b03) * id,
            (-a10 * b11 + a12 * b08 - a13 * b07) * id,
            (a00 * b11 - a02 * b08 + a03 * b07) * id,
            (-a30 * b05 + a32 * b02 - a33 * b01) * id,
            (a20 * b05 - a22 * b02 + a23 * b01) * id,
            (a10 * b10 - a11 * b08 + a13 * b06) * id,
            (-a00 * b10 + a01 * b08 - a03 * b06) * id,
            (a30 * b04 - a31 * b02 + a33 * b00) * id,
            (-a20 * b04 + a21 * b02 - a23 * b00) * id,
            (-a10 * b09 + a11 * b07 - a12 * b06) * id,
            (a00 * b09 - a01 * b07 + a02 * b06) * id,
            (-a30 * b03 + a31 * b01 - a32 * b00) * id,
            (a20 * b03 - a21 * b01 + a22 * b00) * id,
        ];
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.data;
        self.data = [
            a00, a10, a20, a30, //
            a01, a11, a21, a31, //
            a02, a12, a22, a32, //
            a03, a13, a23, a33,
        ];
        self
    }

    /// Overwrites the buffer with an OpenGL-style perspective frustum.
    ///
    /// The layout is the GL column-major one read as rows: `-1` sits at index 11 and the depth
    /// term at index 14.
    pub fn frustum(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> &mut Self {
        let near2 = 2.0 * near;
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        self.data = [
            near2 / width,
            0.0,
            0.0,
            0.0,
            0.0,
            near2 / height,
            0.0,
            0.0,
            (right + left) / width,
            (top + bottom) / height,
            (-far - near) / depth,
            -1.0,
            0.0,
            0.0,
            (-near2 * far) / depth,
            0.0,
        ];
        self
    }

    /// Symmetric [`Matrix4x4::frustum`] from a vertical field of view in degrees.
    pub fn perspective(&mut self, fovy: f64, aspect: f64, near: f64, far: f64) -> &mut Self {
        let top = near * (fovy * std::f64::consts::PI / 360.0).tan();
        let right = top * aspect;
        self.frustum(-right, right, -top, top, near, far)
    }

    /// Overwrites the buffer with an orthographic projection.
    pub fn ortho(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> &mut Self {
        let lr = left - right;
        let tb = top - bottom;
        let fan = far - near;

        self.data = [
            2.0 / lr,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / tb,
            0.0,
            0.0,
            0.0,
            0.0,
            -2.0 / fan,
            0.0,
            (left + right) / lr,
            (top + bottom) / tb,
            (far + near) / fan,
            1.0,
        ];
        self
    }

    /// Transforms a point by building its translation matrix, prepending `self`, and reading
    /// the translation column back.
    #[must_use]
    pub fn transform_point3d(&self, point: &Point3D) -> Point3D {
        let mut m = Self::translation(point.x, point.y, point.z);
        m.prepend_matrix(self);
        Point3D::new(m.data[3], m.data[7], m.data[11])
    }

    /// Lossy projection onto a 2D affine matrix: indices 0, 4, 1, 5, 3, 7 become
    /// `a, b, c, d, tx, ty`.
    #[must_use]
    pub fn to_matrix2d(&self) -> Matrix2D {
        let d = &self.data;
        Matrix2D::new(d[0], d[4], d[1], d[5], d[3], d[7])
    }

    /// Embeds a 2D affine matrix, the inverse mapping of [`Matrix4x4::to_matrix2d`].
    #[must_use]
    pub fn from_matrix2d(m: &Matrix2D) -> Self {
        let mut out = Self::identity();
        out.data[0] = m.a;
        out.data[4] = m.b;
        out.data[1] = m.c;
        out.data[5] = m.d;
        out.data[3] = m.tx;
        out.data[7] = m.ty;
        out
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if `json` is not a valid matrix object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Row-major 4x4 product `a * b`.
fn multiply(a: &[f64; 16], b: &[f64; 16]) -> [f64; 16] {
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = a[row * 4] * b[col]
                + a[row * 4 + 1] * b[4 + col]
                + a[row * 4 + 2] * b[8 + col]
                + a[row * 4 + 3] * b[12 + col];
        }
    }
    out
}

impl fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data;
        write!(
            f,
            "[\n{}, {}, {}, {}\n, {}, {}, {}, {}\n, {}, {}, {}, {}\n, {}, {}, {}, {}]",
            d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7], d[8], d[9], d[10], d[11], d[12], d[13],
            d[14], d[15]
        )
    }
}

impl From<&Matrix2D> for Matrix4x4 {
    fn from(m: &Matrix2D) -> Self {
        Self::from_matrix2d(m)
    }
}

impl From<&Matrix4x4> for Matrix2D {
    fn from(m: &Matrix4x4) -> Self {
        m.to_matrix2d()
    }
}

impl From<Matrix4x4> for nalgebra::Matrix4<f64> {
    fn from(m: Matrix4x4) -> Self {
        nalgebra::Matrix4::from_row_slice(&m.data)
    }
}

impl From<nalgebra::Matrix4<f64>> for Matrix4x4 {
    fn from(m: nalgebra::Matrix4<f64>) -> Self {
        let mut data = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                data[row * 4 + col] = m[(row, col)];
            }
        }
        Self::new(data)
    }
}
