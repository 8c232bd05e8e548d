use std::fmt;

use serde::{Deserialize, Serialize};

use super::Transform2D;
use crate::error::{Result, TransformError};
use crate::geometry::Point;
use crate::math::{DEG_TO_RAD, TRIG};

/// A 3x3 affine transform stored as its six free coefficients.
///
/// Points are treated as row vectors:
///
/// ```text
/// [x' y' 1] = [x y 1] * | a  b  0 |
///                       | c  d  0 |
///                       | tx ty 1 |
/// ```
///
/// Every mutating method returns `&mut Self` so calls can be chained. Each matrix owns a
/// private LIFO stack used by [`Matrix2D::save`] and [`Matrix2D::restore`]; the stack is not
/// cloned, compared or serialized.
#[derive(Debug, Serialize, Deserialize)]
pub struct Matrix2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
    #[serde(skip)]
    stack: Vec<[f64; 6]>,
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Clone for Matrix2D {
    /// Copies the six coefficients into a matrix with an empty save stack.
    fn clone(&self) -> Self {
        Self::new(self.a, self.b, self.c, self.d, self.tx, self.ty)
    }
}

impl PartialEq for Matrix2D {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl Matrix2D {
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            tx,
            ty,
            stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Overwrites all six coefficients. The save stack is left alone.
    pub fn initialize(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.tx = tx;
        self.ty = ty;
        self
    }

    /// Resets the coefficients to the identity transform.
    pub fn set_identity(&mut self) -> &mut Self {
        self.initialize(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Right-multiplies by the given matrix: the new transform is applied first, then the
    /// existing one.
    pub fn append(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        let a1 = self.a;
        let b1 = self.b;
        let c1 = self.c;
        let d1 = self.d;

        self.a = a * a1 + b * c1;
        self.b = a * b1 + b * d1;
        self.c = c * a1 + d * c1;
        self.d = c * b1 + d * d1;
        self.tx = tx * a1 + ty * c1 + self.tx;
        self.ty = tx * b1 + ty * d1 + self.ty;
        self
    }

    /// Left-multiplies by the given matrix: the existing transform is applied first.
    pub fn prepend(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        let [a1, b1, c1, d1, tx1, ty1] = self.to_array();
        self.initialize(a, b, c, d, tx, ty);
        self.append(a1, b1, c1, d1, tx1, ty1)
    }

    pub fn append_matrix(&mut self, m: &Matrix2D) -> &mut Self {
        self.append(m.a, m.b, m.c, m.d, m.tx, m.ty)
    }

    pub fn prepend_matrix(&mut self, m: &Matrix2D) -> &mut Self {
        self.prepend(m.a, m.b, m.c, m.d, m.tx, m.ty)
    }

    /// Appends every matrix in order, as repeated [`Matrix2D::append_matrix`] calls would.
    pub fn combine<'a, I>(&mut self, matrices: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Matrix2D>,
    {
        let mut a1 = self.a;
        let mut b1 = self.b;
        let mut c1 = self.c;
        let mut d1 = self.d;

        for m in matrices {
            self.a = m.a * a1 + m.b * c1;
            self.b = m.a * b1 + m.b * d1;
            self.c = m.c * a1 + m.d * c1;
            self.d = m.c * b1 + m.d * d1;
            self.tx = m.tx * a1 + m.ty * c1 + self.tx;
            self.ty = m.tx * b1 + m.ty * d1 + self.ty;

            a1 = self.a;
            b1 = self.b;
            c1 = self.c;
            d1 = self.d;
        }
        self
    }

    /// Appends a rotation of `angle` degrees.
    ///
    /// The angle is reduced with `%` and truncated toward zero before the table lookup, so
    /// `90.9` rotates by `90` and `-45.5` by `-45`.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let r = truncated_degrees(angle);
        let cos = TRIG.cos(r);
        let sin = TRIG.sin(r);
        self.append(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Appends a skew of `skew_x`/`skew_y` degrees, both wrapped into `[0, 360)` first.
    pub fn skew(&mut self, skew_x: f64, skew_y: f64) -> &mut Self {
        let skew_x = wrap_degrees(skew_x);
        let skew_y = wrap_degrees(skew_y);
        self.append(1.0, TRIG.tan(skew_y), -TRIG.tan(skew_x), 1.0, 0.0, 0.0)
    }

    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.append(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.append(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Appends a display-object style transform: translate to `x + pivot_x, y + pivot_y`,
    /// skew, scale, rotate, then translate back by the pivot.
    ///
    /// Skew is only applied when `skew_x > 0` or `skew_y > 0`; negative skews alone are
    /// ignored. With skew present two appends are issued, otherwise one.
    pub fn append_transform(&mut self, t: &Transform2D) -> &mut Self {
        let r = truncated_degrees(t.rotation);
        let cos = TRIG.cos(r);
        let sin = TRIG.sin(r);

        let x = t.x + t.pivot_x;
        let y = t.y + t.pivot_y;

        if t.skew_x > 0.0 || t.skew_y > 0.0 {
            self.append(
                TRIG.cos(t.skew_y),
                TRIG.sin(t.skew_y),
                -TRIG.sin(t.skew_x),
                TRIG.cos(t.skew_x),
                x,
                y,
            );
            self.append(
                cos * t.scale_x,
                sin * t.scale_x,
                -sin * t.scale_y,
                cos * t.scale_y,
                0.0,
                0.0,
            );
        } else {
            self.append(
                cos * t.scale_x,
                sin * t.scale_x,
                -sin * t.scale_y,
                cos * t.scale_y,
                x,
                y,
            );
        }

        self.tx -= t.pivot_x * self.a + t.pivot_y * self.c;
        self.ty -= t.pivot_x * self.b + t.pivot_y * self.d;
        self
    }

    /// Like [`Matrix2D::append_transform`], but the transform is applied before this matrix.
    pub fn prepend_transform(&mut self, t: &Transform2D) -> &mut Self {
        let [a1, b1, c1, d1, tx1, ty1] = self.to_array();
        self.set_identity();
        self.append_transform(t).append(a1, b1, c1, d1, tx1, ty1)
    }

    /// Pushes the current coefficients onto the save stack.
    pub fn save(&mut self) -> &mut Self {
        self.stack.push(self.to_array());
        self
    }

    /// Pops the last saved coefficients back into the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::StackUnderflow`] if nothing was saved; the matrix is left
    /// unchanged.
    pub fn restore(&mut self) -> Result<&mut Self> {
        let Some([a, b, c, d, tx, ty]) = self.stack.pop() else {
            tracing::warn!("Matrix2D::restore called with an empty save stack");
            return Err(TransformError::StackUnderflow.into());
        };
        Ok(self.initialize(a, b, c, d, tx, ty))
    }

    /// Number of snapshots currently on the save stack.
    #[must_use]
    pub fn saved_depth(&self) -> usize {
        self.stack.len()
    }

    /// Determinant of the linear 2x2 block.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverts the matrix in place.
    ///
    /// A singular matrix is not rejected: the division by a zero determinant leaves
    /// infinities and `NaN`s in the coefficients. Check [`Matrix2D::determinant`] first when
    /// that matters.
    pub fn invert(&mut self) -> &mut Self {
        let a1 = self.a;
        let b1 = self.b;
        let c1 = self.c;
        let d1 = self.d;
        let tx1 = self.tx;
        let ty1 = self.ty;
        let n = a1 * d1 - b1 * c1;
        if n == 0.0 {
            tracing::debug!(matrix = %self, "inverting a singular Matrix2D");
        }

        self.a = d1 / n;
        self.b = -b1 / n;
        self.c = -c1 / n;
        self.d = a1 / n;
        self.tx = (c1 * ty1 - d1 * tx1) / n;
        self.ty = -(a1 * ty1 - b1 * tx1) / n;
        self
    }

    /// Exact comparison against the identity, without tolerance.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        self.tx == 0.0
            && self.ty == 0.0
            && self.a == 1.0
            && self.b == 0.0
            && self.c == 0.0
            && self.d == 1.0
    }

    #[must_use]
    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        let mut out = Point::default();
        self.transform_point_into(x, y, &mut out);
        out
    }

    /// Writes the transformed `(x, y)` into `out`.
    pub fn transform_point_into(&self, x: f64, y: f64, out: &mut Point) {
        out.x = x * self.a + y * self.c + self.tx;
        out.y = x * self.b + y * self.d + self.ty;
    }

    /// Decomposes the matrix into position, scale, rotation and skew (degrees).
    ///
    /// The result produces the same visual transform but is not guaranteed to match the values
    /// the matrix was built from; with real skew present it will not round-trip through
    /// [`Matrix2D::append_transform`].
    #[must_use]
    pub fn decompose(&self) -> Transform2D {
        let mut target = Transform2D::default();
        self.decompose_into(&mut target);
        target
    }

    /// Writes the decomposition into `target`. Pivot fields are untouched, and so is
    /// `rotation` when the matrix carries skew.
    #[allow(clippy::float_cmp)]
    pub fn decompose_into(&self, target: &mut Transform2D) {
        target.x = self.tx;
        target.y = self.ty;
        target.scale_x = (self.a * self.a + self.b * self.b).sqrt();
        target.scale_y = (self.c * self.c + self.d * self.d).sqrt();

        let skew_x = (-self.c).atan2(self.d);
        let skew_y = self.b.atan2(self.a);

        if skew_x == skew_y {
            target.rotation = skew_y / DEG_TO_RAD;
            if self.a < 0.0 && self.d >= 0.0 {
                target.rotation += if target.rotation <= 0.0 { 180.0 } else { -180.0 };
            }
            target.skew_x = 0.0;
            target.skew_y = 0.0;
        } else {
            target.skew_x = skew_x / DEG_TO_RAD;
            target.skew_y = skew_y / DEG_TO_RAD;
        }
    }

    /// Copies the six coefficients of `m`.
    pub fn copy_from(&mut self, m: &Matrix2D) -> &mut Self {
        self.initialize(m.a, m.b, m.c, m.d, m.tx, m.ty)
    }

    /// The coefficients as a plain JSON object.
    #[must_use]
    pub fn to_flat_object(&self) -> serde_json::Value {
        serde_json::json!({
            "a": self.a,
            "b": self.b,
            "c": self.c,
            "d": self.d,
            "tx": self.tx,
            "ty": self.ty,
        })
    }

    /// The coefficients as `[a, b, c, d, tx, ty]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
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

impl fmt::Display for Matrix2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Matrix2D (a={} b={} c={} d={} tx={} ty={})]",
            self.a, self.b, self.c, self.d, self.tx, self.ty
        )
    }
}

impl From<&Matrix2D> for nalgebra::Matrix3<f64> {
    /// Row-vector layout: `[x y 1] * M`.
    fn from(m: &Matrix2D) -> Self {
        #[rustfmt::skip]
        let out = nalgebra::Matrix3::new(
            m.a,  m.b,  0.0,
            m.c,  m.d,  0.0,
            m.tx, m.ty, 1.0,
        );
        out
    }
}

/// `(angle % 360)` truncated toward zero.
fn truncated_degrees(angle: f64) -> f64 {
    (angle % 360.0).trunc()
}

/// `angle % 360`, shifted into `[0, 360)` when negative.
fn wrap_degrees(angle: f64) -> f64 {
    let r = angle % 360.0;
    if r < 0.0 {
        360.0 + r
    } else {
        r
    }
}
