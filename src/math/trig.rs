//! Degree-indexed sine/cosine/tangent lookup tables.
//!
//! Every entry is quantized to the nearest 1/1000. All table-driven transforms in this crate
//! (Matrix2D rotate/skew, Matrix4x4 rotations, Quaternion half-angle rotations) read from the
//! single process-wide [`TRIG`] instance, which is built on first access and never mutated.

use std::sync::LazyLock;

use super::{DEG_TO_RAD, TRIG_PRECISION, TRIG_TABLE_SIZE};

/// Process-wide trig table, built lazily on first use.
pub static TRIG: LazyLock<TrigTable> = LazyLock::new(TrigTable::build);

/// Precomputed, rounded cos/sin/tan for every integer degree in `[0, 360)`.
#[derive(Debug, Clone)]
pub struct TrigTable {
    cos: [f64; TRIG_TABLE_SIZE],
    sin: [f64; TRIG_TABLE_SIZE],
    tan: [f64; TRIG_TABLE_SIZE],
}

impl TrigTable {
    fn build() -> Self {
        let mut cos = [0.0; TRIG_TABLE_SIZE];
        let mut sin = [0.0; TRIG_TABLE_SIZE];
        let mut tan = [0.0; TRIG_TABLE_SIZE];

        for i in 0..TRIG_TABLE_SIZE {
            #[allow(clippy::cast_precision_loss)]
            let angle = i as f64 * DEG_TO_RAD;
            cos[i] = quantize(angle.cos());
            sin[i] = quantize(angle.sin());
            tan[i] = quantize(angle.tan());
        }

        tracing::trace!(entries = TRIG_TABLE_SIZE, "trig table built");
        Self { cos, sin, tan }
    }

    /// The full cosine table.
    #[must_use]
    pub fn cos_table(&self) -> &[f64; TRIG_TABLE_SIZE] {
        &self.cos
    }

    /// The full sine table.
    #[must_use]
    pub fn sin_table(&self) -> &[f64; TRIG_TABLE_SIZE] {
        &self.sin
    }

    /// The full tangent table.
    #[must_use]
    pub fn tan_table(&self) -> &[f64; TRIG_TABLE_SIZE] {
        &self.tan
    }

    /// Cosine of `degrees`, looked up after [`table_index`].
    #[must_use]
    pub fn cos(&self, degrees: f64) -> f64 {
        self.cos[table_index(degrees)]
    }

    /// Sine of `degrees`, looked up after [`table_index`].
    #[must_use]
    pub fn sin(&self, degrees: f64) -> f64 {
        self.sin[table_index(degrees)]
    }

    /// Tangent of `degrees`, looked up after [`table_index`].
    #[must_use]
    pub fn tan(&self, degrees: f64) -> f64 {
        self.tan[table_index(degrees)]
    }
}

/// Maps an angle in degrees to a table slot.
///
/// The angle is floored to an integer and wrapped into `[0, 360)` with euclidean modulo, so
/// `-90` lands on `270`. `NaN` maps to slot `0`; infinities saturate before wrapping.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn table_index(degrees: f64) -> usize {
    let whole = degrees.floor() as i64;
    whole.rem_euclid(TRIG_TABLE_SIZE as i64) as usize
}

/// Shorthand for `TRIG.cos(degrees)`.
#[must_use]
pub fn fast_cos(degrees: f64) -> f64 {
    TRIG.cos(degrees)
}

/// Shorthand for `TRIG.sin(degrees)`.
#[must_use]
pub fn fast_sin(degrees: f64) -> f64 {
    TRIG.sin(degrees)
}

/// Shorthand for `TRIG.tan(degrees)`.
#[must_use]
pub fn fast_tan(degrees: f64) -> f64 {
    TRIG.tan(degrees)
}

/// Rounds to the nearest 1/1000, ties toward positive infinity.
fn quantize(value: f64) -> f64 {
    let scaled = value * TRIG_PRECISION;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / TRIG_PRECISION
}
