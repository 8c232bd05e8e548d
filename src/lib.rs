pub mod error;
pub mod geometry;
pub mod math;
pub mod transform;

pub use error::{Result, TransformError, TransmatError};
pub use geometry::{Point, Point3D, Rectangle, Vector3D};
pub use transform::{Matrix2D, Matrix4x4, Quaternion, Transform2D, Transform3D};
