mod components;
mod matrix2d;
mod matrix4x4;
mod quaternion;

pub use components::{Transform2D, Transform3D};
pub use matrix2d::Matrix2D;
pub use matrix4x4::Matrix4x4;
pub use quaternion::Quaternion;
