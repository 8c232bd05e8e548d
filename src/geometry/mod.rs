pub mod point;
pub mod point3d;
pub mod rectangle;
pub mod vector3d;

pub use point::Point;
pub use point3d::Point3D;
pub use rectangle::Rectangle;
pub use vector3d::Vector3D;
