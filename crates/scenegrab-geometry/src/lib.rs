pub mod ray;
pub mod screen;
pub mod vec;

pub use ray::{Plane, Ray, ray_aabb_interval, ray_intersect_triangle};
pub use screen::{Point2, Rect, Vec2};
pub use vec::Vec3;
