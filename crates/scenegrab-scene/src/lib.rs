pub mod camera;
pub mod description;
pub mod graph;
pub mod mesh;
pub mod metadata;
pub mod raycast;

pub use camera::Camera;
pub use description::{
    BuiltScene, NodeDescription, SceneDescription, ShapeDescription, ViewportSize,
};
pub use graph::{NodeKind, SceneGraph, SceneNode};
pub use mesh::Mesh;
pub use metadata::{MetaValue, Metadata};
pub use raycast::{Intersection, Intersections, Raycaster};
pub use scenegrab_base::{Error, NodeId, Result};
