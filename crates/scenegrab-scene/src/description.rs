use scenegrab_base::{Error, NodeId, Result};
use scenegrab_geometry::{Point2, Rect, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::camera::Camera;
use crate::graph::{NodeKind, SceneGraph};
use crate::mesh::Mesh;
use crate::metadata::Metadata;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ViewportSize {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Point2::new(0.0, 0.0), Vec2::new(self.width, self.height))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    #[default]
    Group,
    Box { size: Vec3 },
    Triangles { vertices: Vec<[Vec3; 3]> },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    #[serde(default)]
    pub shape: ShapeDescription,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub draggable: bool,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub children: Vec<NodeDescription>,
}

/// Serialized form of a scene: camera, viewport and a node tree below the
/// root.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
}

#[derive(Clone, Debug)]
pub struct BuiltScene {
    pub graph: SceneGraph,
    pub camera: Camera,
    pub viewport: Rect,
    /// Nodes flagged `draggable`, in declaration order.
    pub draggable: Vec<NodeId>,
    pub names: BTreeMap<String, NodeId>,
}

impl SceneDescription {
    pub fn build(&self) -> Result<BuiltScene> {
        let mut built = BuiltScene {
            graph: SceneGraph::new(),
            camera: self.camera.with_aspect_of(self.viewport.rect()),
            viewport: self.viewport.rect(),
            draggable: Vec::new(),
            names: BTreeMap::new(),
        };
        let root = built.graph.root();
        for node in &self.nodes {
            insert_node(&mut built, root, node)?;
        }
        debug!(
            nodes = built.graph.len(),
            draggable = built.draggable.len(),
            "scene built"
        );
        Ok(built)
    }
}

fn insert_node(built: &mut BuiltScene, parent: NodeId, desc: &NodeDescription) -> Result<()> {
    if built.names.contains_key(&desc.name) {
        return Err(Error::InvalidParameter(format!(
            "duplicate node name {:?}",
            desc.name
        )));
    }
    let kind = match &desc.shape {
        ShapeDescription::Group => NodeKind::Group,
        ShapeDescription::Box { size } => NodeKind::Mesh(Mesh::cuboid(*size)),
        ShapeDescription::Triangles { vertices } => {
            NodeKind::Mesh(Mesh::from_triangles(vertices))
        }
    };
    let id = built
        .graph
        .add_node(parent, desc.name.clone(), kind, desc.position)?;
    if let Some(node) = built.graph.node_mut(id) {
        node.metadata = desc.metadata.clone();
    }
    built.names.insert(desc.name.clone(), id);
    if desc.draggable {
        built.draggable.push(id);
    }
    for child in &desc.children {
        insert_node(built, id, child)?;
    }
    Ok(())
}
