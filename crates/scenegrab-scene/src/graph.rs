use scenegrab_base::{Error, NodeId, Result};
use scenegrab_geometry::Vec3;
use std::collections::HashMap;

use crate::mesh::Mesh;
use crate::metadata::Metadata;

/// What a node is, decided once when it is inserted.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Root,
    Group,
    Mesh(Mesh),
}

impl NodeKind {
    pub fn mesh(&self) -> Option<&Mesh> {
        match self {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, NodeKind::Root | NodeKind::Group)
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    id: NodeId,
    pub name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Translation relative to the parent.
    pub position: Vec3,
    pub metadata: Metadata,
}

impl SceneNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    root: NodeId,
    nodes: HashMap<NodeId, SceneNode>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            SceneNode {
                id: root,
                name: "root".to_string(),
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
                position: Vec3::ZERO,
                metadata: Metadata::new(),
            },
        );
        Self { root, nodes }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        position: Vec3,
    ) -> Result<NodeId> {
        if matches!(kind, NodeKind::Root) {
            return Err(Error::InvalidParameter(
                "a scene has exactly one root".to_string(),
            ));
        }
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(Error::UnknownNode(parent))?;
        if !parent_node.kind.is_composite() {
            return Err(Error::InvalidParameter(format!(
                "node {} is a mesh and cannot own children",
                parent_node.name
            )));
        }

        let id = NodeId::new();
        parent_node.children.push(id);
        self.nodes.insert(
            id,
            SceneNode {
                id,
                name: name.into(),
                kind,
                parent: Some(parent),
                children: Vec::new(),
                position,
                metadata: Metadata::new(),
            },
        );
        Ok(id)
    }

    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        position: Vec3,
    ) -> Result<NodeId> {
        self.add_node(parent, name, NodeKind::Group, position)
    }

    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        position: Vec3,
        mesh: Mesh,
    ) -> Result<NodeId> {
        self.add_node(parent, name, NodeKind::Mesh(mesh), position)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Every node below `id` in depth-first pre-order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    pub fn is_top_level(&self, id: NodeId) -> bool {
        match self.parent(id) {
            None => true,
            Some(parent) => parent == self.root,
        }
    }

    pub fn position(&self, id: NodeId) -> Result<Vec3> {
        self.nodes
            .get(&id)
            .map(|node| node.position)
            .ok_or(Error::UnknownNode(id))
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))?;
        node.position = position;
        Ok(())
    }

    pub fn world_position(&self, id: NodeId) -> Result<Vec3> {
        let mut node = self.nodes.get(&id).ok_or(Error::UnknownNode(id))?;
        let mut world = node.position;
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent).ok_or(Error::UnknownNode(parent))?;
            world += node.position;
        }
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(scene: &mut SceneGraph) -> Result<(NodeId, NodeId, NodeId)> {
        let root = scene.root();
        let group = scene.add_group(root, "model", Vec3::new(1.0, 0.0, 0.0))?;
        let body = scene.add_group(group, "body", Vec3::new(0.0, 1.0, 0.0))?;
        let wheel = Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
        let leaf = scene.add_mesh(body, "wheel", Vec3::new(0.0, 0.0, 1.0), wheel)?;
        Ok((group, body, leaf))
    }

    #[test]
    fn world_position_accumulates_parents() -> Result<()> {
        let mut scene = SceneGraph::new();
        let (_, _, leaf) = model(&mut scene)?;
        assert_eq!(scene.world_position(leaf)?, Vec3::new(1.0, 1.0, 1.0));
        Ok(())
    }

    #[test]
    fn descendants_are_preorder() -> Result<()> {
        let mut scene = SceneGraph::new();
        let (group, body, leaf) = model(&mut scene)?;
        let sibling = scene.add_group(group, "arm", Vec3::ZERO)?;
        assert_eq!(scene.descendants(group), vec![body, leaf, sibling]);
        assert!(scene.is_top_level(group));
        assert!(!scene.is_top_level(leaf));
        Ok(())
    }

    #[test]
    fn meshes_cannot_own_children() -> Result<()> {
        let mut scene = SceneGraph::new();
        let (_, _, leaf) = model(&mut scene)?;
        let err = scene.add_group(leaf, "nested", Vec3::ZERO);
        assert!(matches!(err, Err(Error::InvalidParameter(_))));
        Ok(())
    }

    #[test]
    fn unknown_parent_is_reported() {
        let mut scene = SceneGraph::new();
        let stray = NodeId::new();
        let err = scene.add_group(stray, "orphan", Vec3::ZERO);
        assert!(matches!(err, Err(Error::UnknownNode(id)) if id == stray));
    }
}
