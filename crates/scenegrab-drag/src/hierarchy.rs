use scenegrab_base::NodeId;
use scenegrab_scene::SceneGraph;

/// Walks up from `hit` to the highest ancestor directly below the scene root.
///
/// A top-level node, a node without a parent and an id unknown to the scene
/// all come back unchanged. The draggable flag is not consulted here.
pub fn resolve_target(scene: &SceneGraph, hit: NodeId) -> NodeId {
    let root = scene.root();
    let mut current = hit;
    while let Some(parent) = scene.parent(current) {
        if parent == root {
            break;
        }
        current = parent;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegrab_base::Result;
    use scenegrab_geometry::Vec3;
    use scenegrab_scene::Mesh;

    #[test]
    fn deep_leaf_resolves_to_top_group() -> Result<()> {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let model = scene.add_group(root, "model", Vec3::ZERO)?;
        let arm = scene.add_group(model, "arm", Vec3::ZERO)?;
        let hand = scene.add_mesh(arm, "hand", Vec3::ZERO, Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0)))?;

        assert_eq!(resolve_target(&scene, hand), model);
        assert_eq!(resolve_target(&scene, arm), model);
        assert_eq!(resolve_target(&scene, model), model);
        Ok(())
    }

    #[test]
    fn root_and_strangers_are_unchanged() {
        let scene = SceneGraph::new();
        assert_eq!(resolve_target(&scene, scene.root()), scene.root());
        let stranger = NodeId::new();
        assert_eq!(resolve_target(&scene, stranger), stranger);
    }
}
