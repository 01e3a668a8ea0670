use scenegrab_base::NodeId;
use std::collections::HashMap;
use tracing::debug;

/// Drag candidates and their draggable flags.
///
/// The pool decides what the ray is tested against; the flag decides whether
/// a resolved top-level node may be picked up. Both live here instead of on
/// the scene nodes.
#[derive(Clone, Debug, Default)]
pub struct DraggableRegistry {
    members: Vec<NodeId>,
    flags: HashMap<NodeId, bool>,
}

impl DraggableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: NodeId) {
        self.flags.insert(node, true);
        if !self.members.contains(&node) {
            self.members.push(node);
            debug!(node = %node, "draggable added");
        }
    }

    /// Clears the flag and drops the node from the pool. A drag already in
    /// progress on `node` is left alone.
    pub fn remove(&mut self, node: NodeId) {
        self.flags.insert(node, false);
        if let Some(idx) = self.members.iter().position(|id| *id == node) {
            self.members.remove(idx);
            debug!(node = %node, "draggable removed");
        }
    }

    /// Locks or unlocks a node without touching pool membership.
    pub fn set_locked(&mut self, node: NodeId, locked: bool) {
        self.flags.insert(node, !locked);
    }

    pub fn is_draggable(&self, node: NodeId) -> bool {
        self.flags.get(&node).copied().unwrap_or(false)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.flags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let node = NodeId::new();
        let mut registry = DraggableRegistry::new();
        registry.add(node);
        registry.add(node);
        assert_eq!(registry.members(), &[node]);
        assert!(registry.is_draggable(node));
    }

    #[test]
    fn remove_is_idempotent() {
        let (a, b) = (NodeId::new(), NodeId::new());
        let mut registry = DraggableRegistry::new();
        registry.add(a);
        registry.add(b);
        registry.remove(a);
        registry.remove(a);
        assert_eq!(registry.members(), &[b]);
        assert!(!registry.is_draggable(a));
        assert!(registry.is_draggable(b));
    }

    #[test]
    fn insertion_order_is_kept() {
        let ids: Vec<NodeId> = (0..4).map(|_| NodeId::new()).collect();
        let mut registry = DraggableRegistry::new();
        for id in &ids {
            registry.add(*id);
        }
        registry.remove(ids[1]);
        assert_eq!(registry.members(), &[ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn locking_keeps_membership() {
        let node = NodeId::new();
        let mut registry = DraggableRegistry::new();
        registry.add(node);
        registry.set_locked(node, true);
        assert!(registry.contains(node));
        assert!(!registry.is_draggable(node));
        registry.set_locked(node, false);
        assert!(registry.is_draggable(node));
    }
}
