use scenegrab_base::NodeId;
use scenegrab_geometry::{Ray, Vec3};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::trace;

use crate::camera::Camera;
use crate::graph::SceneGraph;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// The leaf that was actually hit.
    pub node: NodeId,
    /// World-space hit point.
    pub point: Vec3,
    pub distance: f64,
}

/// Hits ordered nearest-first.
#[derive(Clone, Debug, Default)]
pub struct Intersections {
    hits: std::vec::IntoIter<Intersection>,
}

impl Iterator for Intersections {
    type Item = Intersection;

    fn next(&mut self) -> Option<Intersection> {
        self.hits.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.hits.size_hint()
    }
}

impl ExactSizeIterator for Intersections {}

#[derive(Clone, Copy, Debug)]
pub struct Raycaster {
    pub near: f64,
    pub far: f64,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: f64::INFINITY,
        }
    }
}

impl Raycaster {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            near: camera.near,
            far: camera.far,
        }
    }

    /// Tests `roots` (and, when `recursive`, everything below them) against
    /// the ray. Ids missing from the scene are skipped.
    ///
    /// Evaluation is eager: every candidate is tested and sorted before the
    /// first hit is returned, since nearest-first order needs all of them.
    pub fn intersect<'a, I>(
        &self,
        scene: &SceneGraph,
        ray: &Ray,
        roots: I,
        recursive: bool,
    ) -> Intersections
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let mut visited = HashSet::new();
        let mut hits = Vec::new();

        for &root in roots {
            if !scene.contains(root) {
                trace!(node = %root, "raycast skipped node missing from scene");
                continue;
            }
            let mut candidates = vec![root];
            if recursive {
                candidates.extend(scene.descendants(root));
            }
            for id in candidates {
                if !visited.insert(id) {
                    continue;
                }
                if let Some(hit) = self.intersect_node(scene, ray, id) {
                    hits.push(hit);
                }
            }
        }

        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        trace!(count = hits.len(), "raycast complete");
        Intersections {
            hits: hits.into_iter(),
        }
    }

    fn intersect_node(&self, scene: &SceneGraph, ray: &Ray, id: NodeId) -> Option<Intersection> {
        let mesh = scene.node(id)?.kind().mesh()?;
        let offset = scene.world_position(id).ok()?;
        let (t, local) = mesh.ray_pick(ray.origin - offset, ray.dir)?;
        if t < self.near || t > self.far {
            return None;
        }
        Some(Intersection {
            node: id,
            point: local + offset,
            distance: t,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use scenegrab_base::Result;

    fn unit_cube() -> Mesh {
        Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn hits_come_back_nearest_first() -> Result<()> {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let cube = Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
        let far = scene.add_mesh(root, "far", Vec3::new(0.0, 0.0, -5.0), cube.clone())?;
        let near = scene.add_mesh(root, "near", Vec3::ZERO, cube)?;

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let hits: Vec<_> = Raycaster::default()
            .intersect(&scene, &ray, &[far, near], false)
            .collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near);
        assert!(hits[0].point.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-9));
        assert_eq!(hits[1].node, far);
        Ok(())
    }

    #[test]
    fn descendants_only_when_recursive() -> Result<()> {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let model = scene.add_group(root, "model", Vec3::new(3.0, 0.0, 0.0))?;
        let leaf = scene.add_mesh(model, "leaf", Vec3::ZERO, unit_cube())?;

        let ray = Ray::new(Vec3::new(3.0, 0.0, 10.0), -Vec3::Z);
        let caster = Raycaster::default();
        assert_eq!(caster.intersect(&scene, &ray, &[model], false).len(), 0);

        let hits: Vec<_> = caster.intersect(&scene, &ray, &[model], true).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, leaf);
        assert!(hits[0].point.abs_diff_eq(Vec3::new(3.0, 0.0, 0.5), 1e-9));
        Ok(())
    }

    #[test]
    fn overlapping_roots_report_once() -> Result<()> {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let model = scene.add_group(root, "model", Vec3::ZERO)?;
        let leaf = scene.add_mesh(model, "leaf", Vec3::ZERO, unit_cube())?;

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let hits = Raycaster::default().intersect(&scene, &ray, &[model, leaf], true);
        assert_eq!(hits.len(), 1);
        Ok(())
    }

    #[test]
    fn clip_range_discards_hits() -> Result<()> {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let cube = scene.add_mesh(root, "cube", Vec3::ZERO, unit_cube())?;
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let caster = Raycaster { near: 0.0, far: 5.0 };
        assert_eq!(caster.intersect(&scene, &ray, &[cube], false).len(), 0);
        Ok(())
    }
}
