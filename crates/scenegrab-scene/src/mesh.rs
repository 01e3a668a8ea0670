use scenegrab_base::{Error, Result};
use scenegrab_geometry::{Vec3, ray_aabb_interval, ray_intersect_triangle};

/// Triangle soup in the local frame of the node that owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    tri_faces: Vec<[usize; 3]>,
    bounds: Option<(Vec3, Vec3)>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, tri_faces: Vec<[usize; 3]>) -> Result<Self> {
        if let Some(tri) = tri_faces
            .iter()
            .find(|tri| tri.iter().any(|&idx| idx >= positions.len()))
        {
            return Err(Error::InvalidParameter(format!(
                "triangle {tri:?} indexes past {} positions",
                positions.len()
            )));
        }
        let bounds = compute_bounds(&positions);
        Ok(Self {
            positions,
            tri_faces,
            bounds,
        })
    }

    pub fn from_triangles(triangles: &[[Vec3; 3]]) -> Self {
        let mut positions = Vec::with_capacity(triangles.len() * 3);
        let mut tri_faces = Vec::with_capacity(triangles.len());
        for tri in triangles {
            let base = positions.len();
            positions.extend_from_slice(tri);
            tri_faces.push([base, base + 1, base + 2]);
        }
        let bounds = compute_bounds(&positions);
        Self {
            positions,
            tri_faces,
            bounds,
        }
    }

    /// Axis-aligned box centred on the local origin.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let positions = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        let tri_faces = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 6, 2],
            [3, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        let bounds = compute_bounds(&positions);
        Self {
            positions,
            tri_faces,
            bounds,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn tri_faces(&self) -> &[[usize; 3]] {
        &self.tri_faces
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.tri_faces.is_empty()
    }

    /// Nearest hit of a local-space ray, as `(t, local point)`.
    pub fn ray_pick(&self, origin: Vec3, dir: Vec3) -> Option<(f64, Vec3)> {
        let bounds = self.bounds?;
        if self.tri_faces.is_empty() {
            return None;
        }
        ray_aabb_interval(origin, dir, bounds, f64::INFINITY)?;

        let mut best_t = f64::INFINITY;
        let mut best_point = None;
        for tri in &self.tri_faces {
            let p0 = self.positions[tri[0]];
            let p1 = self.positions[tri[1]];
            let p2 = self.positions[tri[2]];
            if let Some(t) = ray_intersect_triangle(origin, dir, p0, p1, p2) {
                if t < best_t {
                    best_t = t;
                    best_point = Some(origin + dir * t);
                }
            }
        }
        best_point.map(|point| (best_t, point))
    }
}

fn compute_bounds(points: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let mut iter = points.iter().copied();
    let first = iter.next()?;
    let mut min = first;
    let mut max = first;
    for p in iter {
        min = min.min(p);
        max = max.max(p);
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_front_face_is_nearest() {
        let mesh = Mesh::cuboid(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(mesh.tri_faces().len(), 12);
        let hit = mesh.ray_pick(Vec3::new(0.2, 0.3, 10.0), -Vec3::Z);
        let (t, point) = hit.expect("ray through the box centre must hit");
        assert!((t - 9.0).abs() < 1e-9);
        assert!(point.abs_diff_eq(Vec3::new(0.2, 0.3, 1.0), 1e-9));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = Mesh::new(vec![Vec3::ZERO, Vec3::X], vec![[0, 1, 2]]);
        assert!(matches!(err, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn empty_mesh_never_hits() {
        let mesh = Mesh::from_triangles(&[]);
        assert!(mesh.is_empty());
        assert!(mesh.ray_pick(Vec3::ZERO, Vec3::Z).is_none());
    }
}
