use scenegrab_base::Tolerance;
use serde::{Deserialize, Serialize};

use crate::vec::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always unit length when built through [`Ray::new`].
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalized(),
        }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalized(),
        }
    }

    pub fn signed_distance(&self, p: Vec3) -> f64 {
        (p - self.point).dot(self.normal)
    }

    /// Ray parameter of the crossing, `None` if the ray runs parallel to the
    /// plane or the plane lies behind the origin.
    pub fn ray_distance(&self, ray: &Ray, tol: &Tolerance) -> Option<f64> {
        let denom = ray.dir.dot(self.normal);
        if tol.is_zero(denom) {
            return None;
        }
        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if t < 0.0 || !t.is_finite() {
            return None;
        }
        Some(t)
    }

    pub fn intersect_ray(&self, ray: &Ray, tol: &Tolerance) -> Option<Vec3> {
        self.ray_distance(ray, tol).map(|t| ray.at(t))
    }
}

pub fn ray_intersect_triangle(
    origin: Vec3,
    dir: Vec3,
    a: Vec3,
    b: Vec3,
    c: Vec3,
) -> Option<f64> {
    let eps = 1.0e-9;
    let edge1 = b - a;
    let edge2 = c - a;
    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < eps {
        return None;
    }
    let inv_det = 1.0 / det;
    let tvec = origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(qvec) * inv_det;
    if t > eps { Some(t) } else { None }
}

/// Entry and exit parameters of the ray through an axis-aligned box, clipped
/// to `[0, max_t]`.
pub fn ray_aabb_interval(
    origin: Vec3,
    dir: Vec3,
    bounds: (Vec3, Vec3),
    max_t: f64,
) -> Option<(f64, f64)> {
    let (min, max) = bounds;
    let mut tmin: f64 = 0.0;
    let mut tmax: f64 = max_t;

    let mut check_axis = |origin: f64, dir: f64, min: f64, max: f64| -> bool {
        if dir.abs() <= 1.0e-9 {
            return origin >= min && origin <= max;
        }
        let inv = 1.0 / dir;
        let t1 = (min - origin) * inv;
        let t2 = (max - origin) * inv;
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
        tmax >= tmin
    };

    if !check_axis(origin.x, dir.x, min.x, max.x) {
        return None;
    }
    if !check_axis(origin.y, dir.y, min.y, max.y) {
        return None;
    }
    if !check_axis(origin.z, dir.z, min.z, max.z) {
        return None;
    }
    if tmax < 0.0 {
        return None;
    }
    Some((tmin, tmax))
}
