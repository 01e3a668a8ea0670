use scenegrab_base::{Error, Result};
use scenegrab_geometry::{Point2, Ray, Rect, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

/// Perspective camera looking from `position` at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_deg: 50.0,
            aspect: 1.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl Camera {
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn with_aspect_of(mut self, rect: Rect) -> Self {
        self.set_aspect_from(rect);
        self
    }

    pub fn set_aspect_from(&mut self, rect: Rect) {
        if rect.is_valid() {
            self.aspect = (rect.width() / rect.height()) as f64;
        }
    }

    pub fn basis(&self) -> CameraBasis {
        let forward = (self.target - self.position).normalized();
        let mut right = forward.cross(self.up).normalized();
        if right.length() <= 1.0e-6 {
            right = forward.cross(Vec3::Z).normalized();
            if right.length() <= 1.0e-6 {
                right = Vec3::X;
            }
        }
        let up = right.cross(forward);
        CameraBasis { right, up, forward }
    }

    /// World ray from the eye through a point in normalized device
    /// coordinates (x right, y up, both in [-1, 1] on the viewport).
    pub fn ray_from_ndc(&self, ndc: Point2) -> Ray {
        let basis = self.basis();
        let half_h = (self.fov_deg.to_radians() * 0.5).tan();
        let half_w = half_h * self.aspect;
        let dir = basis.forward
            + basis.right * (ndc.x as f64 * half_w)
            + basis.up * (ndc.y as f64 * half_h);
        Ray::new(self.position, dir)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() || !self.target.is_finite() || !self.up.is_finite() {
            return Err(Error::InvalidCollaborator(
                "camera vectors must be finite".to_string(),
            ));
        }
        if (self.target - self.position).length() <= f64::EPSILON {
            return Err(Error::InvalidCollaborator(
                "camera position coincides with its target".to_string(),
            ));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(Error::InvalidCollaborator(format!(
                "camera fov {} outside (0, 180)",
                self.fov_deg
            )));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(Error::InvalidCollaborator(format!(
                "camera aspect {} must be positive",
                self.aspect
            )));
        }
        if !(self.near >= 0.0 && self.far > self.near) {
            return Err(Error::InvalidCollaborator(format!(
                "camera clip range [{}, {}] is empty",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_ray_points_at_target() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let ray = camera.ray_from_ndc(Point2::new(0.0, 0.0));
        assert!(ray.dir.abs_diff_eq(-Vec3::Z, 1e-12));
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn ndc_edges_span_the_fov() {
        let camera = Camera {
            fov_deg: 90.0,
            ..Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
        };
        let ray = camera.ray_from_ndc(Point2::new(0.0, 1.0));
        // 45 degrees above the view axis.
        assert!(ray.dir.abs_diff_eq(Vec3::new(0.0, 1.0, -1.0).normalized(), 1e-9));
        let ray = camera.ray_from_ndc(Point2::new(1.0, 0.0));
        assert!(ray.dir.abs_diff_eq(Vec3::new(1.0, 0.0, -1.0).normalized(), 1e-9));
    }

    #[test]
    fn straight_down_view_still_has_a_basis() {
        let camera = Camera::look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        let basis = camera.basis();
        assert!((basis.right.length() - 1.0).abs() < 1e-9);
        assert!((basis.up.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_cameras_are_rejected() {
        let mut camera = Camera::default();
        assert!(camera.validate().is_ok());
        camera.fov_deg = 0.0;
        assert!(camera.validate().is_err());

        let camera = Camera::look_at(Vec3::ZERO, Vec3::ZERO);
        assert!(matches!(camera.validate(), Err(Error::InvalidCollaborator(_))));

        let camera = Camera::look_at(Vec3::new(f64::NAN, 0.0, 0.0), Vec3::ZERO);
        assert!(camera.validate().is_err());
    }
}
