use scenegrab_base::Tolerance;
use scenegrab_geometry::{Plane, Vec3};
use serde::{Deserialize, Serialize};

/// How the drag plane normal is derived from the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneOrientation {
    /// Normalized camera position. Matches an orbit camera circling the
    /// world origin.
    #[default]
    CameraPosition,
    /// Direction from the anchor towards the camera.
    ViewDirection,
}

/// Plane through `anchor` facing the camera. A degenerate normal falls back
/// to the other orientation, then to +Z.
pub fn build_plane(
    camera_position: Vec3,
    anchor: Vec3,
    orientation: PlaneOrientation,
    tol: &Tolerance,
) -> Plane {
    let from_position = camera_position.normalized();
    let from_anchor = (camera_position - anchor).normalized();
    let (primary, secondary) = match orientation {
        PlaneOrientation::CameraPosition => (from_position, from_anchor),
        PlaneOrientation::ViewDirection => (from_anchor, from_position),
    };
    let normal = [primary, secondary]
        .into_iter()
        .find(|n| !tol.is_zero(n.length()))
        .unwrap_or(Vec3::Z);
    Plane::new(anchor, normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegrab_geometry::Ray;

    #[test]
    fn normal_follows_camera_position() {
        let tol = Tolerance::default();
        let plane = build_plane(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(1.0, 2.0, 3.0),
            PlaneOrientation::CameraPosition,
            &tol,
        );
        assert_eq!(plane.normal, Vec3::Z);
        assert_eq!(plane.point, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn view_direction_points_from_anchor() {
        let tol = Tolerance::default();
        let plane = build_plane(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 10.0),
            PlaneOrientation::ViewDirection,
            &tol,
        );
        assert!(plane.normal.abs_diff_eq(-Vec3::X, 1e-12));
    }

    #[test]
    fn camera_at_origin_falls_back() {
        let tol = Tolerance::default();
        let plane = build_plane(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -4.0),
            PlaneOrientation::CameraPosition,
            &tol,
        );
        assert!(plane.normal.abs_diff_eq(Vec3::Z, 1e-12));

        let plane = build_plane(Vec3::ZERO, Vec3::ZERO, PlaneOrientation::CameraPosition, &tol);
        assert_eq!(plane.normal, Vec3::Z);
    }

    #[test]
    fn pointer_rays_land_on_the_plane() {
        let tol = Tolerance::default();
        let camera = Vec3::new(3.0, 4.0, 0.0);
        let plane = build_plane(camera, Vec3::ZERO, PlaneOrientation::CameraPosition, &tol);
        let ray = Ray::new(camera, Vec3::new(-3.0, -3.0, 1.0));
        let hit = plane.intersect_ray(&ray, &tol).expect("ray heads towards the plane");
        assert!(plane.signed_distance(hit).abs() < 1e-9);
    }
}
