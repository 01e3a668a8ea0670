use scenegrab_base::Result;
use scenegrab_geometry::{Point2, Ray, Rect, Vec3};
use scenegrab_scene::{Camera, Raycaster};

use crate::feedback::CursorFeedback;

/// Camera as seen by the drag controller.
pub trait CameraView {
    fn position(&self) -> Vec3;

    fn ray_from_ndc(&self, ndc: Point2) -> Ray;

    /// Fails when the camera can no longer produce meaningful rays.
    fn validate(&self) -> Result<()>;

    fn raycaster(&self) -> Raycaster {
        Raycaster::default()
    }
}

impl CameraView for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn ray_from_ndc(&self, ndc: Point2) -> Ray {
        Camera::ray_from_ndc(self, ndc)
    }

    fn validate(&self) -> Result<()> {
        Camera::validate(self)
    }

    fn raycaster(&self) -> Raycaster {
        Raycaster::from_camera(self)
    }
}

/// The canvas pointer events come from.
pub trait PointerSurface {
    fn viewport(&self) -> Rect;

    fn set_cursor(&mut self, cursor: CursorFeedback);

    /// Start delivering pointer events to the controller.
    fn bind(&mut self) {}

    /// Stop delivering pointer events to the controller.
    fn unbind(&mut self) {}
}

/// External orbit-camera controller; only its enabled flag is touched.
pub trait OrbitControl {
    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}

/// Surface without a window: remembers the cursor and binding state.
#[derive(Clone, Debug)]
pub struct HeadlessSurface {
    pub viewport: Rect,
    cursor: CursorFeedback,
    cursor_history: Vec<CursorFeedback>,
    bound: bool,
}

impl HeadlessSurface {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            cursor: CursorFeedback::Default,
            cursor_history: Vec::new(),
            bound: false,
        }
    }

    pub fn cursor(&self) -> CursorFeedback {
        self.cursor
    }

    pub fn cursor_history(&self) -> &[CursorFeedback] {
        &self.cursor_history
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }
}

impl PointerSurface for HeadlessSurface {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn set_cursor(&mut self, cursor: CursorFeedback) {
        self.cursor = cursor;
        self.cursor_history.push(cursor);
    }

    fn bind(&mut self) {
        self.bound = true;
    }

    fn unbind(&mut self) {
        self.bound = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrbitToggle {
    pub enabled: bool,
}

impl Default for OrbitToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl OrbitControl for OrbitToggle {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
