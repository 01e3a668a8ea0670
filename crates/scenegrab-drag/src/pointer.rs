use scenegrab_geometry::{Point2, Rect};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The pointer left the canvas.
    Leave,
    /// The host lost pointer capture, e.g. the button was released outside
    /// the window.
    CaptureLost,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Screen position in pixels, same space as the surface viewport.
    pub position: Point2,
    /// Primary button state sampled with the event.
    #[serde(default)]
    pub primary_down: bool,
    #[serde(default)]
    pub pointer_id: u32,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point2, primary_down: bool) -> Self {
        Self {
            kind,
            position,
            primary_down,
            pointer_id: 0,
        }
    }

    pub fn down(position: Point2) -> Self {
        Self::new(PointerEventKind::Down, position, true)
    }

    /// Move with the primary button held.
    pub fn drag_to(position: Point2) -> Self {
        Self::new(PointerEventKind::Move, position, true)
    }

    /// Move with no button held.
    pub fn hover_to(position: Point2) -> Self {
        Self::new(PointerEventKind::Move, position, false)
    }

    pub fn up(position: Point2) -> Self {
        Self::new(PointerEventKind::Up, position, false)
    }

    pub fn leave(position: Point2, primary_down: bool) -> Self {
        Self::new(PointerEventKind::Leave, position, primary_down)
    }

    pub fn capture_lost(position: Point2) -> Self {
        Self::new(PointerEventKind::CaptureLost, position, false)
    }

    pub fn with_pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// Maps a screen position to normalized device coordinates of `viewport`:
/// x grows right, y grows up, the viewport spans [-1, 1] on both axes.
/// Points outside the viewport map outside that range.
pub fn to_ndc(pos: Point2, viewport: Rect) -> Option<Point2> {
    if !viewport.is_valid() || !pos.is_finite() {
        return None;
    }
    let x = (pos.x - viewport.min.x) / viewport.width() * 2.0 - 1.0;
    let y = -((pos.y - viewport.min.y) / viewport.height()) * 2.0 + 1.0;
    Some(Point2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegrab_geometry::Vec2;

    #[test]
    fn corners_map_to_unit_square() {
        let viewport = Rect::from_min_size(Point2::new(100.0, 50.0), Vec2::new(200.0, 100.0));
        assert_eq!(to_ndc(Point2::new(100.0, 50.0), viewport), Some(Point2::new(-1.0, 1.0)));
        assert_eq!(to_ndc(Point2::new(300.0, 150.0), viewport), Some(Point2::new(1.0, -1.0)));
        assert_eq!(to_ndc(viewport.center(), viewport), Some(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn outside_points_still_map() {
        let viewport = Rect::from_min_size(Point2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        assert_eq!(to_ndc(Point2::new(150.0, 50.0), viewport), Some(Point2::new(2.0, 0.0)));
    }

    #[test]
    fn degenerate_viewport_has_no_mapping() {
        let viewport = Rect::from_min_size(Point2::new(0.0, 0.0), Vec2::new(0.0, 100.0));
        assert!(to_ndc(Point2::new(0.0, 0.0), viewport).is_none());
    }

    #[test]
    fn events_parse_with_defaults() -> Result<(), serde_json::Error> {
        let event: PointerEvent =
            serde_json::from_str(r#"{"kind":"capture_lost","position":{"x":1.0,"y":2.0}}"#)?;
        assert_eq!(event, PointerEvent::capture_lost(Point2::new(1.0, 2.0)));
        Ok(())
    }
}
