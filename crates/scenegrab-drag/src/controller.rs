use scenegrab_base::{Error, NodeId, Result};
use scenegrab_geometry::{Plane, Point2, Ray, Vec3};
use scenegrab_scene::SceneGraph;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::DragConfig;
use crate::feedback::CursorFeedback;
use crate::hierarchy::resolve_target;
use crate::host::{CameraView, OrbitControl, PointerSurface};
use crate::plane::build_plane;
use crate::pointer::{PointerEvent, PointerEventKind, to_ndc};
use crate::registry::DraggableRegistry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Idle,
    Hovering,
    Dragging,
}

/// State of one press-to-release drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    target: NodeId,
    plane: Plane,
    offset: Vec3,
    pointer_id: u32,
}

impl DragSession {
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Plane hit at press time minus the target's world position.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn pointer_id(&self) -> u32 {
        self.pointer_id
    }
}

/// What happened while handling an event, for the host to react to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum DragNotice {
    HoverOn { node: NodeId },
    HoverOff { node: NodeId },
    DragStart { node: NodeId },
    /// `position` is the node's new position relative to its parent.
    Drag { node: NodeId, position: Vec3 },
    DragEnd { node: NodeId },
}

pub struct DragController<C, S, O> {
    camera: C,
    surface: S,
    orbit: O,
    config: DragConfig,
    registry: DraggableRegistry,
    mode: InteractionMode,
    session: Option<DragSession>,
    hovered: Option<NodeId>,
    enabled: bool,
    disposed: bool,
}

impl<C, S, O> DragController<C, S, O>
where
    C: CameraView,
    S: PointerSurface,
    O: OrbitControl,
{
    pub fn new(camera: C, mut surface: S, orbit: O, config: DragConfig) -> Result<Self> {
        camera.validate()?;
        if !surface.viewport().is_valid() {
            return Err(Error::InvalidCollaborator(format!(
                "pointer surface viewport {:?} has no area",
                surface.viewport()
            )));
        }
        config.validate()?;

        surface.bind();
        surface.set_cursor(CursorFeedback::Default);
        debug!(?config, "drag controller attached");
        Ok(Self {
            camera,
            surface,
            orbit,
            config,
            registry: DraggableRegistry::new(),
            mode: InteractionMode::Idle,
            session: None,
            hovered: None,
            enabled: true,
            disposed: false,
        })
    }

    pub fn add_draggable(&mut self, node: NodeId) {
        self.registry.add(node);
    }

    /// Removing the hovered node outside a drag drops its hover feedback.
    pub fn remove_draggable(&mut self, node: NodeId) -> Vec<DragNotice> {
        self.registry.remove(node);
        self.drop_stale_hover(node)
    }

    pub fn set_locked(&mut self, node: NodeId, locked: bool) -> Vec<DragNotice> {
        self.registry.set_locked(node, locked);
        self.drop_stale_hover(node)
    }

    pub fn registry(&self) -> &DraggableRegistry {
        &self.registry
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.session.map(|session| session.target)
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn feedback(&self) -> CursorFeedback {
        CursorFeedback::from_mode(self.mode)
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn orbit(&self) -> &O {
        &self.orbit
    }

    pub fn orbit_mut(&mut self) -> &mut O {
        &mut self.orbit
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// A disabled controller ignores pointer events. Disabling mid-drag ends
    /// the drag and hands the camera back to the orbit controller.
    pub fn set_enabled(&mut self, enabled: bool) -> Vec<DragNotice> {
        let mut notices = Vec::new();
        if self.enabled == enabled {
            return notices;
        }
        self.enabled = enabled;
        if !enabled {
            self.end_session(&mut notices);
            self.clear_hover(&mut notices);
        }
        debug!(enabled, "drag controller toggled");
        notices
    }

    /// Detaches from the surface and forgets every draggable. Safe to call
    /// more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let mut notices = Vec::new();
        self.end_session(&mut notices);
        self.clear_hover(&mut notices);
        self.surface.unbind();
        self.registry.clear();
        self.disposed = true;
        debug!("drag controller disposed");
    }

    /// Runs one pointer event through the state machine.
    ///
    /// Misses, non-draggable hits and degenerate plane crossings are normal
    /// outcomes and produce no notices. `Err` means the camera or the surface
    /// stopped being usable.
    pub fn handle(
        &mut self,
        scene: &mut SceneGraph,
        event: PointerEvent,
    ) -> Result<Vec<DragNotice>> {
        let mut notices = Vec::new();
        if self.disposed || !self.enabled {
            trace!(kind = ?event.kind, "event ignored by inactive controller");
            return Ok(notices);
        }
        self.check_collaborators()?;

        match event.kind {
            PointerEventKind::Down => self.on_down(scene, event, &mut notices),
            PointerEventKind::Move => self.on_move(scene, event, &mut notices),
            PointerEventKind::Up => self.on_up(scene, event, &mut notices),
            PointerEventKind::Leave => self.on_leave(event, &mut notices),
            PointerEventKind::CaptureLost => self.on_capture_lost(scene, event, &mut notices),
        }
        Ok(notices)
    }

    fn on_down(&mut self, scene: &SceneGraph, event: PointerEvent, notices: &mut Vec<DragNotice>) {
        if let Some(session) = &self.session {
            debug!(node = %session.target, "press ignored while dragging");
            return;
        }

        let Some(ray) = self.pointer_ray(event.position) else {
            return;
        };
        let Some(target) = self.pick(scene, &ray) else {
            // Whatever was hovered before is no longer pickable here.
            self.clear_hover(notices);
            return;
        };
        let anchor = match scene.world_position(target) {
            Ok(anchor) => anchor,
            Err(err) => {
                warn!(node = %target, %err, "press resolved to a node without a position");
                return;
            }
        };

        let tol = self.config.tolerance;
        let plane = build_plane(
            self.camera.position(),
            anchor,
            self.config.plane_orientation,
            &tol,
        );
        let offset = match plane.intersect_ray(&ray, &tol) {
            Some(point) => point - anchor,
            None => {
                debug!(node = %target, "press ray misses the drag plane, using zero offset");
                Vec3::ZERO
            }
        };

        self.session = Some(DragSession {
            target,
            plane,
            offset,
            pointer_id: event.pointer_id,
        });
        self.orbit.set_enabled(false);
        self.set_mode(InteractionMode::Dragging);
        debug!(node = %target, ?offset, normal = ?plane.normal, "drag started");
        notices.push(DragNotice::DragStart { node: target });
    }

    fn on_move(
        &mut self,
        scene: &mut SceneGraph,
        event: PointerEvent,
        notices: &mut Vec<DragNotice>,
    ) {
        let Some(session) = self.session else {
            self.update_hover(scene, event.position, notices);
            return;
        };
        if event.pointer_id != session.pointer_id {
            trace!(pointer = event.pointer_id, "move from another pointer ignored");
            return;
        }
        if self.config.implicit_release && !event.primary_down {
            debug!(node = %session.target, "button found up during drag, releasing");
            self.release(scene, Some(event.position), notices);
            return;
        }

        if self.orbit.enabled() {
            warn!("orbit controller re-enabled during a drag, suspending it again");
            self.orbit.set_enabled(false);
        }

        let Some(ray) = self.pointer_ray(event.position) else {
            return;
        };
        let Some(point) = session.plane.intersect_ray(&ray, &self.config.tolerance) else {
            debug!(node = %session.target, "pointer ray parallel to drag plane, move skipped");
            return;
        };

        let world = point - session.offset;
        let parent_world = match scene.parent(session.target) {
            Some(parent) => match scene.world_position(parent) {
                Ok(parent_world) => parent_world,
                Err(err) => {
                    warn!(
                        node = %session.target,
                        %err,
                        "dragged node lost its parent, move skipped"
                    );
                    return;
                }
            },
            None => Vec3::ZERO,
        };
        let position = world - parent_world;
        if let Err(err) = scene.set_position(session.target, position) {
            warn!(node = %session.target, %err, "dragged node vanished from the scene");
            return;
        }
        trace!(node = %session.target, ?position, "dragged");
        notices.push(DragNotice::Drag {
            node: session.target,
            position,
        });
    }

    fn on_up(&mut self, scene: &SceneGraph, event: PointerEvent, notices: &mut Vec<DragNotice>) {
        match self.session {
            Some(session) if session.pointer_id == event.pointer_id => {
                self.release(scene, Some(event.position), notices);
            }
            Some(_) => {
                trace!(pointer = event.pointer_id, "release from another pointer ignored");
            }
            None => {}
        }
    }

    fn on_leave(&mut self, event: PointerEvent, notices: &mut Vec<DragNotice>) {
        if self.session.is_some() {
            if self.config.implicit_release && !event.primary_down {
                debug!("pointer left the canvas with the button up, releasing");
                self.end_session(notices);
                self.clear_hover(notices);
            }
            return;
        }
        self.clear_hover(notices);
    }

    fn on_capture_lost(
        &mut self,
        scene: &SceneGraph,
        event: PointerEvent,
        notices: &mut Vec<DragNotice>,
    ) {
        if self.session.is_none() || !self.config.implicit_release {
            return;
        }
        debug!("pointer capture lost, releasing");
        self.release(scene, Some(event.position), notices);
    }

    /// Ends the session, then settles on Hovering or Idle from a fresh ray
    /// test at `hover_at`.
    fn release(
        &mut self,
        scene: &SceneGraph,
        hover_at: Option<Point2>,
        notices: &mut Vec<DragNotice>,
    ) {
        self.end_session(notices);
        let candidate = hover_at
            .filter(|pos| pos.is_finite())
            .and_then(|pos| self.candidate_at(scene, pos));
        self.apply_hover(candidate, notices);
    }

    /// Callers settle the mode afterwards through `apply_hover`, so a release
    /// moves the cursor straight from grabbing to its hover state.
    fn end_session(&mut self, notices: &mut Vec<DragNotice>) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.orbit.set_enabled(true);
        debug!(node = %session.target, "drag ended");
        notices.push(DragNotice::DragEnd {
            node: session.target,
        });
    }

    /// An unmappable position leaves hover as it was.
    fn update_hover(&mut self, scene: &SceneGraph, pos: Point2, notices: &mut Vec<DragNotice>) {
        if !pos.is_finite() {
            warn!(?pos, "pointer position is not finite, hover left unchanged");
            return;
        }
        let candidate = self.candidate_at(scene, pos);
        self.apply_hover(candidate, notices);
    }

    fn candidate_at(&self, scene: &SceneGraph, pos: Point2) -> Option<NodeId> {
        if !self.surface.viewport().contains(pos) {
            return None;
        }
        let ray = self.pointer_ray(pos)?;
        self.pick(scene, &ray)
    }

    fn drop_stale_hover(&mut self, node: NodeId) -> Vec<DragNotice> {
        let mut notices = Vec::new();
        let stale = self.hovered == Some(node) && !self.registry.is_draggable(node);
        if self.session.is_none() && stale {
            debug!(node = %node, "hovered node no longer draggable");
            self.clear_hover(&mut notices);
        }
        notices
    }

    fn clear_hover(&mut self, notices: &mut Vec<DragNotice>) {
        self.apply_hover(None, notices);
    }

    fn apply_hover(&mut self, candidate: Option<NodeId>, notices: &mut Vec<DragNotice>) {
        if self.hovered != candidate {
            if let Some(old) = self.hovered {
                debug!(node = %old, "hover off");
                notices.push(DragNotice::HoverOff { node: old });
            }
            if let Some(new) = candidate {
                debug!(node = %new, "hover on");
                notices.push(DragNotice::HoverOn { node: new });
            }
            self.hovered = candidate;
        }
        let mode = if candidate.is_some() {
            InteractionMode::Hovering
        } else {
            InteractionMode::Idle
        };
        self.set_mode(mode);
    }

    /// Nearest hit among the registered nodes, resolved to its top-level
    /// ancestor, if that ancestor is draggable.
    fn pick(&self, scene: &SceneGraph, ray: &Ray) -> Option<NodeId> {
        let hit = self
            .camera
            .raycaster()
            .intersect(scene, ray, self.registry.members(), self.config.recursive)
            .next();
        let Some(hit) = hit else {
            trace!("pointer ray missed every draggable");
            return None;
        };
        let target = resolve_target(scene, hit.node);
        if !self.registry.is_draggable(target) {
            debug!(hit = %hit.node, resolved = %target, "ray hit a non-draggable target");
            return None;
        }
        Some(target)
    }

    /// `None` for a position that cannot be mapped to the viewport, which
    /// after `check_collaborators` means the event itself is malformed.
    fn pointer_ray(&self, pos: Point2) -> Option<Ray> {
        let Some(ndc) = to_ndc(pos, self.surface.viewport()) else {
            warn!(?pos, "pointer position cannot be mapped to the viewport, event skipped");
            return None;
        };
        Some(self.camera.ray_from_ndc(ndc))
    }

    fn check_collaborators(&self) -> Result<()> {
        self.camera.validate()?;
        let viewport = self.surface.viewport();
        if !viewport.is_valid() {
            return Err(Error::InvalidCollaborator(format!(
                "pointer surface viewport {viewport:?} has no area"
            )));
        }
        Ok(())
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode == mode {
            return;
        }
        trace!(from = ?self.mode, to = ?mode, "mode change");
        self.mode = mode;
        self.surface.set_cursor(CursorFeedback::from_mode(mode));
    }
}

impl<C, S, O> std::fmt::Debug for DragController<C, S, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("mode", &self.mode)
            .field("session", &self.session)
            .field("hovered", &self.hovered)
            .field("draggables", &self.registry.len())
            .field("enabled", &self.enabled)
            .field("disposed", &self.disposed)
            .finish()
    }
}
