//! Pointer-driven dragging of scene-graph objects alongside an orbit camera.
//!
//! A [`DragController`] receives pointer events from the host, resolves what
//! is under the pointer, and either reports hover feedback or moves the
//! picked object on a camera-facing plane while the orbit controller is
//! suspended.

pub mod config;
pub mod controller;
pub mod feedback;
pub mod hierarchy;
pub mod host;
pub mod plane;
pub mod pointer;
pub mod registry;

pub use config::DragConfig;
pub use controller::{DragController, DragNotice, DragSession, InteractionMode};
pub use feedback::CursorFeedback;
pub use hierarchy::resolve_target;
pub use host::{CameraView, HeadlessSurface, OrbitControl, OrbitToggle, PointerSurface};
pub use plane::{PlaneOrientation, build_plane};
pub use pointer::{PointerEvent, PointerEventKind, to_ndc};
pub use registry::DraggableRegistry;
pub use scenegrab_base::{Error, NodeId, Result};
