use anyhow::{Context, Result, bail};
use scenegrab_base::NodeId;
use scenegrab_drag::{
    CursorFeedback, DragConfig, DragController, DragNotice, HeadlessSurface, InteractionMode,
    OrbitControl, OrbitToggle, PointerEvent, resolve_target, to_ndc,
};
use scenegrab_geometry::{Point2, Vec3};
use scenegrab_scene::{BuiltScene, Raycaster, SceneDescription, SceneGraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A pointer script: events interleaved with registry and controller toggles.
#[derive(Clone, Debug, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Registry { action: RegistryAction, node: String },
    Control { control: ControlAction },
    Pointer(PointerEvent),
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryAction {
    Add,
    Remove,
    Lock,
    Unlock,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Enable,
    Disable,
    Dispose,
}

#[derive(Clone, Debug, Serialize)]
pub struct NamedNotice {
    pub step: usize,
    pub notice: &'static str,
    pub node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReplayReport {
    pub mode: InteractionMode,
    pub cursor: CursorFeedback,
    pub target: Option<String>,
    pub hovered: Option<String>,
    pub orbit_enabled: bool,
    /// Final positions relative to each node's parent.
    pub positions: BTreeMap<String, Vec3>,
    pub notices: Vec<NamedNotice>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PickHit {
    pub node: String,
    pub point: Vec3,
    pub distance: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PickReport {
    pub ndc: Option<Point2>,
    pub hits: Vec<PickHit>,
    /// Top-level object the nearest hit belongs to.
    pub target: Option<String>,
    pub draggable: bool,
}

pub fn replay(
    scene: &SceneDescription,
    script: &Script,
    config: DragConfig,
) -> Result<ReplayReport> {
    let BuiltScene {
        mut graph,
        camera,
        viewport,
        draggable,
        names,
    } = scene.build().context("build scene")?;

    let mut controller = DragController::new(
        camera,
        HeadlessSurface::new(viewport),
        OrbitToggle::default(),
        config,
    )
    .context("attach drag controller")?;
    for id in draggable {
        controller.add_draggable(id);
    }

    let mut notices = Vec::new();
    for (step, entry) in script.steps.iter().enumerate() {
        match entry {
            Step::Pointer(event) => {
                let emitted = controller
                    .handle(&mut graph, *event)
                    .with_context(|| format!("step {step}: {:?}", event.kind))?;
                notices.extend(emitted.into_iter().map(|n| name_notice(&graph, step, n)));
            }
            Step::Registry { action, node } => {
                let Some(&id) = names.get(node) else {
                    bail!("step {step}: unknown node {node:?}");
                };
                let emitted = match action {
                    RegistryAction::Add => {
                        controller.add_draggable(id);
                        Vec::new()
                    }
                    RegistryAction::Remove => controller.remove_draggable(id),
                    RegistryAction::Lock => controller.set_locked(id, true),
                    RegistryAction::Unlock => controller.set_locked(id, false),
                };
                debug!(step, node = %node, ?action, "registry step");
                notices.extend(emitted.into_iter().map(|n| name_notice(&graph, step, n)));
            }
            Step::Control { control } => match control {
                ControlAction::Enable | ControlAction::Disable => {
                    let emitted = controller.set_enabled(matches!(control, ControlAction::Enable));
                    notices.extend(emitted.into_iter().map(|n| name_notice(&graph, step, n)));
                }
                ControlAction::Dispose => controller.dispose(),
            },
        }
    }

    let positions = names
        .iter()
        .map(|(name, &id)| Ok((name.clone(), graph.position(id)?)))
        .collect::<scenegrab_base::Result<BTreeMap<_, _>>>()?;

    info!(
        steps = script.steps.len(),
        notices = notices.len(),
        mode = ?controller.mode(),
        "replay finished"
    );
    Ok(ReplayReport {
        mode: controller.mode(),
        cursor: controller.feedback(),
        target: controller.target().map(|id| node_name(&graph, id)),
        hovered: controller.hovered().map(|id| node_name(&graph, id)),
        orbit_enabled: controller.orbit().enabled(),
        positions,
        notices,
    })
}

pub fn pick(scene: &SceneDescription, x: f32, y: f32) -> Result<PickReport> {
    let built = scene.build().context("build scene")?;
    built.camera.validate().context("scene camera")?;

    let ndc = to_ndc(Point2::new(x, y), built.viewport);
    let mut report = PickReport {
        ndc,
        hits: Vec::new(),
        target: None,
        draggable: false,
    };
    let Some(ndc) = ndc else {
        return Ok(report);
    };

    let ray = built.camera.ray_from_ndc(ndc);
    let graph = &built.graph;
    let hits: Vec<_> = Raycaster::from_camera(&built.camera)
        .intersect(graph, &ray, graph.children(graph.root()), true)
        .collect();

    if let Some(nearest) = hits.first() {
        let target = resolve_target(graph, nearest.node);
        report.draggable = built.draggable.contains(&target);
        report.target = Some(node_name(graph, target));
    }
    report.hits = hits
        .into_iter()
        .map(|hit| PickHit {
            node: node_name(graph, hit.node),
            point: hit.point,
            distance: hit.distance,
        })
        .collect();
    Ok(report)
}

fn node_name(graph: &SceneGraph, id: NodeId) -> String {
    graph
        .node(id)
        .map(|node| node.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn name_notice(graph: &SceneGraph, step: usize, notice: DragNotice) -> NamedNotice {
    let (kind, node, position) = match notice {
        DragNotice::HoverOn { node } => ("hover_on", node, None),
        DragNotice::HoverOff { node } => ("hover_off", node, None),
        DragNotice::DragStart { node } => ("drag_start", node, None),
        DragNotice::Drag { node, position } => ("drag", node, Some(position)),
        DragNotice::DragEnd { node } => ("drag_end", node, None),
    };
    NamedNotice {
        step,
        notice: kind,
        node: node_name(graph, node),
        position,
    }
}
