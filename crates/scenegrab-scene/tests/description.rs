use anyhow::Result;
use scenegrab_geometry::{Point2, Vec3};
use scenegrab_scene::{MetaValue, NodeKind, Raycaster, SceneDescription};

const SCENE: &str = r#"{
  "camera": { "position": [0.0, 0.0, 10.0], "target": [0.0, 0.0, 0.0] },
  "viewport": { "width": 400.0, "height": 400.0 },
  "nodes": [
    {
      "name": "robot",
      "position": [1.0, 0.0, 0.0],
      "draggable": true,
      "metadata": { "label": "Robot", "locked": false },
      "children": [
        { "name": "torso", "shape": { "type": "box", "size": [1.0, 1.0, 1.0] } }
      ]
    },
    { "name": "floor", "shape": { "type": "triangles", "vertices": [
        [[-5.0, -2.0, -5.0], [5.0, -2.0, -5.0], [0.0, -2.0, 5.0]]
    ] } }
  ]
}"#;

#[test]
fn builds_tree_from_json() -> Result<()> {
    let desc: SceneDescription = serde_json::from_str(SCENE)?;
    let built = desc.build()?;

    let robot = built.names["robot"];
    let torso = built.names["torso"];
    assert_eq!(built.draggable, vec![robot]);
    assert_eq!(built.graph.parent(torso), Some(robot));
    assert!(matches!(built.graph.node(robot).map(|n| n.kind()), Some(NodeKind::Group)));
    assert_eq!(
        built.graph.node(robot).and_then(|n| n.metadata.get("label")),
        Some(&MetaValue::Text("Robot".to_string()))
    );
    assert_eq!(built.graph.world_position(torso)?, Vec3::new(1.0, 0.0, 0.0));
    assert!((built.camera.aspect - 1.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn built_scene_is_pickable() -> Result<()> {
    let desc: SceneDescription = serde_json::from_str(SCENE)?;
    let built = desc.build()?;
    let robot = built.names["robot"];
    let torso = built.names["torso"];

    // Straight down the view axis at x = 1 where the torso sits.
    let ray = scenegrab_geometry::Ray::new(Vec3::new(1.0, 0.0, 10.0), -Vec3::Z);
    let hit = Raycaster::from_camera(&built.camera)
        .intersect(&built.graph, &ray, &[robot], true)
        .next();
    assert_eq!(hit.map(|h| h.node), Some(torso));

    let centre = built.camera.ray_from_ndc(Point2::new(0.0, 0.0));
    assert!(centre.dir.abs_diff_eq(-Vec3::Z, 1e-12));
    Ok(())
}

#[test]
fn duplicate_names_are_rejected() -> Result<()> {
    let desc: SceneDescription = serde_json::from_str(
        r#"{ "nodes": [ { "name": "a" }, { "name": "a" } ] }"#,
    )?;
    assert!(desc.build().is_err());
    Ok(())
}
