//! Integration tests for scene assembly and document output
//!
//! Builds the reference scenes end to end through the typed catalog and
//! checks the emitted documents key by key.

use crate::plugin::catalog::{
    PathTracer, PerspectivePinholeCamera, PointLightSource, SmoothDiffuseMaterial, Sphere,
};
use crate::plugin::Plugin;
use crate::scene::{Scene, SceneBuilder, SceneError};
use crate::serialize::{serialize, serialize_plugin, Node};
use crate::transform::Transform;
use crate::value::{Ref, Rgb};
use approx::assert_relative_eq;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    fn red_ball() -> Plugin {
        let red = SmoothDiffuseMaterial::new()
            .reflectance(Rgb::new(0.8, 0.2, 0.2))
            .build()
            .unwrap();
        Sphere::new()
            .radius(1.0)
            .bsdf(red)
            .to_world(Transform::new().translate(0.0, 0.0, 3.0))
            .build()
            .unwrap()
    }

    fn camera(fov: f64) -> Plugin {
        let look = Transform::new()
            .look_at([0.0, 1.0, -6.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0])
            .unwrap();
        PerspectivePinholeCamera::new()
            .fov(fov)
            .to_world(look)
            .build()
            .unwrap()
    }

    fn reference_scene() -> Scene {
        let sun = PointLightSource::new()
            .to_world(Transform::new().translate(3.0, 4.0, 2.0))
            .intensity(Rgb::gray(3.0))
            .build()
            .unwrap();

        SceneBuilder::new()
            .integrator(PathTracer::new().build().unwrap())
            .sensor(camera(45.0))
            .shape("ball", red_ball())
            .emitter("sun", sun)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sphere_document_matches_reference() {
        let doc = serialize_plugin(&red_ball(), &[] as &[&str; 0]).unwrap();

        assert_eq!(doc.keys().collect::<Vec<_>>(), ["type", "radius", "bsdf", "to_world"]);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "type": "sphere",
                "radius": 1.0,
                "bsdf": {
                    "type": "diffuse",
                    "reflectance": {"type": "rgb", "value": [0.8, 0.2, 0.2]}
                },
                "to_world": {
                    "matrix": [
                        [1.0, 0.0, 0.0, 0.0],
                        [0.0, 1.0, 0.0, 0.0],
                        [0.0, 0.0, 1.0, 3.0],
                        [0.0, 0.0, 0.0, 1.0]
                    ],
                    "inverse_transpose": [
                        [1.0, 0.0, 0.0, 0.0],
                        [0.0, 1.0, 0.0, 0.0],
                        [0.0, 0.0, 1.0, 0.0],
                        [0.0, 0.0, -3.0, 1.0]
                    ]
                }
            })
        );
    }

    #[test]
    fn test_sphere_json_text_is_ordered() {
        let doc = serialize_plugin(&red_ball(), &[] as &[&str; 0]).unwrap();
        let text = doc.to_json_string().unwrap();
        assert!(text.starts_with(
            r#"{"type":"sphere","radius":1.0,"bsdf":{"type":"diffuse","reflectance":{"type":"rgb","value":[0.8,0.2,0.2]}},"to_world":{"matrix":"#
        ));
        assert!(text.ends_with(r#""inverse_transpose":[[1.0,0.0,0.0,0.0],[0.0,1.0,0.0,0.0],[0.0,0.0,1.0,0.0],[0.0,0.0,-3.0,1.0]]}}"#));
    }

    #[test]
    fn test_scene_key_order() {
        let doc = serialize(&reference_scene().with_id("minimal")).unwrap();
        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            ["type", "integrator", "sensor", "ball", "sun", "id"]
        );
        assert_eq!(doc.get("type").and_then(Node::as_str), Some("scene"));
        assert_eq!(doc.get("id").and_then(Node::as_str), Some("minimal"));

        let sensor = doc.get("sensor").and_then(Node::as_map).unwrap();
        assert_eq!(sensor.get("type").and_then(Node::as_str), Some("perspective"));
        let frame = sensor.get("to_world").and_then(Node::as_transform).unwrap();
        assert_relative_eq!(frame.matrix[1][3], 1.0);
        assert_relative_eq!(frame.matrix[2][3], -6.0);
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let scene = reference_scene();
        let first = serialize(&scene).unwrap();
        let second = serialize(&scene).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_json_string().unwrap(), second.to_json_string().unwrap());
    }

    #[test]
    fn test_sensor_key_depends_on_count() {
        let single = serialize(&reference_scene()).unwrap();
        assert!(single.get("sensor").and_then(Node::as_map).is_some());
        assert!(single.get("sensors").is_none());

        let scene = SceneBuilder::new()
            .integrator(PathTracer::new().build().unwrap())
            .sensor(camera(30.0))
            .sensor(camera(60.0))
            .build()
            .unwrap();
        let doc = serialize(&scene).unwrap();
        assert!(doc.get("sensor").is_none());

        let sensors = doc.get("sensors").and_then(Node::as_list).unwrap();
        let fovs: Vec<&Node> = sensors
            .iter()
            .filter_map(|s| s.as_map().and_then(|m| m.get("fov")))
            .collect();
        assert_eq!(fovs, [&Node::Float(30.0), &Node::Float(60.0)]);
    }

    #[test]
    fn test_unresolved_reference_fails_at_serialization() {
        // Plugin construction does not look at reference targets
        let ball = Sphere::new().bsdf(Ref::new("mat")).build().unwrap();

        let mut scene = Scene::new(PathTracer::new().build().unwrap(), vec![camera(45.0)]).unwrap();
        scene.insert_shape("ball", ball.clone()).unwrap();
        assert_eq!(
            serialize(&scene).unwrap_err(),
            SceneError::UnresolvedReference("mat".into())
        );

        // Assets added after the referencing shape still resolve
        let mat = scene
            .add_asset(SmoothDiffuseMaterial::new().id("mat").build().unwrap())
            .unwrap();
        assert_eq!(mat, Ref::new("mat"));
        let doc = serialize(&scene).unwrap();
        let bsdf = doc
            .get("ball")
            .and_then(Node::as_map)
            .and_then(|b| b.get("bsdf"))
            .and_then(Node::as_map)
            .unwrap();
        assert_eq!(bsdf.get("type").and_then(Node::as_str), Some("ref"));
        assert_eq!(bsdf.get("id").and_then(Node::as_str), Some("mat"));

        // The builder refuses the same graph up front
        let err = SceneBuilder::new()
            .integrator(PathTracer::new().build().unwrap())
            .sensor(camera(45.0))
            .shape("ball", ball)
            .build()
            .unwrap_err();
        assert_eq!(err, SceneError::UnresolvedReference("mat".into()));
    }

    #[test]
    fn test_shared_asset_document() {
        let mut scene = reference_scene();
        let shared = scene
            .add_asset(SmoothDiffuseMaterial::new().reflectance(0.5).build().unwrap())
            .unwrap();
        scene
            .insert_shape("second", Sphere::new().bsdf(shared).build().unwrap())
            .unwrap();

        let doc = serialize(&scene).unwrap();
        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            ["type", "integrator", "sensor", "ball", "second", "sun", "asset_1"]
        );
        let asset = doc.get("asset_1").and_then(Node::as_map).unwrap();
        assert_eq!(asset.keys().collect::<Vec<_>>(), ["type", "id", "reflectance"]);
        assert_eq!(asset.get("id").and_then(Node::as_str), Some("asset_1"));
    }

    #[test]
    fn test_ron_output() {
        let text = serialize(&reference_scene()).unwrap().to_ron_string().unwrap();
        assert!(text.contains("\"perspective\""));
        assert!(text.contains("inverse_transpose"));
    }
}
