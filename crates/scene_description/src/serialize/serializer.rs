//! Scene to document conversion

use super::document::{Document, Node};
use crate::plugin::Plugin;
use crate::scene::{NameScope, Scene, SceneError};
use crate::value::{Ref, Rgb, Value};

/// Convert a scene into its document
///
/// Keys come out as `type`, `integrator`, then `sensor` for a single sensor
/// or `sensors` (a list, in insertion order) for several, then every shape,
/// emitter, medium and asset under its name, and finally `id` when the scene
/// has one. Fails without producing a partial document when a reference does
/// not resolve or a transform is singular.
pub fn serialize(scene: &Scene) -> Result<Document, SceneError> {
    let mut doc = Document::new();
    doc.insert("type", "scene");
    doc.insert("integrator", serialize_plugin(scene.integrator(), scene)?);

    match scene.sensors() {
        [sensor] => doc.insert("sensor", serialize_plugin(sensor, scene)?),
        sensors => {
            let list = sensors
                .iter()
                .map(|sensor| serialize_plugin(sensor, scene).map(Node::Map))
                .collect::<Result<Vec<_>, _>>()?;
            doc.insert("sensors", list);
        }
    }

    for (name, plugin) in scene.named_entries() {
        doc.insert(name, serialize_plugin(plugin, scene)?);
    }

    if let Some(id) = scene.id() {
        doc.insert("id", id);
    }

    log::debug!("Serialized scene into {} top-level keys", doc.len());
    Ok(doc)
}

/// Convert one plugin into its document, resolving references in `scope`
pub fn serialize_plugin(plugin: &Plugin, scope: &dyn NameScope) -> Result<Document, SceneError> {
    let mut doc = Document::new();
    doc.insert("type", plugin.type_id());
    if let Some(id) = plugin.id() {
        doc.insert("id", id);
    }
    for (name, value) in plugin.parameters() {
        doc.insert(name.as_str(), serialize_value(value, scope)?);
    }
    Ok(doc)
}

/// Convert one parameter value
pub fn serialize_value(value: &Value, scope: &dyn NameScope) -> Result<Node, SceneError> {
    Ok(match value {
        Value::Bool(v) => Node::Bool(*v),
        Value::Int(v) => Node::Int(*v),
        Value::Float(v) => Node::Float(*v),
        Value::String(v) => Node::String(v.clone()),
        Value::Rgb(rgb) => Node::Map(rgb_document(*rgb)),
        Value::Plugin(plugin) => Node::Map(serialize_plugin(plugin, scope)?),
        Value::Ref(reference) => {
            scope.require(reference)?;
            Node::Map(ref_document(reference))
        }
        Value::Transform(transform) => Node::Transform(transform.to_document()?),
        Value::List(items) => Node::List(
            items
                .iter()
                .map(|item| serialize_value(item, scope))
                .collect::<Result<_, _>>()?,
        ),
        Value::Map(entries) => {
            let mut doc = Document::new();
            for (key, item) in entries {
                doc.insert(key.as_str(), serialize_value(item, scope)?);
            }
            Node::Map(doc)
        }
    })
}

fn rgb_document(rgb: Rgb) -> Document {
    let mut doc = Document::new();
    doc.insert("type", Rgb::TYPE_TAG);
    doc.insert("value", rgb.values().map(Node::Float).to_vec());
    doc
}

fn ref_document(reference: &Ref) -> Document {
    let mut doc = Document::new();
    doc.insert("type", Ref::TYPE_TAG);
    doc.insert("id", reference.name());
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginBuilder;
    use crate::schema::{Category, SchemaRegistry};
    use crate::transform::Transform;
    use indexmap::IndexMap;

    const NO_NAMES: &[&str; 0] = &[];

    #[test]
    fn test_plugin_type_and_id_lead() {
        let plugin = PluginBuilder::new(Category::Bsdf, "diffuse")
            .id("red")
            .param("reflectance", Rgb::new(0.8, 0.2, 0.2))
            .build_with(&SchemaRegistry::builtin())
            .unwrap();
        let doc = serialize_plugin(&plugin, NO_NAMES).unwrap();

        assert_eq!(doc.keys().collect::<Vec<_>>(), ["type", "id", "reflectance"]);
        assert_eq!(doc.get("type").and_then(Node::as_str), Some("diffuse"));
        let reflectance = doc.get("reflectance").and_then(Node::as_map).unwrap();
        assert_eq!(reflectance.get("type").and_then(Node::as_str), Some("rgb"));
        assert_eq!(
            reflectance.get("value"),
            Some(&Node::List(vec![Node::Float(0.8), Node::Float(0.2), Node::Float(0.2)]))
        );
    }

    #[test]
    fn test_relaxed_parameters_keep_type_tag() {
        let plugin = PluginBuilder::new(Category::Shape, "sphere")
            .id("ball")
            .param("flavor", "lemon")
            .relaxed()
            .build_with(&SchemaRegistry::builtin())
            .unwrap();
        let doc = serialize_plugin(&plugin, NO_NAMES).unwrap();

        assert_eq!(doc.keys().collect::<Vec<_>>(), ["type", "id", "flavor"]);
        assert_eq!(doc.get("type").and_then(Node::as_str), Some(plugin.type_id()));
        assert_eq!(doc.get("id").and_then(Node::as_str), Some("ball"));
    }

    #[test]
    fn test_references_resolve_against_scope() {
        let plugin = PluginBuilder::new(Category::Shape, "sphere")
            .param("bsdf", Ref::new("mat"))
            .build_with(&SchemaRegistry::builtin())
            .unwrap();

        assert_eq!(
            serialize_plugin(&plugin, NO_NAMES).unwrap_err(),
            SceneError::UnresolvedReference("mat".into())
        );

        let doc = serialize_plugin(&plugin, &["mat"]).unwrap();
        let bsdf = doc.get("bsdf").and_then(Node::as_map).unwrap();
        assert_eq!(bsdf.get("type").and_then(Node::as_str), Some("ref"));
        assert_eq!(bsdf.get("id").and_then(Node::as_str), Some("mat"));
    }

    #[test]
    fn test_nested_collections_recurse() {
        let mut entries = IndexMap::new();
        entries.insert("tint".to_string(), Value::from(Rgb::gray(0.5)));
        entries.insert("source".to_string(), Value::from(Ref::new("missing")));
        let value = Value::List(vec![Value::Int(1), Value::Map(entries)]);

        assert_eq!(
            serialize_value(&value, NO_NAMES).unwrap_err(),
            SceneError::UnresolvedReference("missing".into())
        );
        let node = serialize_value(&value, &["missing"]).unwrap();
        let items = node.as_list().unwrap();
        assert_eq!(items[0], Node::Int(1));
        let map = items[1].as_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["tint", "source"]);
    }

    #[test]
    fn test_singular_transform_fails() {
        let value = Value::from(Transform::new().scale(1.0, 0.0, 1.0));
        assert!(matches!(
            serialize_value(&value, NO_NAMES),
            Err(SceneError::Transform(_))
        ));
    }
}
