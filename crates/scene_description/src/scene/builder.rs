//! Fluent scene builder

use super::{Scene, SceneError};
use crate::plugin::Plugin;

#[derive(Debug, Clone)]
enum AssetEntry {
    Named(String, Plugin),
    Auto(Plugin),
}

/// Builder for [`Scene`]s
///
/// Every call consumes and returns the builder. Nothing is checked until
/// [`build`](Self::build), which validates categories, names and references
/// all at once.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    integrator: Option<Plugin>,
    sensors: Vec<Plugin>,
    shapes: Vec<(String, Plugin)>,
    emitters: Vec<(String, Plugin)>,
    media: Vec<(String, Plugin)>,
    assets: Vec<AssetEntry>,
    id: Option<String>,
}

impl SceneBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integrator, replacing an earlier one
    #[must_use]
    pub fn integrator(mut self, integrator: Plugin) -> Self {
        self.integrator = Some(integrator);
        self
    }

    /// Append a sensor
    #[must_use]
    pub fn sensor(mut self, sensor: Plugin) -> Self {
        self.sensors.push(sensor);
        self
    }

    /// Add a named shape
    #[must_use]
    pub fn shape(mut self, name: impl Into<String>, shape: Plugin) -> Self {
        self.shapes.push((name.into(), shape));
        self
    }

    /// Add a named emitter
    #[must_use]
    pub fn emitter(mut self, name: impl Into<String>, emitter: Plugin) -> Self {
        self.emitters.push((name.into(), emitter));
        self
    }

    /// Add a named medium
    #[must_use]
    pub fn medium(mut self, name: impl Into<String>, medium: Plugin) -> Self {
        self.media.push((name.into(), medium));
        self
    }

    /// Add a shared asset named by its id, or `asset_<n>` without one
    #[must_use]
    pub fn asset(mut self, asset: Plugin) -> Self {
        self.assets.push(AssetEntry::Auto(asset));
        self
    }

    /// Add a shared asset under an explicit name
    #[must_use]
    pub fn named_asset(mut self, name: impl Into<String>, asset: Plugin) -> Self {
        self.assets.push(AssetEntry::Named(name.into(), asset));
        self
    }

    /// Set the scene id
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Validate and assemble the scene
    pub fn build(self) -> Result<Scene, SceneError> {
        let integrator = self.integrator.ok_or(SceneError::MissingIntegrator)?;
        let mut scene = Scene::new(integrator, self.sensors)?;

        for (name, shape) in self.shapes {
            scene.insert_shape(name, shape)?;
        }
        for (name, emitter) in self.emitters {
            scene.insert_emitter(name, emitter)?;
        }
        for (name, medium) in self.media {
            scene.insert_medium(name, medium)?;
        }
        for entry in self.assets {
            match entry {
                AssetEntry::Named(name, asset) => scene.insert_asset(name, asset)?,
                AssetEntry::Auto(asset) => {
                    scene.add_asset(asset)?;
                }
            }
        }
        if let Some(id) = self.id {
            scene = scene.with_id(id);
        }

        scene.check_references()?;
        log::debug!(
            "Built scene with {} sensor(s) and {} named entries",
            scene.sensors().len(),
            scene.named_entries().count()
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::catalog::{
        PathTracer, PerspectivePinholeCamera, SmoothDiffuseMaterial, Sphere,
    };
    use crate::schema::Category;
    use crate::value::Ref;

    fn camera() -> Plugin {
        PerspectivePinholeCamera::new().fov(45.0).build().unwrap()
    }

    fn integrator() -> Plugin {
        PathTracer::new().build().unwrap()
    }

    #[test]
    fn test_missing_integrator_and_sensors() {
        assert_eq!(
            SceneBuilder::new().sensor(camera()).build().unwrap_err(),
            SceneError::MissingIntegrator
        );
        assert_eq!(
            SceneBuilder::new().integrator(integrator()).build().unwrap_err(),
            SceneError::EmptySensorList
        );
    }

    #[test]
    fn test_build_checks_references_eagerly() {
        let ball = Sphere::new().bsdf(Ref::new("mat")).build().unwrap();
        let err = SceneBuilder::new()
            .integrator(integrator())
            .sensor(camera())
            .shape("ball", ball.clone())
            .build()
            .unwrap_err();
        assert_eq!(err, SceneError::UnresolvedReference("mat".into()));

        // Insertion order of the asset does not matter
        let scene = SceneBuilder::new()
            .integrator(integrator())
            .sensor(camera())
            .shape("ball", ball)
            .asset(SmoothDiffuseMaterial::new().id("mat").build().unwrap())
            .build()
            .unwrap();
        assert!(scene.get("mat").is_some());
    }

    #[test]
    fn test_assets_auto_named_in_order() {
        let scene = SceneBuilder::new()
            .integrator(integrator())
            .sensor(camera())
            .asset(SmoothDiffuseMaterial::new().build().unwrap())
            .named_asset("shared", SmoothDiffuseMaterial::new().build().unwrap())
            .asset(SmoothDiffuseMaterial::new().build().unwrap())
            .id("demo")
            .build()
            .unwrap();

        let names: Vec<&str> = scene.assets().keys().map(String::as_str).collect();
        assert_eq!(names, ["asset_1", "shared", "asset_3"]);
        assert_eq!(scene.id(), Some("demo"));
    }

    #[test]
    fn test_build_rejects_misplaced_plugins() {
        let err = SceneBuilder::new()
            .integrator(integrator())
            .sensor(camera())
            .emitter("ball", Sphere::new().build().unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::CategoryMismatch { expected: Category::Emitter, found: Category::Shape, .. }
        ));

        let err = SceneBuilder::new()
            .integrator(integrator())
            .sensor(camera())
            .shape("ball", Sphere::new().build().unwrap())
            .shape("ball", Sphere::new().build().unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, SceneError::DuplicateName("ball".into()));
    }
}
