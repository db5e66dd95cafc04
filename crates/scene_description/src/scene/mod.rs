//! Scene graph
//!
//! A [`Scene`] owns exactly one integrator, one or more sensors, and named
//! collections of shapes, emitters, media and shared assets. Plugins inside
//! the scene point at named entries through [`Ref`]s; a reference is only
//! checked when the scene is serialized, so assets added later still count.
//! [`SceneBuilder`] checks references eagerly when it builds.

mod builder;
mod scope;

pub use builder::SceneBuilder;
pub use scope::NameScope;

use indexmap::IndexMap;

use crate::plugin::Plugin;
use crate::schema::Category;
use crate::transform::TransformError;
use crate::value::{Ref, Value};

/// Top-level document keys that asset names may not take
pub const RESERVED_NAMES: [&str; 5] = ["type", "id", "integrator", "sensor", "sensors"];

/// Scene construction and serialization errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A reference names no entry of the scene's collections
    #[error("Unresolved reference to '{0}'")]
    UnresolvedReference(String),

    /// The builder was never given an integrator
    #[error("Scene has no integrator")]
    MissingIntegrator,

    /// No sensor was given
    #[error("Scene needs at least one sensor")]
    EmptySensorList,

    /// A plugin was placed in a slot of another category
    #[error("{slot} expects a {expected} plugin, got {found}")]
    CategoryMismatch {
        /// Slot the plugin was placed in, e.g. `"shape 'ball'"`
        slot: String,
        /// Category the slot holds
        expected: Category,
        /// Category of the plugin
        found: Category,
    },

    /// An asset name is already taken or reserved
    #[error("Asset name '{0}' is already in use")]
    DuplicateName(String),

    /// A transform could not be written out
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}

/// Renderer scene description
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    integrator: Plugin,
    sensors: Vec<Plugin>,
    shapes: IndexMap<String, Plugin>,
    emitters: IndexMap<String, Plugin>,
    media: IndexMap<String, Plugin>,
    assets: IndexMap<String, Plugin>,
    id: Option<String>,
}

impl Scene {
    /// Create a scene from its integrator and sensors
    pub fn new(integrator: Plugin, sensors: Vec<Plugin>) -> Result<Self, SceneError> {
        expect_category("integrator", &integrator, Category::Integrator)?;
        if sensors.is_empty() {
            return Err(SceneError::EmptySensorList);
        }
        for (index, sensor) in sensors.iter().enumerate() {
            expect_category(&format!("sensor {index}"), sensor, Category::Sensor)?;
        }

        Ok(Self {
            integrator,
            sensors,
            shapes: IndexMap::new(),
            emitters: IndexMap::new(),
            media: IndexMap::new(),
            assets: IndexMap::new(),
            id: None,
        })
    }

    /// Set the scene id, emitted as the last document key
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a named shape
    pub fn insert_shape(&mut self, name: impl Into<String>, shape: Plugin) -> Result<(), SceneError> {
        let name = name.into();
        expect_category(&format!("shape '{name}'"), &shape, Category::Shape)?;
        self.claim_name(&name)?;
        self.shapes.insert(name, shape);
        Ok(())
    }

    /// Add a named emitter
    pub fn insert_emitter(&mut self, name: impl Into<String>, emitter: Plugin) -> Result<(), SceneError> {
        let name = name.into();
        expect_category(&format!("emitter '{name}'"), &emitter, Category::Emitter)?;
        self.claim_name(&name)?;
        self.emitters.insert(name, emitter);
        Ok(())
    }

    /// Add a named participating medium
    pub fn insert_medium(&mut self, name: impl Into<String>, medium: Plugin) -> Result<(), SceneError> {
        let name = name.into();
        expect_category(&format!("medium '{name}'"), &medium, Category::Medium)?;
        self.claim_name(&name)?;
        self.media.insert(name, medium);
        Ok(())
    }

    /// Add a named asset of any category
    pub fn insert_asset(&mut self, name: impl Into<String>, asset: Plugin) -> Result<(), SceneError> {
        let name = name.into();
        self.claim_name(&name)?;
        self.assets.insert(name, asset);
        Ok(())
    }

    /// Store a shared asset and return a reference to it
    ///
    /// The asset is stored under its own id, or under `asset_<n>` (counting
    /// from 1 over the assets stored so far) when it has none. The stored
    /// plugin always carries the name it was stored under.
    pub fn add_asset(&mut self, asset: Plugin) -> Result<Ref, SceneError> {
        let name = asset
            .id()
            .map_or_else(|| format!("asset_{}", self.assets.len() + 1), str::to_string);
        self.insert_asset(name.clone(), asset.with_id(name.clone()))?;
        Ok(Ref::new(name))
    }

    /// The integrator
    pub const fn integrator(&self) -> &Plugin {
        &self.integrator
    }

    /// Sensors in insertion order
    pub fn sensors(&self) -> &[Plugin] {
        &self.sensors
    }

    /// Named shapes
    pub const fn shapes(&self) -> &IndexMap<String, Plugin> {
        &self.shapes
    }

    /// Named emitters
    pub const fn emitters(&self) -> &IndexMap<String, Plugin> {
        &self.emitters
    }

    /// Named media
    pub const fn media(&self) -> &IndexMap<String, Plugin> {
        &self.media
    }

    /// Named shared assets
    pub const fn assets(&self) -> &IndexMap<String, Plugin> {
        &self.assets
    }

    /// Scene id
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Find a named entry in any collection
    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.named_collections()
            .into_iter()
            .find_map(|collection| collection.get(name))
    }

    /// Named entries of every collection, in document order
    pub fn named_entries(&self) -> impl Iterator<Item = (&str, &Plugin)> {
        self.named_collections()
            .into_iter()
            .flat_map(|collection| collection.iter().map(|(name, plugin)| (name.as_str(), plugin)))
    }

    /// Check that every reference in the scene resolves
    pub fn check_references(&self) -> Result<(), SceneError> {
        std::iter::once(&self.integrator)
            .chain(&self.sensors)
            .chain(self.named_entries().map(|(_, plugin)| plugin))
            .try_for_each(|plugin| check_plugin_refs(plugin, self))
    }

    const fn named_collections(&self) -> [&IndexMap<String, Plugin>; 4] {
        [&self.shapes, &self.emitters, &self.media, &self.assets]
    }

    fn claim_name(&self, name: &str) -> Result<(), SceneError> {
        if RESERVED_NAMES.contains(&name) || self.get(name).is_some() {
            return Err(SceneError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}

fn expect_category(slot: &str, plugin: &Plugin, expected: Category) -> Result<(), SceneError> {
    if plugin.category() == expected {
        Ok(())
    } else {
        Err(SceneError::CategoryMismatch {
            slot: slot.to_string(),
            expected,
            found: plugin.category(),
        })
    }
}

fn check_plugin_refs(plugin: &Plugin, scope: &dyn NameScope) -> Result<(), SceneError> {
    plugin
        .parameters()
        .values()
        .try_for_each(|value| check_value_refs(value, scope))
}

fn check_value_refs(value: &Value, scope: &dyn NameScope) -> Result<(), SceneError> {
    match value {
        Value::Ref(r) => scope.require(r),
        Value::Plugin(p) => check_plugin_refs(p, scope),
        Value::List(items) => items.iter().try_for_each(|v| check_value_refs(v, scope)),
        Value::Map(entries) => entries.values().try_for_each(|v| check_value_refs(v, scope)),
        _ => Ok(()),
    }
}
