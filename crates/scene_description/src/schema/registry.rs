//! Schema registry
//!
//! Holds every known plugin schema, grouped by category. A registry is built
//! once at startup and only read afterwards; the process-wide instance lives
//! in a `OnceLock` so plugin construction never needs a registry argument.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::builtin::{builtin_schemas, BUILTIN_ENGINE_VERSION};
use super::version::{resolve_engine_version, EnvVersionProbe, VersionProbe};
use super::{Category, ParamKind, ParamSchema, PluginSchema, SchemaError, ValidationMode};
use crate::config::Config;
use crate::core::SceneConfig;

static GLOBAL_REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

/// Plugins of one category inside a [`SchemaFile`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySchemas {
    /// Category shared by all plugins below
    pub category: Category,
    /// Plugin schemas
    #[serde(default)]
    pub plugins: Vec<PluginSchema>,
}

/// On-disk schema, pinned to one engine version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Engine version the schema was generated from
    pub engine_version: String,
    /// Plugin schemas per category
    #[serde(default)]
    pub categories: Vec<CategorySchemas>,
}

impl Config for SchemaFile {}

/// Lookup table from category and type identifier to plugin schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRegistry {
    engine_version: String,
    plugins: BTreeMap<Category, IndexMap<String, PluginSchema>>,
    validation: ValidationMode,
    fill_defaults: bool,
}

impl SchemaRegistry {
    /// Create an empty registry for an engine version
    pub fn new(engine_version: impl Into<String>) -> Self {
        Self {
            engine_version: engine_version.into(),
            plugins: BTreeMap::new(),
            validation: ValidationMode::Strict,
            fill_defaults: false,
        }
    }

    /// Registry populated with the built-in fallback schema
    pub fn builtin() -> Self {
        let mut registry = Self::new(BUILTIN_ENGINE_VERSION);
        for (category, schema) in builtin_schemas() {
            // The built-in table has no duplicates, see the tests below
            if let Err(e) = registry.insert(category, schema) {
                log::error!("Built-in schema table is inconsistent: {e}");
            }
        }
        registry
    }

    /// Registry built from a parsed schema file
    pub fn from_schema_file(file: SchemaFile) -> Result<Self, SchemaError> {
        let mut registry = Self::new(file.engine_version);
        for group in file.categories {
            for schema in group.plugins {
                registry.insert(group.category, schema)?;
            }
        }
        Ok(registry)
    }

    /// Load a `.toml` or `.ron` schema file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let registry = Self::from_schema_file(SchemaFile::load_from_file(path)?)?;
        log::info!(
            "Loaded {} plugin schemas for engine {} from {}",
            registry.len(),
            registry.engine_version,
            path.display()
        );
        Ok(registry)
    }

    /// Select the registry described by a configuration
    ///
    /// The engine version is resolved from the configuration override, then
    /// the `MITSUBA_VERSION` environment variable, then the built-in version.
    pub fn from_config(config: &SceneConfig) -> Result<Self, SchemaError> {
        Self::from_config_with_probe(config, &EnvVersionProbe)
    }

    /// Same as [`from_config`](Self::from_config) with a custom version probe
    pub fn from_config_with_probe(
        config: &SceneConfig,
        probe: &dyn VersionProbe,
    ) -> Result<Self, SchemaError> {
        let resolved = resolve_engine_version(config.engine_version.as_deref(), probe);

        let schema_path = config
            .schema_dir
            .as_deref()
            .and_then(|dir| find_schema_file(dir, &resolved.version));

        let registry = match schema_path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                if resolved.version != BUILTIN_ENGINE_VERSION {
                    log::warn!(
                        "No schema file for engine {} ({:?}), using built-in schema {}",
                        resolved.version,
                        resolved.source,
                        BUILTIN_ENGINE_VERSION
                    );
                }
                Self::builtin()
            }
        };

        Ok(registry
            .with_validation(config.validation)
            .with_fill_defaults(config.fill_defaults))
    }

    /// Set the validation mode applied by plugin builders
    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Enable or disable default filling
    pub fn with_fill_defaults(mut self, enabled: bool) -> Self {
        self.fill_defaults = enabled;
        self
    }

    /// Register a plugin schema
    ///
    /// Shapes get an optional nested `bsdf` parameter when they do not
    /// declare one.
    pub fn insert(&mut self, category: Category, mut schema: PluginSchema) -> Result<(), SchemaError> {
        if category == Category::Shape && schema.param("bsdf").is_none() {
            schema
                .params
                .push(ParamSchema::optional("bsdf", ParamKind::Plugin(Category::Bsdf)));
        }

        let entries = self.plugins.entry(category).or_default();
        if entries.contains_key(&schema.type_id) {
            return Err(SchemaError::DuplicatePlugin {
                category,
                type_id: schema.type_id,
            });
        }
        entries.insert(schema.type_id.clone(), schema);
        Ok(())
    }

    /// Look up a plugin schema
    pub fn lookup(&self, category: Category, type_id: &str) -> Option<&PluginSchema> {
        self.plugins.get(&category)?.get(type_id)
    }

    /// Iterate the schemas of one category in registration order
    pub fn plugins(&self, category: Category) -> impl Iterator<Item = &PluginSchema> {
        self.plugins.get(&category).into_iter().flat_map(IndexMap::values)
    }

    /// Total number of plugin schemas
    pub fn len(&self) -> usize {
        self.plugins.values().map(IndexMap::len).sum()
    }

    /// True when no schema is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Engine version this registry describes
    pub fn engine_version(&self) -> &str {
        &self.engine_version
    }

    /// Validation mode applied by plugin builders
    pub const fn validation(&self) -> ValidationMode {
        self.validation
    }

    /// Whether declared defaults are filled in
    pub const fn fill_defaults(&self) -> bool {
        self.fill_defaults
    }

    /// Export the registry in schema file form
    pub fn to_schema_file(&self) -> SchemaFile {
        SchemaFile {
            engine_version: self.engine_version.clone(),
            categories: self
                .plugins
                .iter()
                .map(|(category, plugins)| CategorySchemas {
                    category: *category,
                    plugins: plugins.values().cloned().collect(),
                })
                .collect(),
        }
    }

    /// Install this registry as the process-wide one
    ///
    /// Must happen before the first call to [`global`](Self::global).
    pub fn install(self) -> Result<(), SchemaError> {
        let version = self.engine_version.clone();
        GLOBAL_REGISTRY
            .set(self)
            .map_err(|_| SchemaError::AlreadyInstalled)?;
        log::debug!("Installed schema registry for engine {version}");
        Ok(())
    }

    /// The process-wide registry, the built-in one unless another was installed
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(Self::builtin)
    }
}

fn find_schema_file(dir: &Path, version: &str) -> Option<PathBuf> {
    ["toml", "ron"]
        .iter()
        .map(|ext| dir.join(format!("mitsuba-{version}.{ext}")))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use crate::schema::{DefaultValue, VersionSource};

    struct FixedProbe(Option<&'static str>);

    impl VersionProbe for FixedProbe {
        fn installed_version(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_builtin_covers_every_category() {
        let registry = SchemaRegistry::builtin();
        for category in Category::ALL {
            assert!(
                registry.plugins(category).next().is_some(),
                "no built-in plugin for {category}"
            );
        }
        assert_eq!(registry.engine_version(), BUILTIN_ENGINE_VERSION);
    }

    #[test]
    fn test_builtin_table_has_no_duplicates() {
        let mut registry = SchemaRegistry::new("test");
        for (category, schema) in builtin_schemas() {
            registry.insert(category, schema).unwrap();
        }
        assert_eq!(registry.len(), SchemaRegistry::builtin().len());
    }

    #[test]
    fn test_shapes_get_bsdf_parameter() {
        let mut registry = SchemaRegistry::new("test");
        registry
            .insert(Category::Shape, PluginSchema::new("blob", "Blob"))
            .unwrap();
        registry
            .insert(Category::Emitter, PluginSchema::new("spot", "Spot"))
            .unwrap();

        let blob = registry.lookup(Category::Shape, "blob").unwrap();
        assert_eq!(blob.param("bsdf").unwrap().kind, ParamKind::Plugin(Category::Bsdf));
        assert!(registry.lookup(Category::Emitter, "spot").unwrap().param("bsdf").is_none());
    }

    #[test]
    fn test_duplicate_plugin_rejected() {
        let mut registry = SchemaRegistry::new("test");
        registry.insert(Category::Film, PluginSchema::new("hdrfilm", "")).unwrap();
        let err = registry
            .insert(Category::Film, PluginSchema::new("hdrfilm", ""))
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicatePlugin { category: Category::Film, .. }));
    }

    #[test]
    fn test_lookup_is_per_category() {
        let registry = SchemaRegistry::builtin();
        assert!(registry.lookup(Category::Shape, "sphere").is_some());
        assert!(registry.lookup(Category::Bsdf, "sphere").is_none());
    }

    #[test]
    fn test_schema_file_roundtrip_toml_and_ron() {
        let registry = SchemaRegistry::builtin();
        for format in [ConfigFormat::Toml, ConfigFormat::Ron] {
            let text = registry.to_schema_file().to_string_as(format).unwrap();
            let parsed = SchemaFile::from_str_as(&text, format).unwrap();
            assert_eq!(SchemaRegistry::from_schema_file(parsed).unwrap(), registry);
        }
    }

    #[test]
    fn test_schema_file_from_handwritten_toml() {
        let text = r#"
engine_version = "9.9.9"

[[categories]]
category = "bsdf"

[[categories.plugins]]
type_id = "velvet"
title = "Velvet"

[[categories.plugins.params]]
name = "sheen"
kind = "float"
default = 0.25

[[categories.plugins.params]]
name = "base"
kind = { plugin = "texture" }
required = true
"#;
        let file = SchemaFile::from_str_as(text, ConfigFormat::Toml).unwrap();
        let registry = SchemaRegistry::from_schema_file(file).unwrap();
        let velvet = registry.lookup(Category::Bsdf, "velvet").unwrap();

        assert_eq!(registry.engine_version(), "9.9.9");
        assert_eq!(velvet.param("sheen").unwrap().default, Some(DefaultValue::Float(0.25)));
        let base = velvet.param("base").unwrap();
        assert!(base.required);
        assert_eq!(base.kind, ParamKind::Plugin(Category::Texture));
    }

    #[test]
    fn test_from_config_prefers_schema_file_for_resolved_version() {
        let dir = std::env::temp_dir().join(format!("scene_description_schema_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut file = SchemaRegistry::builtin().to_schema_file();
        file.engine_version = "3.0.0".to_string();
        file.save_to_file(dir.join("mitsuba-3.0.0.ron")).unwrap();

        let config = SceneConfig::new()
            .with_schema_dir(&dir)
            .with_validation(ValidationMode::Relaxed);
        let registry = SchemaRegistry::from_config_with_probe(&config, &FixedProbe(Some("3.0.0"))).unwrap();
        assert_eq!(registry.engine_version(), "3.0.0");
        assert_eq!(registry.validation(), ValidationMode::Relaxed);

        // Unknown version falls back to the built-in table
        let registry = SchemaRegistry::from_config_with_probe(&config, &FixedProbe(Some("1.0.0"))).unwrap();
        assert_eq!(registry.engine_version(), BUILTIN_ENGINE_VERSION);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_from_config_override_beats_probe() {
        let config = SceneConfig::new().with_engine_version(BUILTIN_ENGINE_VERSION);
        let resolved = resolve_engine_version(config.engine_version.as_deref(), &FixedProbe(Some("2.0.0")));
        assert_eq!(resolved.source, VersionSource::Override);
        assert!(SchemaRegistry::from_config_with_probe(&config, &FixedProbe(Some("2.0.0"))).is_ok());
    }

    #[test]
    fn test_global_registry_defaults_to_builtin() {
        // Other tests never install a registry, so the lazy default wins
        let global = SchemaRegistry::global();
        assert!(global.lookup(Category::Integrator, "path").is_some());
        assert!(matches!(
            SchemaRegistry::new("late").install(),
            Err(SchemaError::AlreadyInstalled)
        ));
    }
}
