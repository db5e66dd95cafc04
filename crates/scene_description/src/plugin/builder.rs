//! Plugin builder
//!
//! Collects a type identifier and parameters, then checks everything against
//! the schema registry in one go when [`PluginBuilder::build`] is called.

use indexmap::IndexMap;

use super::{Plugin, PluginError, RESERVED_PARAMS};
use crate::schema::{Category, SchemaRegistry, ValidationMode};
use crate::value::Value;

/// Builder for [`Plugin`]s
///
/// ```
/// use scene_description::plugin::PluginBuilder;
/// use scene_description::schema::Category;
/// use scene_description::value::Rgb;
///
/// let bsdf = PluginBuilder::new(Category::Bsdf, "diffuse")
///     .param("reflectance", Rgb::new(0.8, 0.2, 0.2))
///     .build()
///     .unwrap();
/// assert_eq!(bsdf.type_id(), "diffuse");
/// ```
#[derive(Debug, Clone)]
pub struct PluginBuilder {
    category: Category,
    type_id: String,
    id: Option<String>,
    parameters: IndexMap<String, Value>,
    validation: Option<ValidationMode>,
}

impl PluginBuilder {
    /// Start a plugin of the given category and type
    pub fn new(category: Category, type_id: impl Into<String>) -> Self {
        Self {
            category,
            type_id: type_id.into(),
            id: None,
            parameters: IndexMap::new(),
            validation: None,
        }
    }

    /// Set the plugin id
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a parameter, replacing an earlier value of the same name in place
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Let undeclared parameters through, whatever the registry says
    #[must_use]
    pub fn relaxed(mut self) -> Self {
        self.validation = Some(ValidationMode::Relaxed);
        self
    }

    /// Reject undeclared parameters, whatever the registry says
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.validation = Some(ValidationMode::Strict);
        self
    }

    /// Category of the plugin being built
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Validate against the process-wide registry
    pub fn build(self) -> Result<Plugin, PluginError> {
        self.build_with(SchemaRegistry::global())
    }

    /// Validate against `registry`
    pub fn build_with(self, registry: &SchemaRegistry) -> Result<Plugin, PluginError> {
        let Self {
            category,
            type_id,
            id,
            mut parameters,
            validation,
        } = self;

        let Some(schema) = registry.lookup(category, &type_id) else {
            return Err(PluginError::UnknownPluginType { category, type_id });
        };
        let mode = validation.unwrap_or_else(|| registry.validation());

        if let Some(name) = parameters.keys().find(|name| RESERVED_PARAMS.contains(&name.as_str())) {
            return Err(PluginError::ReservedParameter {
                type_id,
                param: name.clone(),
            });
        }

        for (name, value) in &parameters {
            match schema.param(name) {
                Some(declared) if !declared.kind.accepts(value) => {
                    return Err(PluginError::InvalidParameterType {
                        type_id,
                        param: name.clone(),
                        expected: declared.kind,
                        found: value.kind_name(),
                    });
                }
                Some(_) => {}
                None if mode == ValidationMode::Strict => {
                    return Err(PluginError::UnknownParameter {
                        type_id,
                        param: name.clone(),
                    });
                }
                None => log::trace!("Passing undeclared parameter '{name}' of '{type_id}' through"),
            }
        }

        if let Some(missing) = schema
            .params
            .iter()
            .find(|p| p.required && !parameters.contains_key(&p.name))
        {
            return Err(PluginError::MissingRequiredParameter {
                type_id,
                param: missing.name.clone(),
            });
        }

        if registry.fill_defaults() {
            for declared in &schema.params {
                if let Some(default) = &declared.default {
                    if !parameters.contains_key(&declared.name) {
                        parameters.insert(declared.name.clone(), Value::from(default));
                    }
                }
            }
        }

        Ok(Plugin::from_parts(category, type_id, id, parameters))
    }
}
