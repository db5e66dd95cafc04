//! Plugins
//!
//! A [`Plugin`] is an immutable, schema-checked description of one renderer
//! component. Plugins are made by a [`PluginBuilder`] or by one of the typed
//! variants in [`catalog`], and are owned by whatever holds them: a scene
//! collection or the parameter of another plugin.

mod builder;
pub mod catalog;

pub use builder::PluginBuilder;

use indexmap::IndexMap;

use crate::schema::{Category, ParamKind};
use crate::value::Value;

/// Keys every plugin document starts with, unavailable as parameter names
pub const RESERVED_PARAMS: [&str; 2] = ["type", "id"];

/// A typed renderer component with its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Plugin {
    category: Category,
    type_id: String,
    id: Option<String>,
    parameters: IndexMap<String, Value>,
}

impl Plugin {
    /// Only [`PluginBuilder`] creates plugins, after validation
    pub(crate) fn from_parts(
        category: Category,
        type_id: String,
        id: Option<String>,
        parameters: IndexMap<String, Value>,
    ) -> Self {
        Self {
            category,
            type_id,
            id,
            parameters,
        }
    }

    /// Category of the plugin
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Type identifier, e.g. `"sphere"`
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Optional identifier, emitted right after the type
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Parameters in insertion order
    pub const fn parameters(&self) -> &IndexMap<String, Value> {
        &self.parameters
    }

    /// Single parameter value
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Copy of this plugin carrying `id`
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Plugin construction errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PluginError {
    /// The category has no plugin with this type identifier
    #[error("Unknown {category} plugin type: {type_id}")]
    UnknownPluginType {
        /// Requested category
        category: Category,
        /// Requested type identifier
        type_id: String,
    },

    /// A parameter value does not match its declared kind
    #[error("Parameter '{param}' of '{type_id}' expects {expected:?}, got {found}")]
    InvalidParameterType {
        /// Plugin type identifier
        type_id: String,
        /// Parameter name
        param: String,
        /// Declared kind
        expected: ParamKind,
        /// Variant name of the offending value
        found: &'static str,
    },

    /// A required parameter was not given
    #[error("Missing required parameter '{param}' of '{type_id}'")]
    MissingRequiredParameter {
        /// Plugin type identifier
        type_id: String,
        /// Parameter name
        param: String,
    },

    /// A parameter the schema does not declare, in strict mode
    #[error("Unknown parameter '{param}' for '{type_id}'")]
    UnknownParameter {
        /// Plugin type identifier
        type_id: String,
        /// Parameter name
        param: String,
    },

    /// A parameter named like a key the plugin document already uses
    #[error("Parameter name '{param}' of '{type_id}' is reserved")]
    ReservedParameter {
        /// Plugin type identifier
        type_id: String,
        /// Parameter name
        param: String,
    },
}
