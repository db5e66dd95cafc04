//! Plugin schemas
//!
//! The schema says which plugin types exist in each [`Category`] and which
//! parameters each of them takes. It is produced outside this crate (by
//! scraping the renderer's plugin reference) and reaches us either as a
//! versioned schema file or as the built-in fallback table.

mod builtin;
mod registry;
mod version;

pub use builtin::BUILTIN_ENGINE_VERSION;
pub use registry::{CategorySchemas, SchemaFile, SchemaRegistry};
pub use version::{
    resolve_engine_version, EnvVersionProbe, ResolvedVersion, VersionProbe, VersionSource,
    ENGINE_VERSION_ENV,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::value::Value;

/// Plugin categories of the target renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Surface scattering models
    Bsdf,
    /// Geometry
    Shape,
    /// Cameras and other measuring devices
    Sensor,
    /// Light sources
    Emitter,
    /// Light transport algorithms
    Integrator,
    /// Spatially varying inputs
    Texture,
    /// Image storage of a sensor
    Film,
    /// Sample generators
    Sampler,
    /// Participating media
    Medium,
    /// Volume scattering distributions
    PhaseFunction,
    /// Pixel reconstruction filters
    ReconstructionFilter,
    /// Spectral distributions
    Spectrum,
    /// Volumetric data sources
    Volume,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Self; 13] = [
        Self::Bsdf,
        Self::Shape,
        Self::Sensor,
        Self::Emitter,
        Self::Integrator,
        Self::Texture,
        Self::Film,
        Self::Sampler,
        Self::Medium,
        Self::PhaseFunction,
        Self::ReconstructionFilter,
        Self::Spectrum,
        Self::Volume,
    ];

    /// Snake-case name, as used in schema files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bsdf => "bsdf",
            Self::Shape => "shape",
            Self::Sensor => "sensor",
            Self::Emitter => "emitter",
            Self::Integrator => "integrator",
            Self::Texture => "texture",
            Self::Film => "film",
            Self::Sampler => "sampler",
            Self::Medium => "medium",
            Self::PhaseFunction => "phase_function",
            Self::ReconstructionFilter => "reconstruction_filter",
            Self::Spectrum => "spectrum",
            Self::Volume => "volume",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| format!("Unknown plugin category: {s}"))
    }
}

/// Accepted value kinds of a plugin parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Float or integer
    Float,
    /// Integer
    Integer,
    /// Boolean
    Boolean,
    /// String, file name or enumerated option
    String,
    /// RGB value or three numbers
    Color,
    /// Number, RGB, number list, spectrum/texture/volume plugin, or reference
    Spectrum,
    /// Three numbers (points and directions)
    Vector,
    /// Affine transform
    Transform,
    /// Nested plugin of the given category, or reference
    Plugin(Category),
    /// Unchecked
    Any,
}

impl ParamKind {
    /// Check whether `value` is acceptable for a parameter of this kind
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Float => value.as_number().is_some(),
            Self::Integer => matches!(value, Value::Int(_)),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::String => matches!(value, Value::String(_)),
            Self::Color => matches!(value, Value::Rgb(_)) || is_triple(value),
            Self::Vector => is_triple(value),
            Self::Transform => matches!(value, Value::Transform(_)),
            Self::Spectrum => match value {
                Value::Int(_) | Value::Float(_) | Value::Rgb(_) | Value::Ref(_) => true,
                Value::List(items) => !items.is_empty() && value.is_number_list(),
                Value::Plugin(p) => matches!(
                    p.category(),
                    Category::Spectrum | Category::Texture | Category::Volume
                ),
                _ => false,
            },
            Self::Plugin(category) => match value {
                Value::Ref(_) => true,
                Value::Plugin(p) => p.category() == category,
                _ => false,
            },
        }
    }

    /// Map the type column of the renderer's plugin documentation to a kind
    ///
    /// Rules are tried in order, first match wins; unrecognized text maps to
    /// [`ParamKind::Any`].
    pub fn from_doc_type(text: &str) -> Self {
        let lower = text.to_ascii_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .filter(|w| !w.is_empty())
            .collect();
        let has = |candidates: &[&str]| words.iter().any(|w| candidates.contains(w));

        if has(&["float", "double", "scalar"]) {
            Self::Float
        } else if has(&["int", "integer"]) {
            Self::Integer
        } else if has(&["bool", "boolean"]) {
            Self::Boolean
        } else if has(&["string", "filename", "path"]) {
            Self::String
        } else if has(&["rgb", "color"]) {
            Self::Color
        } else if has(&["spectrum"]) {
            Self::Spectrum
        } else if has(&["transform"]) {
            Self::Transform
        } else if has(&["point", "vector"]) {
            Self::Vector
        } else if let Some(category) = words.iter().find_map(|w| category_word(w)) {
            Self::Plugin(category)
        } else {
            Self::Any
        }
    }
}

fn category_word(word: &str) -> Option<Category> {
    Some(match word {
        "bsdf" => Category::Bsdf,
        "texture" => Category::Texture,
        "emitter" => Category::Emitter,
        "shape" => Category::Shape,
        "sensor" => Category::Sensor,
        "film" => Category::Film,
        "sampler" => Category::Sampler,
        "medium" => Category::Medium,
        "phase" => Category::PhaseFunction,
        "filter" => Category::ReconstructionFilter,
        "volume" => Category::Volume,
        _ => return None,
    })
}

fn is_triple(value: &Value) -> bool {
    matches!(value, Value::List(items) if items.len() == 3) && value.is_number_list()
}

/// Default value declared for an optional parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean default
    Bool(bool),
    /// Integer default
    Int(i64),
    /// Float default
    Float(f64),
    /// String default
    String(String),
}

impl From<&DefaultValue> for Value {
    fn from(default: &DefaultValue) -> Self {
        match default {
            DefaultValue::Bool(v) => Self::Bool(*v),
            DefaultValue::Int(v) => Self::Int(*v),
            DefaultValue::Float(v) => Self::Float(*v),
            DefaultValue::String(v) => Self::String(v.clone()),
        }
    }
}

/// Declared parameter of a plugin type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSchema {
    /// Parameter name as the renderer expects it
    pub name: String,
    /// Accepted value kind
    pub kind: ParamKind,
    /// Whether construction fails without it
    #[serde(default)]
    pub required: bool,
    /// Value the renderer assumes when the parameter is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl ParamSchema {
    /// Optional parameter without a declared default
    pub fn optional(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: None,
        }
    }

    /// Required parameter
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            required: true,
            ..Self::optional(name, kind)
        }
    }

    /// Attach a default value
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// Declared shape of one plugin type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSchema {
    /// Type identifier, e.g. `"diffuse"`
    pub type_id: String,
    /// Human readable title from the plugin reference
    #[serde(default)]
    pub title: String,
    /// Declared parameters in documentation order
    #[serde(default)]
    pub params: Vec<ParamSchema>,
}

impl PluginSchema {
    /// Create a schema without parameters
    pub fn new(type_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            title: title.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter
    pub fn with_param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// Look up a declared parameter
    pub fn param(&self, name: &str) -> Option<&ParamSchema> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// How unknown parameter names are handled during plugin construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject parameters the schema does not declare
    #[default]
    Strict,
    /// Pass undeclared parameters through unchecked
    Relaxed,
}

/// Schema loading and registration errors
#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or parsed
    #[error("Schema file error: {0}")]
    Config(#[from] ConfigError),

    /// A process-wide registry was already installed
    #[error("A schema registry is already installed")]
    AlreadyInstalled,

    /// The same type identifier was registered twice in one category
    #[error("Plugin '{type_id}' is registered twice in category {category}")]
    DuplicatePlugin {
        /// Category of the duplicate
        category: Category,
        /// Duplicated type identifier
        type_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Ref, Rgb};

    #[test]
    fn test_category_names_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>().unwrap(), category);
        }
        assert_eq!("Phase Function".parse::<Category>().unwrap(), Category::PhaseFunction);
        assert!("lens".parse::<Category>().is_err());
    }

    #[test]
    fn test_doc_type_mapping_order() {
        assert_eq!(ParamKind::from_doc_type("float"), ParamKind::Float);
        assert_eq!(ParamKind::from_doc_type("integer"), ParamKind::Integer);
        assert_eq!(ParamKind::from_doc_type("boolean"), ParamKind::Boolean);
        assert_eq!(ParamKind::from_doc_type("filename"), ParamKind::String);
        assert_eq!(ParamKind::from_doc_type("rgb"), ParamKind::Color);
        assert_eq!(ParamKind::from_doc_type("spectrum or texture"), ParamKind::Spectrum);
        assert_eq!(ParamKind::from_doc_type("transform"), ParamKind::Transform);
        assert_eq!(ParamKind::from_doc_type("point"), ParamKind::Vector);
        assert_eq!(ParamKind::from_doc_type("phase"), ParamKind::Plugin(Category::PhaseFunction));
        assert_eq!(ParamKind::from_doc_type("rfilter"), ParamKind::Any);
    }

    #[test]
    fn test_kind_acceptance() {
        assert!(ParamKind::Float.accepts(&Value::Int(3)));
        assert!(!ParamKind::Integer.accepts(&Value::Float(3.0)));
        assert!(ParamKind::Color.accepts(&Value::from([1.0, 0.5, 0.0])));
        assert!(!ParamKind::Color.accepts(&Value::from([1.0, 0.5])));
        assert!(ParamKind::Spectrum.accepts(&Value::Rgb(Rgb::gray(0.5))));
        assert!(ParamKind::Spectrum.accepts(&Value::Float(0.5)));
        assert!(ParamKind::Spectrum.accepts(&Value::Ref(Ref::new("tex"))));
        assert!(!ParamKind::Spectrum.accepts(&Value::from("red")));
        assert!(ParamKind::Plugin(Category::Bsdf).accepts(&Value::Ref(Ref::new("mat"))));
        assert!(!ParamKind::Plugin(Category::Bsdf).accepts(&Value::Float(1.0)));
        assert!(ParamKind::Any.accepts(&Value::from("anything")));
    }
}
