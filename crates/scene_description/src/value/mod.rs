//! Parameter values
//!
//! [`Value`] is what a plugin parameter holds: a primitive, a color, a
//! nested plugin, a reference to a named asset, a transform, or a sequence
//! or mapping of further values.

mod color;
mod reference;

pub use color::Rgb;
pub use reference::Ref;

use indexmap::IndexMap;

use crate::plugin::Plugin;
use crate::transform::Transform;

/// A plugin parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean flag
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String, file name or enumerated option
    String(String),
    /// RGB color
    Rgb(Rgb),
    /// Nested plugin, owned by the parameter
    Plugin(Box<Plugin>),
    /// Reference to a named scene asset
    Ref(Ref),
    /// Affine transform
    Transform(Transform),
    /// Ordered sequence
    List(Vec<Value>),
    /// Insertion-ordered mapping
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Short name of the value's variant, used in error messages
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Rgb(_) => "rgb",
            Self::Plugin(_) => "plugin",
            Self::Ref(_) => "ref",
            Self::Transform(_) => "transform",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Numeric value of an `Int` or `Float`
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// True for a list whose every element is a number
    pub fn is_number_list(&self) -> bool {
        matches!(self, Self::List(items) if items.iter().all(|v| v.as_number().is_some()))
    }

    /// Nested plugin, if this value holds one
    pub fn as_plugin(&self) -> Option<&Plugin> {
        match self {
            Self::Plugin(p) => Some(p),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Rgb> for Value {
    fn from(v: Rgb) -> Self {
        Self::Rgb(v)
    }
}

impl From<Plugin> for Value {
    fn from(v: Plugin) -> Self {
        Self::Plugin(Box::new(v))
    }
}

impl From<Ref> for Value {
    fn from(v: Ref) -> Self {
        Self::Ref(v)
    }
}

impl From<Transform> for Value {
    fn from(v: Transform) -> Self {
        Self::Transform(v)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Self>> for Value {
    fn from(v: IndexMap<String, Self>) -> Self {
        Self::Map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_pick_variants() {
        assert_eq!(Value::from(2), Value::Int(2));
        assert_eq!(Value::from(0.5_f32), Value::Float(0.5));
        assert_eq!(Value::from("hdrfilm"), Value::String("hdrfilm".into()));
        assert_eq!(
            Value::from([0.0, 1.0, 0.0]),
            Value::List(vec![Value::Float(0.0), Value::Float(1.0), Value::Float(0.0)])
        );
    }

    #[test]
    fn test_number_list_detection() {
        assert!(Value::from(vec![1.0, 2.0]).is_number_list());
        assert!(Value::List(vec![Value::Int(1), Value::Float(2.0)]).is_number_list());
        assert!(!Value::List(vec![Value::from("a")]).is_number_list());
        assert!(!Value::Float(1.0).is_number_list());
    }
}
