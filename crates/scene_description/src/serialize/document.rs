//! Output document tree
//!
//! Insertion-ordered nested mapping, shaped the way the renderer's dictionary
//! loader expects it. Serializes with serde; JSON and RON text helpers are
//! provided.

use indexmap::IndexMap;
use serde::Serialize;

use crate::transform::TransformDocument;

/// Insertion-ordered key/value mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(IndexMap<String, Node>);

/// A value inside a [`Document`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    String(String),
    /// Sequence
    List(Vec<Node>),
    /// Nested mapping
    Map(Document),
    /// Matrix and inverse-transpose of a transform
    Transform(TransformDocument),
}

impl Document {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, replacing the value of an existing one in place
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        self.0.insert(key.into(), node.into());
    }

    /// Value under `key`
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True without keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON text
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON text
    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Indented RON text
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

impl Node {
    /// String contents
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Nested mapping
    pub const fn as_map(&self) -> Option<&Document> {
        match self {
            Self::Map(d) => Some(d),
            _ => None,
        }
    }

    /// Sequence items
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Transform matrices
    pub const fn as_transform(&self) -> Option<&TransformDocument> {
        match self {
            Self::Transform(t) => Some(t),
            _ => None,
        }
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Document> for Node {
    fn from(v: Document) -> Self {
        Self::Map(v)
    }
}

impl From<Vec<Self>> for Node {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v)
    }
}

impl From<TransformDocument> for Node {
    fn from(v: TransformDocument) -> Self {
        Self::Transform(v)
    }
}
