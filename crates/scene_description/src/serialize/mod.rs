//! Scene serialization
//!
//! Turns a [`Scene`](crate::scene::Scene) or a single plugin into a
//! [`Document`], the nested mapping handed to the renderer's loader.

mod document;
mod serializer;

pub use document::{Document, Node};
pub use serializer::{serialize, serialize_plugin, serialize_value};
