//! # Scene Description
//!
//! Typed builder and serializer for Mitsuba 3 scene dictionaries.
//!
//! ## Features
//!
//! - **Typed Plugins**: One schema-checked variant per renderer plugin
//! - **Versioned Schemas**: Built-in fallback or pinned TOML/RON schema files
//! - **Transforms**: Chainable affine builder with inverse-transpose output
//! - **Scenes**: Named collections, shared assets and references
//! - **Serialization**: Ordered documents, written as JSON or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_description::prelude::*;
//!
//! fn main() -> scene_description::Result<()> {
//!     let red = SmoothDiffuseMaterial::new()
//!         .reflectance(Rgb::new(0.8, 0.2, 0.2))
//!         .build()?;
//!     let ball = Sphere::new()
//!         .radius(1.0)
//!         .bsdf(red)
//!         .to_world(Transform::new().translate(0.0, 0.0, 3.0))
//!         .build()?;
//!     let camera = PerspectivePinholeCamera::new()
//!         .fov(45.0)
//!         .to_world(Transform::new().look_at([0.0, 1.0, -6.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0])?)
//!         .build()?;
//!
//!     let scene = SceneBuilder::new()
//!         .integrator(PathTracer::new().build()?)
//!         .sensor(camera)
//!         .shape("ball", ball)
//!         .build()?;
//!
//!     let document = serialize(&scene)?;
//!     println!("{}", document.to_json_string_pretty()?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared settings
pub mod config;
pub mod core;
pub mod foundation;

// Scene model
pub mod plugin;
pub mod scene;
pub mod schema;
pub mod serialize;
pub mod transform;
pub mod value;

mod error;

pub use error::{Error, Result};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        core::SceneConfig,
        plugin::{catalog::*, Plugin, PluginBuilder, PluginError},
        scene::{NameScope, Scene, SceneBuilder, SceneError},
        schema::{Category, SchemaRegistry, ValidationMode},
        serialize::{serialize, serialize_plugin, Document, Node},
        transform::{Transform, TransformError},
        value::{Ref, Rgb, Value},
        Error,
    };
}

#[cfg(test)]
mod tests;
