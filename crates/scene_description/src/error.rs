//! Crate-wide error type

use crate::config::ConfigError;
use crate::plugin::PluginError;
use crate::scene::SceneError;
use crate::schema::SchemaError;
use crate::transform::TransformError;

/// Any error raised by this crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Plugin construction failed
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// Scene assembly or serialization failed
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// A transform operation failed
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Schema loading failed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A configuration file could not be used
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON output failed
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON output failed
    #[error("RON output error: {0}")]
    Ron(#[from] ron::Error),
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
