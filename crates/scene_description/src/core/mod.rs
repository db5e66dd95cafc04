//! # Core Module
//!
//! Shared settings consumed by the schema registry and plugin validation.

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

pub use config::SceneConfig;
pub use crate::config::{Config, ConfigError, ConfigFormat};
