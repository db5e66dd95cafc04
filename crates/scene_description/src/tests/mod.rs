//! Crate-level tests spanning plugins, scenes and serialization

mod scene_integration;
