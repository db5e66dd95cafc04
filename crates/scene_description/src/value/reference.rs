//! Named references to scene assets

use std::fmt;

/// Non-owning pointer to a plugin stored in one of a scene's named
/// collections. Resolved by name when the scene is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ref {
    name: String,
}

impl Ref {
    /// Type tag of the emitted reference marker
    pub const TYPE_TAG: &'static str = "ref";

    /// Reference the asset stored under `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Target asset name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ref({})", self.name)
    }
}
