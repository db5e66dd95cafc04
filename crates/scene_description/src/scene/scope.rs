//! Reference resolution scopes

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use super::{Scene, SceneError};
use crate::value::Ref;

/// Set of names a [`Ref`] may point at
pub trait NameScope {
    /// True when `name` names an entry of this scope
    fn resolves(&self, name: &str) -> bool;

    /// Fail with [`SceneError::UnresolvedReference`] unless `reference` resolves
    fn require(&self, reference: &Ref) -> Result<(), SceneError> {
        if self.resolves(reference.name()) {
            Ok(())
        } else {
            Err(SceneError::UnresolvedReference(reference.name().to_string()))
        }
    }
}

impl NameScope for Scene {
    fn resolves(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<S: BuildHasher> NameScope for HashSet<String, S> {
    fn resolves(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl NameScope for BTreeSet<String> {
    fn resolves(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<const N: usize> NameScope for [&str; N] {
    fn resolves(&self, name: &str) -> bool {
        self.contains(&name)
    }
}
