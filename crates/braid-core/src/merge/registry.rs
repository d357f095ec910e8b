//! The closed mapping from section name to merge strategy.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Error;
use crate::merge::handlers::{ArrayHandler, CompositeHandler, ObjectHandler, SectionHandler};

/// Registry of section handlers keyed by section name.
///
/// Backed by a `BTreeMap`, so iteration order is the canonical lexical
/// section order used when finalizing a merged document.
#[derive(Clone, Default)]
pub struct SectionRegistry {
    handlers: BTreeMap<String, Arc<dyn SectionHandler>>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical ACL sections: `acls`, `autoApprovers`, `groups`,
    /// `hosts`, `tagOwners`.
    pub fn predefined() -> Self {
        let mut registry = Self::new();
        registry.register("acls", ArrayHandler);
        registry.register("autoApprovers", CompositeHandler::auto_approvers());
        registry.register("groups", ObjectHandler);
        registry.register("hosts", ObjectHandler);
        registry.register("tagOwners", ObjectHandler);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, handler: impl SectionHandler + 'static) {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<&dyn SectionHandler> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names in canonical (lexical) order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Restrict to the sections named in `allowed`.
    ///
    /// Fails with [`Error::UnknownAllowedSection`] when `allowed` names a
    /// section that was never registered, before any merge runs.
    pub fn allowed<S: AsRef<str>>(&self, allowed: &[S]) -> Result<Self, Error> {
        let mut subset = Self::new();
        for name in allowed {
            let name = name.as_ref();
            let handler = self
                .handlers
                .get(name)
                .ok_or_else(|| Error::UnknownAllowedSection {
                    section: name.to_string(),
                })?;
            subset.handlers.insert(name.to_string(), Arc::clone(handler));
        }
        Ok(subset)
    }
}

impl std::fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionRegistry")
            .field("sections", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
