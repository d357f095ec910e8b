//! Merge strategies for top-level policy sections.
//!
//! Each handler knows the shape of one section and folds a child's section
//! value into the parent document. Handlers are stateless; the registry
//! hands out shared instances.

use crate::error::Error;
use crate::jwcc::{Object, Value};
use crate::merge::primitives::{
    attribute, existing_or_new_array, existing_or_new_object, merge_arrays_with_dedup,
    merge_objects_by_key, upsert_member,
};
use crate::merge::registry::SectionRegistry;

/// Merge strategy for one section.
///
/// `parent` is the object the section lives in: the document root for
/// top-level sections, the enclosing section object for composite sub-keys.
pub trait SectionHandler: Send + Sync {
    fn merge(
        &self,
        name: &str,
        parent_path: &str,
        parent: &mut Object,
        child_path: &str,
        child_value: &Value,
    ) -> Result<(), Error>;
}

/// Keyed-map sections (`groups`, `tagOwners`, `hosts`): deep union by key,
/// with array leaves dedup-unioned.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectHandler;

impl SectionHandler for ObjectHandler {
    fn merge(
        &self,
        name: &str,
        parent_path: &str,
        parent: &mut Object,
        child_path: &str,
        child_value: &Value,
    ) -> Result<(), Error> {
        let Some(child_obj) = child_value.as_object() else {
            // Shape mismatch: the parent's section wins.
            return Ok(());
        };
        let mut section = existing_or_new_object(parent, name);
        for member in &mut section.members {
            attribute(&mut member.comments, parent_path);
        }
        merge_objects_by_key(&mut section, child_obj, child_path);
        upsert_member(parent, name, Value::Object(section), Some(child_path));
        Ok(())
    }
}

/// Ordered-list sections (`acls`): positional append, no deduplication,
/// per-element provenance.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayHandler;

impl SectionHandler for ArrayHandler {
    fn merge(
        &self,
        name: &str,
        parent_path: &str,
        parent: &mut Object,
        child_path: &str,
        child_value: &Value,
    ) -> Result<(), Error> {
        let Some(child_arr) = child_value.as_array() else {
            return Ok(());
        };
        let mut section = existing_or_new_array(parent, name);
        for value in &mut section.values {
            attribute(value.comments_mut(), parent_path);
        }
        for value in &child_arr.values {
            let mut appended = value.clone();
            attribute(appended.comments_mut(), child_path);
            section.values.push(appended);
        }
        upsert_member(parent, name, Value::Array(section), Some(child_path));
        Ok(())
    }
}

/// Flat principal lists (`autoApprovers.exitNode`): dedup-union by textual
/// equality.
#[derive(Debug, Default, Clone, Copy)]
pub struct DedupArrayHandler;

impl SectionHandler for DedupArrayHandler {
    fn merge(
        &self,
        name: &str,
        _parent_path: &str,
        parent: &mut Object,
        child_path: &str,
        child_value: &Value,
    ) -> Result<(), Error> {
        let Some(child_arr) = child_value.as_array() else {
            return Ok(());
        };
        let section = existing_or_new_array(parent, name);
        let merged = merge_arrays_with_dedup(&section, child_arr);
        upsert_member(parent, name, Value::Array(merged), Some(child_path));
        Ok(())
    }
}

/// Composite section whose sub-keys each have their own shape, dispatched
/// through a nested registry (`autoApprovers`: `routes`, `exitNode`,
/// `services`).
pub struct CompositeHandler {
    sub_sections: SectionRegistry,
}

impl CompositeHandler {
    pub fn new(sub_sections: SectionRegistry) -> Self {
        Self { sub_sections }
    }

    /// The `autoApprovers` layout.
    pub fn auto_approvers() -> Self {
        let mut sub = SectionRegistry::new();
        sub.register("routes", ObjectHandler);
        sub.register("exitNode", DedupArrayHandler);
        sub.register("services", ObjectHandler);
        Self::new(sub)
    }
}

impl SectionHandler for CompositeHandler {
    fn merge(
        &self,
        name: &str,
        parent_path: &str,
        parent: &mut Object,
        child_path: &str,
        child_value: &Value,
    ) -> Result<(), Error> {
        let Some(child_obj) = child_value.as_object() else {
            return Ok(());
        };
        let mut section = existing_or_new_object(parent, name);
        for member in &child_obj.members {
            let key = member.key.text();
            let handler = self.sub_sections.get(&key).ok_or_else(|| Error::UnknownSection {
                section: format!("{name}.{key}"),
                path: child_path.to_string(),
            })?;
            handler.merge(&key, parent_path, &mut section, child_path, &member.value)?;
        }
        upsert_member(parent, name, Value::Object(section), Some(child_path));
        Ok(())
    }
}
