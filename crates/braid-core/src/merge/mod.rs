//! Schema-aware structural merging of JWCC policy documents.
//!
//! The driver folds each child document into the parent through the
//! section handlers registered for the active section set, then finalizes
//! the parent into canonical top-level order.

pub mod handlers;
pub mod primitives;
pub mod registry;

use crate::error::Error;
use crate::jwcc::Object;
use crate::sources::Document;

pub use handlers::{
    ArrayHandler, CompositeHandler, DedupArrayHandler, ObjectHandler, SectionHandler,
};
pub use registry::SectionRegistry;

/// Merge every child into `parent`, section by section.
///
/// Children are applied in input order; within a child, sections are applied
/// in document order. Every top-level key of every child is validated
/// against `sections` before the first handler runs, so an unknown-section
/// failure leaves the parent untouched.
///
/// The parent is mutated in place and finalized on success.
pub fn merge_docs(
    sections: &SectionRegistry,
    parent: &mut Document,
    children: &[Document],
) -> Result<(), Error> {
    for child in children {
        for member in &child.root.members {
            let key = member.key.text();
            if !sections.contains(&key) {
                return Err(Error::UnknownSection {
                    section: key.into_owned(),
                    path: child.path.clone(),
                });
            }
        }
    }

    for child in children {
        tracing::debug!(path = %child.path, "merging child document");
        for member in &child.root.members {
            let key = member.key.text();
            tracing::trace!(section = %key, "applying section handler");
            let handler = sections
                .get(&key)
                .expect("section validated against registry above");
            handler.merge(&key, &parent.path, &mut parent.root, &child.path, &member.value)?;
        }
    }

    finalize(&mut parent.root);
    Ok(())
}

/// Reorder top-level members into canonical lexical order.
///
/// The sort is input-independent: whatever order sections were touched in,
/// the emitted document always lists them the same way.
pub fn finalize(root: &mut Object) {
    root.members
        .sort_by(|a, b| a.key.text().cmp(&b.key.text()));
}
