//! Braid Core Library
//!
//! Merges a parent JWCC ACL policy template and a set of per-tenant child
//! overlays into a single authoritative document, preserving comments and
//! annotating merged nodes with their source path.

pub mod error;
pub mod jwcc;
pub mod merge;
pub mod sources;

pub use error::Error;

/// Re-exports of commonly used types
pub mod prelude {
    // Tree model
    pub use crate::jwcc::{Array, Comments, Member, Object, Scalar, Value};

    // Merge engine
    pub use crate::merge::{merge_docs, SectionHandler, SectionRegistry};

    // Documents
    pub use crate::sources::{collect_children, Document};

    // Errors
    pub use crate::error::Error;
}
