//! Loading policy documents from disk.

use std::path::Path;

use anyhow::Context;
use walkdir::WalkDir;

use crate::error::Error;
use crate::jwcc::{parser, Object};

/// A parsed JWCC document bound to the source path used for provenance
/// attribution.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: String,
    pub root: Object,
}

impl Document {
    /// Parse a document from text, labeling it with `path`.
    pub fn parse(path: impl Into<String>, text: &str) -> Result<Self, Error> {
        Ok(Self {
            path: path.into(),
            root: parser::parse_document(text)?,
        })
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;
        Self::parse(path.display().to_string(), &text)
            .with_context(|| format!("Failed to parse document: {}", path.display()))
    }
}

/// Collect child overlay documents under `dir`.
///
/// Keeps `.hujson` and `.json` files, walking recursively. Paths are sorted
/// before parsing so the merge order does not depend on directory iteration
/// order.
pub fn collect_children(dir: &Path) -> anyhow::Result<Vec<Document>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry =
            entry.with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let ext = entry.path().extension().and_then(|e| e.to_str());
        if matches!(ext, Some("hujson" | "json")) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    paths.iter().map(|path| Document::load(path)).collect()
}
