//! Corpus enumeration and document reading.

use anyhow::{bail, Context, Result};
use boolidx_core::DocId;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document found under the corpus root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDoc {
    /// Location on disk.
    pub path: PathBuf,
    /// Path relative to the corpus root, `/`-separated; this is what the index stores.
    pub name: String,
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

fn relative_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Every regular, non-hidden file below `root`, sorted by path.
///
/// If `root` is itself a file the corpus is that single file.
pub fn list_documents(root: &Path) -> Result<Vec<SourceDoc>> {
    if root.is_file() {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.to_string_lossy().into_owned());
        return Ok(vec![SourceDoc { path: root.to_path_buf(), name }]);
    }
    if !root.is_dir() {
        bail!("corpus root {} does not exist", root.display());
    }

    let mut docs = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));
    for entry in walker {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if entry.file_type().is_file() {
            let path = entry.into_path();
            let name = relative_name(root, &path);
            docs.push(SourceDoc { path, name });
        }
    }
    Ok(docs)
}

/// Assign dense doc ids in discovery order.
pub fn make_doc_ids(docs: &[SourceDoc]) -> Result<HashMap<String, DocId>> {
    let mut ids = HashMap::with_capacity(docs.len());
    for (i, doc) in docs.iter().enumerate() {
        let id = DocId::try_from(i).context("corpus has more documents than doc ids")?;
        if ids.insert(doc.name.clone(), id).is_some() {
            bail!("document name {:?} appears twice", doc.name);
        }
    }
    Ok(ids)
}

/// Read a document as text; invalid UTF-8 is replaced rather than rejected.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
