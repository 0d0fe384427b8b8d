use anyhow::{bail, Context, Result};
use boolidx_core::persist::{load_index, save_index, save_meta, IndexPaths, MetaFile, FORMAT_VERSION};
use boolidx_core::tokenizer::{tokenize_and_normalize, TOKENIZER_VERSION};
use boolidx_core::{build_index, sort_pairs, DocId, StoredIndex, Token};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::source::{list_documents, make_doc_ids, read_document};

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Fail the build unless the index ends up with exactly this many terms.
    pub expected_terms: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub num_docs: u32,
    pub num_pairs: usize,
    pub num_terms: usize,
}

/// Tokenize every document under `input` and write the index to `output`.
pub fn build_index_dir(opts: &BuildOptions) -> Result<BuildReport> {
    let docs = list_documents(&opts.input)?;
    tracing::info!(num_docs = docs.len(), input = %opts.input.display(), "found documents");
    let doc_ids = make_doc_ids(&docs)?;

    // Documents are read one at a time; only the pairs stay in memory.
    let mut pairs: Vec<(Token, DocId)> = Vec::new();
    for doc in &docs {
        let doc_id = doc_ids[&doc.name];
        let text = read_document(&doc.path)?;
        pairs.extend(tokenize_and_normalize(&text).into_iter().map(|t| (t, doc_id)));
    }
    let num_pairs = pairs.len();
    sort_pairs(&mut pairs);
    tracing::debug!(num_pairs, "sorted token pairs");

    let (index, doc_freq) = build_index(pairs);
    let num_docs = doc_ids.len() as u32;
    let stored = StoredIndex::new(index, doc_freq, doc_ids, num_docs);
    let num_terms = stored.num_terms();
    tracing::info!(num_docs, num_terms, "built index");

    if let Some(expected) = opts.expected_terms {
        if expected != num_terms {
            tracing::warn!(expected, num_terms, "index size differs from the expected term count");
            bail!("index has {num_terms} terms, expected {expected}; check the tokenizer version");
        }
    }

    let paths = IndexPaths::new(&opts.output);
    save_index(&paths, &stored).with_context(|| format!("writing index to {}", opts.output.display()))?;
    let meta = MetaFile {
        num_docs,
        num_terms: num_terms as u64,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: FORMAT_VERSION,
        tokenizer: TOKENIZER_VERSION,
    };
    save_meta(&paths, &meta)?;

    tracing::info!(output = %opts.output.display(), "index build complete");
    Ok(BuildReport { num_docs, num_pairs, num_terms })
}

#[derive(Debug, Serialize)]
pub struct TermStat {
    pub term: String,
    pub doc_freq: u32,
    pub total_freq: u64,
}

#[derive(Debug, Serialize)]
pub struct IndexStats {
    pub num_docs: u32,
    pub num_terms: usize,
    pub num_postings: usize,
    /// Terms with the highest document frequency, ties broken by term.
    pub top_terms: Vec<TermStat>,
}

pub fn index_stats(index_dir: &Path, top: usize) -> Result<IndexStats> {
    let stored = load_index(&IndexPaths::new(index_dir))
        .with_context(|| format!("loading index from {}", index_dir.display()))?;

    let mut terms: Vec<TermStat> = stored
        .index
        .iter()
        .map(|(term, postings)| TermStat {
            term: term.clone(),
            doc_freq: stored.doc_freq[term],
            total_freq: postings.iter().map(|p| u64::from(p.term_freq)).sum(),
        })
        .collect();
    terms.sort_by(|a, b| b.doc_freq.cmp(&a.doc_freq).then_with(|| a.term.cmp(&b.term)));
    terms.truncate(top);

    Ok(IndexStats {
        num_docs: stored.num_docs,
        num_terms: stored.num_terms(),
        num_postings: stored.index.values().map(Vec::len).sum(),
        top_terms: terms,
    })
}
