use anyhow::{Context, Result};
use boolidx_core::persist::{load_index, load_meta, IndexPaths};
use boolidx_core::query::BooleanQuery;
use boolidx_core::tokenizer::{normalize_term, TOKENIZER_VERSION};
use boolidx_core::{DocId, StoredIndex};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

/// How matching documents are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultOrder {
    /// Document paths, sorted by path
    Path,
    /// Raw doc ids, ascending
    Id,
}

/// A loaded index ready to answer queries.
pub struct Searcher {
    stored: StoredIndex,
    doc_paths: Vec<String>,
    /// Run query terms through the document tokenizer before lookup.
    normalize: bool,
}

impl Searcher {
    pub fn new(stored: StoredIndex, normalize: bool) -> Self {
        let doc_paths = stored.doc_paths();
        Self { stored, doc_paths, normalize }
    }

    pub fn open(index_dir: &Path, normalize: bool) -> Result<Self> {
        let paths = IndexPaths::new(index_dir);
        let stored = load_index(&paths).with_context(|| format!("loading index from {}", index_dir.display()))?;
        match load_meta(&paths) {
            Ok(meta) if meta.tokenizer != TOKENIZER_VERSION => tracing::warn!(
                built_with = meta.tokenizer,
                current = TOKENIZER_VERSION,
                "index was built with a different tokenizer; query terms may not match"
            ),
            Ok(meta) => tracing::debug!(created_at = %meta.created_at, "index metadata loaded"),
            Err(err) => tracing::warn!(error = %err, "index metadata unreadable"),
        }
        tracing::info!(num_docs = stored.num_docs, num_terms = stored.num_terms(), "index loaded");
        Ok(Self::new(stored, normalize))
    }

    pub fn stored(&self) -> &StoredIndex {
        &self.stored
    }

    /// Evaluate one query line; ids ascending.
    pub fn search(&self, query: &str) -> boolidx_core::Result<Vec<DocId>> {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        let Some(parsed) = BooleanQuery::parse(&tokens)? else {
            return Ok(Vec::new());
        };
        let hits = if self.normalize {
            parsed.map_terms(normalize_term).evaluate(&self.stored.index)
        } else {
            parsed.evaluate(&self.stored.index)
        };
        Ok(hits)
    }

    /// Display lines for a result set in the requested order.
    pub fn render(&self, hits: &[DocId], order: ResultOrder) -> Vec<String> {
        match order {
            ResultOrder::Id => hits.iter().map(|id| id.to_string()).collect(),
            ResultOrder::Path => {
                let mut names: Vec<String> = hits
                    .iter()
                    .map(|&id| match self.doc_paths.get(id as usize) {
                        Some(p) if !p.is_empty() => p.clone(),
                        _ => id.to_string(),
                    })
                    .collect();
                names.sort();
                names
            }
        }
    }

    /// Answer each query, writing the query and then one hit per line to `out`.
    /// Malformed queries are reported to `err` and skipped. Returns how many failed.
    pub fn run_queries<I, S, W, E>(&self, queries: I, order: ResultOrder, out: &mut W, err: &mut E) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: Write,
        E: Write,
    {
        let mut failed = 0;
        for query in queries {
            let query = query.as_ref().trim();
            if query.is_empty() {
                continue;
            }
            match self.search(query) {
                Ok(hits) => {
                    writeln!(out, "{query}")?;
                    for line in self.render(&hits, order) {
                        writeln!(out, "{line}")?;
                    }
                }
                Err(e) => {
                    failed += 1;
                    writeln!(err, "{query}: {e}")?;
                }
            }
        }
        out.flush()?;
        Ok(failed)
    }
}
