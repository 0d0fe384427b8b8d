use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};

pub type Token = String;
pub type DocId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Occurrences of the term in this document, always >= 1.
    pub term_freq: u32,
}

impl Posting {
    pub fn new(doc_id: DocId, term_freq: u32) -> Self {
        Self { doc_id, term_freq }
    }
}

/// Postings for one token, ascending by doc_id with no repeated ids.
pub type PostingList = Vec<Posting>;
pub type Index = HashMap<Token, PostingList>;
/// Number of distinct documents per token.
pub type DocFreq = HashMap<Token, u32>;

/// Doc ids of a posting list, in posting order.
pub fn doc_ids_of(postings: &[Posting]) -> Vec<DocId> {
    postings.iter().map(|p| p.doc_id).collect()
}

/// Everything written to disk by one index build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIndex {
    pub index: Index,
    pub doc_freq: DocFreq,
    /// Document path -> doc id.
    pub doc_ids: HashMap<String, DocId>,
    pub num_docs: u32,
}

impl StoredIndex {
    pub fn new(index: Index, doc_freq: DocFreq, doc_ids: HashMap<String, DocId>, num_docs: u32) -> Self {
        Self { index, doc_freq, doc_ids, num_docs }
    }

    pub fn num_terms(&self) -> usize {
        self.index.len()
    }

    /// Reverse of `doc_ids`, indexed by doc id.
    pub fn doc_paths(&self) -> Vec<String> {
        let mut paths = vec![String::new(); self.num_docs as usize];
        for (path, &id) in &self.doc_ids {
            if let Some(slot) = paths.get_mut(id as usize) {
                slot.clone_from(path);
            }
        }
        paths
    }

    /// Check the structural invariants of a built or freshly loaded index.
    pub fn validate(&self) -> Result<()> {
        if self.doc_ids.len() != self.num_docs as usize {
            return Err(Error::corrupt(format!(
                "{} document paths for {} documents",
                self.doc_ids.len(),
                self.num_docs
            )));
        }
        let mut seen_ids = HashSet::with_capacity(self.doc_ids.len());
        for (path, &id) in &self.doc_ids {
            if id >= self.num_docs || !seen_ids.insert(id) {
                return Err(Error::corrupt(format!("document {path:?} has invalid or repeated id {id}")));
            }
        }

        if self.index.len() != self.doc_freq.len() {
            return Err(Error::corrupt(format!(
                "{} indexed terms but {} document frequencies",
                self.index.len(),
                self.doc_freq.len()
            )));
        }
        for (token, postings) in &self.index {
            if postings.is_empty() {
                return Err(Error::corrupt(format!("term {token:?} has an empty posting list")));
            }
            match self.doc_freq.get(token) {
                Some(&df) if df as usize == postings.len() => {}
                Some(&df) => {
                    return Err(Error::corrupt(format!(
                        "term {token:?} has document frequency {df} but {} postings",
                        postings.len()
                    )))
                }
                None => return Err(Error::corrupt(format!("term {token:?} has no document frequency"))),
            }
            let mut prev: Option<DocId> = None;
            for p in postings {
                if p.term_freq == 0 || p.doc_id >= self.num_docs {
                    return Err(Error::corrupt(format!("term {token:?} has invalid posting {p:?}")));
                }
                if prev.is_some_and(|prev| prev >= p.doc_id) {
                    return Err(Error::corrupt(format!("postings for term {token:?} are not strictly ascending")));
                }
                prev = Some(p.doc_id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> StoredIndex {
        let mut index = Index::new();
        index.insert("cat".into(), vec![Posting::new(0, 2), Posting::new(1, 1)]);
        let mut doc_freq = DocFreq::new();
        doc_freq.insert("cat".into(), 2);
        let mut doc_ids = HashMap::new();
        doc_ids.insert("a.txt".to_string(), 0);
        doc_ids.insert("b.txt".to_string(), 1);
        StoredIndex::new(index, doc_freq, doc_ids, 2)
    }

    #[test]
    fn valid_index_passes() {
        tiny().validate().unwrap();
        StoredIndex::default().validate().unwrap();
    }

    #[test]
    fn doc_paths_reverse_the_assignment() {
        assert_eq!(tiny().doc_paths(), vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn detects_df_mismatch() {
        let mut idx = tiny();
        idx.doc_freq.insert("cat".into(), 3);
        assert!(matches!(idx.validate(), Err(Error::CorruptIndex(_))));
    }

    #[test]
    fn detects_unsorted_postings() {
        let mut idx = tiny();
        idx.index.get_mut("cat").unwrap().reverse();
        assert!(idx.validate().is_err());
    }

    #[test]
    fn detects_out_of_range_doc() {
        let mut idx = tiny();
        idx.index.get_mut("cat").unwrap().push(Posting::new(7, 1));
        idx.doc_freq.insert("cat".into(), 3);
        assert!(idx.validate().is_err());
    }

    #[test]
    fn detects_empty_posting_list() {
        let mut idx = tiny();
        idx.index.insert("dog".into(), vec![]);
        idx.doc_freq.insert("dog".into(), 0);
        assert!(idx.validate().is_err());
    }
}
