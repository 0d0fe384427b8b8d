//! Posting list construction from a globally sorted `(token, doc_id)` stream.

use crate::index::{DocFreq, DocId, Index, Posting, PostingList, Token};

/// Running state of the single pass over the sorted pairs.
struct Accumulator {
    index: Index,
    doc_freq: DocFreq,
    /// Token whose posting list is currently open.
    token: Option<Token>,
    postings: PostingList,
    /// Open posting: document and occurrences seen so far.
    doc: DocId,
    count: u32,
}

impl Accumulator {
    fn new() -> Self {
        Self { index: Index::new(), doc_freq: DocFreq::new(), token: None, postings: Vec::new(), doc: 0, count: 0 }
    }

    fn push(mut self, token: Token, doc: DocId) -> Self {
        match self.token.as_deref() {
            Some(current) if current == token => {
                if doc == self.doc {
                    self.count += 1;
                } else {
                    debug_assert!(doc > self.doc, "pairs for {token:?} are not sorted by doc id");
                    self.close_posting();
                    self.doc = doc;
                    self.count = 1;
                }
            }
            current => {
                debug_assert!(current.map_or(true, |c| c < token.as_str()), "pairs are not sorted by token");
                self.close_token();
                self.token = Some(token);
                self.doc = doc;
                self.count = 1;
            }
        }
        self
    }

    fn close_posting(&mut self) {
        self.postings.push(Posting::new(self.doc, self.count));
    }

    fn close_token(&mut self) {
        if let Some(token) = self.token.take() {
            self.close_posting();
            let postings = std::mem::take(&mut self.postings);
            self.doc_freq.insert(token.clone(), postings.len() as u32);
            self.index.insert(token, postings);
        }
    }

    fn finish(mut self) -> (Index, DocFreq) {
        self.close_token();
        (self.index, self.doc_freq)
    }
}

/// Build the index and document frequencies in one pass.
///
/// `sorted_pairs` must be ordered by token, then by doc id (see
/// [`sort_pairs`]). Unsorted input produces a wrong grouping; it is only
/// checked by debug assertions.
pub fn build_index<I>(sorted_pairs: I) -> (Index, DocFreq)
where
    I: IntoIterator<Item = (Token, DocId)>,
{
    sorted_pairs
        .into_iter()
        .fold(Accumulator::new(), |acc, (token, doc)| acc.push(token, doc))
        .finish()
}

/// Sort pairs into the order `build_index` requires.
pub fn sort_pairs(pairs: &mut [(Token, DocId)]) {
    pairs.sort_unstable();
}

/// Flatten per-document token streams into sorted `(token, doc_id)` pairs.
pub fn collect_pairs<I>(docs: I) -> Vec<(Token, DocId)>
where
    I: IntoIterator<Item = (DocId, Vec<Token>)>,
{
    let mut pairs: Vec<(Token, DocId)> = docs
        .into_iter()
        .flat_map(|(doc, tokens)| tokens.into_iter().map(move |t| (t, doc)))
        .collect();
    sort_pairs(&mut pairs);
    pairs
}
