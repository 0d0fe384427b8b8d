//! Flat AND/OR boolean queries evaluated by merging posting lists.
//!
//! A query is `term (OP term)*` with `OP` one of the literal, case-sensitive
//! words `AND` and `OR`. There is no precedence: the chain is grouped from
//! the right, so `a OR b AND c` means `a OR (b AND c)`.
//!
//! A term missing from the index matches no documents; it is never an error.

use std::fmt;

use crate::error::{Error, Result};
use crate::index::{doc_ids_of, DocId, Index};
use crate::merge::{intersect, union};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "AND" => Some(Operator::And),
            "OR" => Some(Operator::Or),
            _ => None,
        }
    }

    pub fn apply(self, left: &[DocId], right: &[DocId]) -> Vec<DocId> {
        match self {
            Operator::And => intersect(left, right),
            Operator::Or => union(left, right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        })
    }
}

/// A parsed query: `ops[i]` joins `terms[i]` and `terms[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanQuery {
    terms: Vec<String>,
    ops: Vec<Operator>,
}

impl BooleanQuery {
    /// Parse whitespace-split query tokens. `Ok(None)` for an empty query.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Option<Self>> {
        if tokens.is_empty() {
            return Ok(None);
        }
        if tokens.len() % 2 == 0 {
            return Err(Error::malformed(
                tokens.len(),
                format!("expected a term after {:?}", tokens[tokens.len() - 1].as_ref()),
            ));
        }
        let mut terms = Vec::with_capacity(tokens.len() / 2 + 1);
        let mut ops = Vec::with_capacity(tokens.len() / 2);
        for (position, token) in tokens.iter().map(AsRef::as_ref).enumerate() {
            if position % 2 == 0 {
                if Operator::parse(token).is_some() {
                    return Err(Error::malformed(position, format!("expected a term, found operator {token}")));
                }
                terms.push(token.to_string());
            } else {
                let op = Operator::parse(token)
                    .ok_or_else(|| Error::malformed(position, format!("expected AND or OR, found {token:?}")))?;
                ops.push(op);
            }
        }
        Ok(Some(Self { terms, ops }))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn operators(&self) -> &[Operator] {
        &self.ops
    }

    /// Rewrite every term, e.g. to apply the document normalization.
    /// Terms mapped to `None` can never match.
    pub fn map_terms<F>(self, mut f: F) -> ResolvedQuery
    where
        F: FnMut(&str) -> Option<String>,
    {
        ResolvedQuery {
            terms: self.terms.iter().map(|t| f(t.as_str())).collect(),
            ops: self.ops,
        }
    }

    pub fn evaluate(&self, index: &Index) -> Vec<DocId> {
        fold_right(self.terms.iter().map(|t| Some(t.as_str())), &self.ops, index)
    }
}

/// A query whose terms have been rewritten; dropped terms match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    terms: Vec<Option<String>>,
    ops: Vec<Operator>,
}

impl ResolvedQuery {
    pub fn terms(&self) -> &[Option<String>] {
        &self.terms
    }

    pub fn evaluate(&self, index: &Index) -> Vec<DocId> {
        fold_right(self.terms.iter().map(Option::as_deref), &self.ops, index)
    }
}

fn lookup(term: Option<&str>, index: &Index) -> Vec<DocId> {
    match term.and_then(|t| index.get(t)) {
        Some(postings) => doc_ids_of(postings),
        None => {
            tracing::debug!(term = term.unwrap_or(""), "term not in index");
            Vec::new()
        }
    }
}

/// Combine from the rightmost term leftwards: `acc = op_i(term_i, acc)`.
fn fold_right<'a, I>(terms: I, ops: &[Operator], index: &Index) -> Vec<DocId>
where
    I: DoubleEndedIterator<Item = Option<&'a str>>,
{
    let mut terms = terms.rev();
    let mut acc = match terms.next() {
        Some(last) => lookup(last, index),
        None => return Vec::new(),
    };
    for (term, op) in terms.zip(ops.iter().rev()) {
        acc = op.apply(&lookup(term, index), &acc);
    }
    acc
}

/// Evaluate already-split query tokens against `index`.
pub fn evaluate<S: AsRef<str>>(query_tokens: &[S], index: &Index) -> Result<Vec<DocId>> {
    Ok(BooleanQuery::parse(query_tokens)?
        .map(|q| q.evaluate(index))
        .unwrap_or_default())
}

/// Split `query` on whitespace and evaluate it.
pub fn run_boolean_query(query: &str, index: &Index) -> Result<Vec<DocId>> {
    let tokens: Vec<&str> = query.split_whitespace().collect();
    evaluate(&tokens, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Posting;

    fn index_of(entries: &[(&str, &[DocId])]) -> Index {
        entries
            .iter()
            .map(|(t, ids)| (t.to_string(), ids.iter().map(|&d| Posting::new(d, 1)).collect()))
            .collect()
    }

    #[test]
    fn parses_chain() {
        let q = BooleanQuery::parse(&["a", "AND", "b", "OR", "c"]).unwrap().unwrap();
        assert_eq!(q.terms(), &["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(q.operators(), &[Operator::And, Operator::Or]);
    }

    #[test]
    fn empty_query_is_empty_result() {
        let index = index_of(&[("a", &[1])]);
        assert!(run_boolean_query("   ", &index).unwrap().is_empty());
    }

    #[test]
    fn even_length_is_malformed() {
        let index = index_of(&[("a", &[1])]);
        let err = run_boolean_query("a AND", &index).unwrap_err();
        assert!(matches!(err, Error::MalformedQuery { position: 2, .. }));
    }

    #[test]
    fn operator_must_be_uppercase() {
        let index = index_of(&[("a", &[1]), ("b", &[1])]);
        let err = run_boolean_query("a and b", &index).unwrap_err();
        assert!(matches!(err, Error::MalformedQuery { position: 1, .. }));
    }

    #[test]
    fn operator_in_term_position_is_malformed() {
        let index = index_of(&[("a", &[1])]);
        assert!(run_boolean_query("AND OR a", &index).is_err());
    }

    #[test]
    fn right_grouping() {
        // a OR (b AND c) = [1, 2]; (a OR b) AND c would be [2]
        let index = index_of(&[("a", &[1]), ("b", &[2, 3]), ("c", &[2])]);
        assert_eq!(run_boolean_query("a OR b AND c", &index).unwrap(), vec![1, 2]);
    }

    #[test]
    fn unknown_term_in_chain() {
        let index = index_of(&[("a", &[1, 2])]);
        assert_eq!(run_boolean_query("a OR missing", &index).unwrap(), vec![1, 2]);
        assert!(run_boolean_query("a AND missing", &index).unwrap().is_empty());
    }

    #[test]
    fn mapped_terms_can_drop_out() {
        let index = index_of(&[("duck", &[1, 4]), ("water", &[1, 2, 4])]);
        let q = BooleanQuery::parse(&["Ducks", "OR", "the"]).unwrap().unwrap();
        let resolved = q.map_terms(|t| match t {
            "Ducks" => Some("duck".to_string()),
            _ => None,
        });
        assert_eq!(resolved.terms(), &[Some("duck".to_string()), None]);
        assert_eq!(resolved.evaluate(&index), vec![1, 4]);
    }
}
