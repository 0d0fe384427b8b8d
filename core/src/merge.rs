//! Two-pointer merges over ascending, duplicate-free doc id lists.

use crate::index::DocId;
use std::cmp::Ordering;

/// Doc ids present in both `a` and `b`, ascending.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    out
}

/// Doc ids present in either `a` or `b`, ascending, each once.
pub fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
        }
    }
    // at most one of these is non-empty
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_basic() {
        assert_eq!(intersect(&[1, 4], &[1, 2, 4]), vec![1, 4]);
        assert_eq!(intersect(&[1, 3, 5], &[2, 4, 6]), Vec::<DocId>::new());
        assert_eq!(intersect(&[], &[1, 2]), Vec::<DocId>::new());
    }

    #[test]
    fn union_basic() {
        assert_eq!(union(&[2], &[3]), vec![2, 3]);
        assert_eq!(union(&[1, 3, 5], &[2, 3, 9, 10]), vec![1, 2, 3, 5, 9, 10]);
        assert_eq!(union(&[], &[7]), vec![7]);
        assert_eq!(union(&[4, 8], &[]), vec![4, 8]);
    }

    #[test]
    fn identical_inputs() {
        let a = [0, 5, 6];
        assert_eq!(intersect(&a, &a), a.to_vec());
        assert_eq!(union(&a, &a), a.to_vec());
    }
}
