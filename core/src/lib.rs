pub mod builder;
pub mod error;
pub mod index;
pub mod merge;
pub mod persist;
pub mod query;
pub mod tokenizer;

pub use builder::{build_index, collect_pairs, sort_pairs};
pub use error::{Error, Result};
pub use index::{DocFreq, DocId, Index, Posting, PostingList, StoredIndex, Token};
pub use merge::{intersect, union};
pub use query::{evaluate, run_boolean_query, BooleanQuery, Operator};
