use boolidx_core::persist::{load_index, load_meta, IndexPaths};
use boolidx_core::run_boolean_query;
use boolidx_core::tokenizer::TOKENIZER_VERSION;
use boolidx_indexer::{build_index_dir, index_stats, BuildOptions};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_corpus(root: &Path) {
    fs::create_dir_all(root.join("g1")).unwrap();
    fs::create_dir_all(root.join("g2")).unwrap();
    fs::write(root.join("g1/a.txt"), "Ducks swim in the water.").unwrap();
    fs::write(root.join("g1/b.txt"), "The water plan was recorded.").unwrap();
    fs::write(root.join("g2/c.txt"), "Ducks, ducks and more ducks!").unwrap();
}

fn options(input: &Path, output: &Path) -> BuildOptions {
    BuildOptions { input: input.to_path_buf(), output: output.to_path_buf(), expected_terms: None }
}

#[test]
fn builds_and_persists_a_corpus() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    let out = dir.path().join("index");
    write_corpus(&corpus);

    let report = build_index_dir(&options(&corpus, &out)).unwrap();
    assert_eq!(report.num_docs, 3);
    // duck swim water | water plan record | duck duck duck
    assert_eq!(report.num_pairs, 9);
    assert_eq!(report.num_terms, 5);

    let stored = load_index(&IndexPaths::new(&out)).unwrap();
    assert_eq!(stored.num_docs, 3);
    assert_eq!(stored.doc_ids["g1/a.txt"], 0);
    assert_eq!(stored.doc_ids["g2/c.txt"], 2);
    let duck = &stored.index["duck"];
    assert_eq!(duck.iter().map(|p| (p.doc_id, p.term_freq)).collect::<Vec<_>>(), vec![(0, 1), (2, 3)]);
    assert_eq!(stored.doc_freq["water"], 2);

    assert_eq!(run_boolean_query("duck AND water", &stored.index).unwrap(), vec![0]);

    let meta = load_meta(&IndexPaths::new(&out)).unwrap();
    assert_eq!(meta.num_docs, 3);
    assert_eq!(meta.num_terms, 5);
    assert_eq!(meta.tokenizer, TOKENIZER_VERSION);
}

#[test]
fn expected_term_count_guards_the_build() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    let out = dir.path().join("index");
    write_corpus(&corpus);

    let mut opts = options(&corpus, &out);
    opts.expected_terms = Some(4);
    assert!(build_index_dir(&opts).is_err());
    assert!(!out.join("index.bin").exists());

    opts.expected_terms = Some(5);
    build_index_dir(&opts).unwrap();
    assert!(out.join("index.bin").exists());
}

#[test]
fn empty_corpus_builds_empty_index() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    fs::create_dir_all(&corpus).unwrap();
    let out = dir.path().join("index");

    let report = build_index_dir(&options(&corpus, &out)).unwrap();
    assert_eq!(report.num_terms, 0);
    let stored = load_index(&IndexPaths::new(&out)).unwrap();
    assert!(stored.index.is_empty());
}

#[test]
fn stats_rank_terms_by_document_frequency() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    let out = dir.path().join("index");
    write_corpus(&corpus);
    build_index_dir(&options(&corpus, &out)).unwrap();

    let stats = index_stats(&out, 2).unwrap();
    assert_eq!(stats.num_postings, 7);
    let top: Vec<(&str, u32, u64)> =
        stats.top_terms.iter().map(|t| (t.term.as_str(), t.doc_freq, t.total_freq)).collect();
    assert_eq!(top, vec![("duck", 2, 4), ("water", 2, 2)]);
}
