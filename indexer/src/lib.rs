pub mod pipeline;
pub mod source;

pub use pipeline::{build_index_dir, index_stats, BuildOptions, BuildReport, IndexStats};
