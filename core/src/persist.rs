//! On-disk form of a [`StoredIndex`].
//!
//! An index directory holds `index.bin` (the blob produced by [`encode`]) and
//! a human-readable `meta.json`. Blob layout:
//!
//! ```text
//! b"BIDX" | format version: u32 LE | crc32 of payload: u32 LE | bincode payload
//! ```

use crate::error::{Error, Result};
use crate::index::StoredIndex;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 4] = b"BIDX";
pub const FORMAT_VERSION: u32 = 1;
const HEADER_LEN: usize = MAGIC.len() + 4 + 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u64,
    pub created_at: String,
    pub version: u32,
    /// Tokenizer version the index was built with.
    pub tokenizer: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index(&self) -> PathBuf { self.root.join("index.bin") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn encode(stored: &StoredIndex) -> Result<Vec<u8>> {
    let payload = bincode::serialize(stored)?;
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(word)
}

/// Decode and validate a blob. Any damage is an error, never a partial index.
pub fn decode(bytes: &[u8]) -> Result<StoredIndex> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::corrupt(format!("blob is {} bytes, shorter than the header", bytes.len())));
    }
    if &bytes[..4] != MAGIC {
        return Err(Error::corrupt("missing index magic"));
    }
    let version = read_u32(&bytes[4..8]);
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion { found: version, supported: FORMAT_VERSION });
    }
    let expected = read_u32(&bytes[8..12]);
    let payload = &bytes[HEADER_LEN..];
    let actual = crc32fast::hash(payload);
    if expected != actual {
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    let mut cursor = payload;
    let stored: StoredIndex = bincode::deserialize_from(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(Error::corrupt(format!("{} trailing bytes after index payload", cursor.len())));
    }
    stored.validate()?;
    Ok(stored)
}

pub fn save_index(paths: &IndexPaths, stored: &StoredIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    let bytes = encode(stored)?;
    let mut f = File::create(paths.index())?;
    f.write_all(&bytes)?;
    f.sync_all()?;
    tracing::debug!(path = %paths.index().display(), bytes = bytes.len(), "wrote index blob");
    Ok(())
}

pub fn load_index(paths: &IndexPaths) -> Result<StoredIndex> {
    let mut f = File::open(paths.index())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    decode(&buf)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}
