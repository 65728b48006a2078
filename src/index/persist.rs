//! On-disk form of an [`IndexStore`].
//!
//! ```text
//! "BIDX"  version:u32le  files:uvarint
//!   per file:   path_len:uvarint path:utf8  content_hash:u64le  entries:uvarint
//!   per entry:  key_len:uvarint key  value_len:uvarint value
//! ```
//!
//! Keys and values use the encodings of [`codec`](super::codec). Paths are
//! stored instead of [`FileId`](crate::base::FileId)s and re-interned on load.

use std::path::Path;

use crate::base::FileSet;

use super::codec::{
    decode_key, decode_value, encode_key, encode_value, read_uvarint, write_uvarint,
};
use super::error::IndexError;
use super::extract::IndexEntries;
use super::store::{FileIndex, IndexStore};

const MAGIC: &[u8; 4] = b"BIDX";

/// Result of opening a persisted index.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The stamp matched; entries are usable as-is.
    Loaded(IndexStore),
    /// The stamp did not match; nothing was loaded.
    Discarded { found: u32, expected: u32 },
    /// No index file exists.
    Missing,
}

/// Write `store` to `path`, replacing any previous file.
pub fn save(store: &IndexStore, files: &FileSet, path: &Path) -> Result<(), IndexError> {
    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&store.version().to_le_bytes());

    let snapshot: Vec<_> = store
        .snapshot()
        .into_iter()
        .filter_map(|(file, index)| match files.path(file).and_then(Path::to_str) {
            Some(file_path) => Some((file_path.to_string(), index)),
            None => {
                tracing::warn!("Skipping {} with a non UTF-8 or unknown path", file);
                None
            }
        })
        .collect();

    write_uvarint(&mut out, snapshot.len() as u64);
    for (file_path, index) in &snapshot {
        write_bytes(&mut out, file_path.as_bytes());
        out.extend_from_slice(&index.content_hash().to_le_bytes());
        write_uvarint(&mut out, index.entries().len() as u64);
        for (key, offsets) in index.entries() {
            write_bytes(&mut out, &encode_key(key));
            write_bytes(&mut out, &encode_value(offsets));
        }
    }

    let mut tmp_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    std::fs::write(&tmp, &out)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(
        "Saved {} documents ({} bytes) to {}",
        snapshot.len(),
        out.len(),
        path.display()
    );
    Ok(())
}

/// Read a persisted index, interning its paths into `files`.
///
/// A version other than `expected_version` discards the file without
/// reading further.
pub fn load(
    path: &Path,
    expected_version: u32,
    files: &mut FileSet,
) -> Result<LoadOutcome, IndexError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
        Err(e) => return Err(e.into()),
    };

    if bytes.get(..MAGIC.len()) != Some(MAGIC.as_slice()) {
        return Err(IndexError::BadMagic {
            path: path.to_path_buf(),
        });
    }
    let mut pos = MAGIC.len();
    let found = u32::from_le_bytes(read_array(&bytes, &mut pos)?);
    if found != expected_version {
        tracing::info!(
            "Discarding index {}: version {} != {}",
            path.display(),
            found,
            expected_version
        );
        return Ok(LoadOutcome::Discarded {
            found,
            expected: expected_version,
        });
    }

    let store = IndexStore::new(found);
    let file_count = read_uvarint(&bytes, &mut pos)?;
    for _ in 0..file_count {
        let raw_path = read_bytes(&bytes, &mut pos)?;
        let file_path = std::str::from_utf8(raw_path)
            .map_err(|_| IndexError::corrupt(pos, "document path is not UTF-8"))?;
        let content_hash = u64::from_le_bytes(read_array(&bytes, &mut pos)?);

        let entry_count = read_uvarint(&bytes, &mut pos)?;
        let mut entries = IndexEntries::new();
        for _ in 0..entry_count {
            let key = decode_key(read_bytes(&bytes, &mut pos)?)?;
            let offsets = decode_value(read_bytes(&bytes, &mut pos)?)?;
            entries.insert(key, offsets);
        }

        let file = files.intern(file_path);
        store.replace(file, FileIndex::new(content_hash, entries));
    }

    if pos != bytes.len() {
        return Err(IndexError::corrupt(pos, "trailing bytes"));
    }
    tracing::info!("Loaded index {} with {} documents", path.display(), store.len());
    Ok(LoadOutcome::Loaded(store))
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_uvarint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

fn read_bytes<'b>(bytes: &'b [u8], pos: &mut usize) -> Result<&'b [u8], IndexError> {
    let start = *pos;
    let len = read_uvarint(bytes, pos)?;
    let end = usize::try_from(len)
        .ok()
        .and_then(|len| pos.checked_add(len))
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| IndexError::corrupt(start, "length exceeds file"))?;
    let slice = &bytes[*pos..end];
    *pos = end;
    Ok(slice)
}

fn read_array<const N: usize>(bytes: &[u8], pos: &mut usize) -> Result<[u8; N], IndexError> {
    let slice = bytes
        .get(*pos..*pos + N)
        .ok_or_else(|| IndexError::corrupt(*pos, "unexpected end of file"))?;
    let mut array = [0u8; N];
    array.copy_from_slice(slice);
    *pos += N;
    Ok(array)
}
