//! Byte encodings of keys and offset lists.
//!
//! ```text
//! key    := ordinal:u8 [ len:uvarint utf8 ]      payload only for ByName/ByType/Alias
//! value  := zigzag(-(N + 1))                     exactly one offset N
//!         | zigzag(count) uvarint*               any other length
//! ```
//!
//! A single offset is by far the most common value, so it gets one varint
//! and no length field. The bias keeps `N = 0` distinct from an empty list.

use thiserror::Error;

use super::keys::{IndexKey, KeyCategory};

/// Errors raised while decoding keys or values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),

    #[error("unknown key category {0}")]
    UnknownCategory(u8),

    #[error("varint overflow at byte {0}")]
    Overflow(usize),

    #[error("invalid UTF-8 in key payload")]
    Utf8,

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

// ============================================================================
// VARINTS
// ============================================================================

pub(crate) fn write_uvarint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

pub(crate) fn read_uvarint(bytes: &[u8], pos: &mut usize) -> Result<u64, CodecError> {
    let start = *pos;
    let mut result = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = *bytes.get(*pos).ok_or(CodecError::UnexpectedEof(*pos))?;
        *pos += 1;
        if shift >= 64 || (shift == 63 && byte > 1) {
            return Err(CodecError::Overflow(start));
        }
        result |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
    }
}

fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

fn read_u32(bytes: &[u8], pos: &mut usize) -> Result<u32, CodecError> {
    let start = *pos;
    let value = read_uvarint(bytes, pos)?;
    u32::try_from(value).map_err(|_| CodecError::Overflow(start))
}

// ============================================================================
// KEYS
// ============================================================================

/// Encode a key.
pub fn encode_key(key: &IndexKey) -> Vec<u8> {
    let category = key.category();
    if category.is_singleton() {
        return vec![category.ordinal()];
    }
    let payload = key.payload().as_bytes();
    let mut out = Vec::with_capacity(payload.len() + 3);
    out.push(category.ordinal());
    write_uvarint(&mut out, payload.len() as u64);
    out.extend_from_slice(payload);
    out
}

/// Decode a key.
///
/// Singleton-keyed categories decode to their one key whatever follows the
/// ordinal. Bytes after a payload are ignored.
pub fn decode_key(bytes: &[u8]) -> Result<IndexKey, CodecError> {
    let ordinal = *bytes.first().ok_or(CodecError::UnexpectedEof(0))?;
    let category = KeyCategory::from_ordinal(ordinal).ok_or(CodecError::UnknownCategory(ordinal))?;
    if category.is_singleton() {
        return Ok(IndexKey::singleton(category));
    }

    let mut pos = 1;
    let len = read_uvarint(bytes, &mut pos)?;
    let end = usize::try_from(len)
        .ok()
        .and_then(|len| pos.checked_add(len))
        .ok_or(CodecError::Overflow(1))?;
    let payload = bytes.get(pos..end).ok_or(CodecError::UnexpectedEof(bytes.len()))?;
    let payload = std::str::from_utf8(payload).map_err(|_| CodecError::Utf8)?;
    Ok(IndexKey::new(category, payload))
}

// ============================================================================
// VALUES
// ============================================================================

/// Encode an offset list.
pub fn encode_value(offsets: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + offsets.len() * 3);
    match offsets {
        [single] => write_uvarint(&mut out, zigzag(-(i64::from(*single) + 1))),
        _ => {
            write_uvarint(&mut out, zigzag(offsets.len() as i64));
            for &offset in offsets {
                write_uvarint(&mut out, u64::from(offset));
            }
        }
    }
    out
}

/// Decode an offset list.
pub fn decode_value(bytes: &[u8]) -> Result<Vec<u32>, CodecError> {
    let mut pos = 0;
    let header = unzigzag(read_uvarint(bytes, &mut pos)?);

    let offsets = if header < 0 {
        let single = u32::try_from(-(header + 1)).map_err(|_| CodecError::Overflow(0))?;
        vec![single]
    } else {
        // Every element takes at least one byte.
        let count = usize::try_from(header)
            .ok()
            .filter(|&count| count <= bytes.len() - pos)
            .ok_or(CodecError::UnexpectedEof(bytes.len()))?;
        let mut offsets = Vec::with_capacity(count);
        for _ in 0..count {
            offsets.push(read_u32(bytes, &mut pos)?);
        }
        offsets
    };

    if pos != bytes.len() {
        return Err(CodecError::TrailingBytes(bytes.len() - pos));
    }
    Ok(offsets)
}
