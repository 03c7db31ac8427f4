//! Opaque cursor and global ID encoding.
//!
//! A cursor is the base64 form of `"{kind}:{key}"`, the same shape the API
//! uses for node IDs, so an edge cursor and its node's `id` are identical.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::CursorDecodeError;

/// Decoded cursor: the position of one entity within an ordered set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub kind: String,
    pub key: u64,
}

impl Anchor {
    pub fn new(kind: impl Into<String>, key: u64) -> Self {
        Self {
            kind: kind.into(),
            key,
        }
    }

    pub fn encode(&self) -> String {
        CursorCodec::encode(&self.kind, self.key)
    }
}

/// Cursor encoding/decoding
pub struct CursorCodec;

impl CursorCodec {
    /// Encode an entity position to an opaque cursor
    pub fn encode(kind: &str, key: u64) -> String {
        BASE64.encode(format!("{kind}:{key}").as_bytes())
    }

    /// Decode a cursor without checking which kind it refers to
    pub fn decode(cursor: &str) -> Result<Anchor, CursorDecodeError> {
        let bytes = BASE64
            .decode(cursor.as_bytes())
            .map_err(|e| CursorDecodeError::InvalidBase64(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|_| CursorDecodeError::InvalidUtf8)?;

        let (kind, key) = text
            .rsplit_once(':')
            .ok_or(CursorDecodeError::MissingSeparator)?;
        if kind.is_empty() {
            return Err(CursorDecodeError::EmptyKind);
        }
        let key = key
            .parse::<u64>()
            .map_err(|_| CursorDecodeError::InvalidKey(key.to_string()))?;

        Ok(Anchor::new(kind, key))
    }

    /// Decode a cursor that must point at an entity of `expected` kind
    pub fn decode_for(cursor: &str, expected: &str) -> Result<Anchor, CursorDecodeError> {
        let anchor = Self::decode(cursor)?;
        if anchor.kind != expected {
            return Err(CursorDecodeError::KindMismatch {
                expected: expected.to_string(),
                found: anchor.kind,
            });
        }
        Ok(anchor)
    }
}

/// Relay global ID of a node. Same codec as cursors.
pub fn to_global_id(kind: &str, key: u64) -> String {
    CursorCodec::encode(kind, key)
}

pub fn from_global_id(id: &str) -> Result<Anchor, CursorDecodeError> {
    CursorCodec::decode(id)
}
