//! Content fingerprinting for "already uploaded" detection
//!
//! Rolling 32-bit string hash (`h = h * 31 + c`, wrapping) over the UTF-16
//! code units of the file's text, rendered as a signed decimal string. Fast,
//! single pass, stable across platforms, and compatible with fingerprints
//! already stored in existing registries. Not a security primitive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fingerprint token identifying a file's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint of a file's full text content
pub fn fingerprint(text: &str) -> Fingerprint {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        // (hash << 5) - hash == hash * 31
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    Fingerprint(hash.to_string())
}

/// Fingerprint of raw file bytes, decoded as (lossy) UTF-8 text
pub fn fingerprint_bytes(bytes: &[u8]) -> Fingerprint {
    fingerprint(&String::from_utf8_lossy(bytes))
}
