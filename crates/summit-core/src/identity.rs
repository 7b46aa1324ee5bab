//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the tournament's identifier namespaces. These
//! prevent accidental identifier confusion — you cannot pass a `GameIndex`
//! where a `GameType` tag is expected, and an `Address` is never a bare
//! byte slice.
//!
//! ## Security Invariant
//!
//! The factory registry is type-erased: it stores games of every tournament
//! type side by side. Type-level distinction between the index namespace and
//! the type-tag namespace keeps lookups honest at every call site.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A 20-byte account address (proposer, treasury, or creator identity).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Construct an address from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parse an address from a `0x`-prefixed or bare hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = decode_hex(stripped)?;
        if bytes.len() != 20 {
            return Err(CoreError::WrongLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Whether this is the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render as a lowercase `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        let body: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{body}")
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Index of a game instance in the global factory registry.
///
/// Indices are assigned sequentially at creation and never reused. The
/// anchor instance of a tournament always occupies the first index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct GameIndex(pub u64);

impl GameIndex {
    /// Construct a game index.
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// The raw index value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game:{}", self.0)
    }
}

/// Tournament type tag distinguishing incompatible game implementations
/// registered with the same factory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct GameType(pub u32);

impl GameType {
    /// Construct a game type tag.
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// The raw tag value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "type:{}", self.0)
    }
}

/// Decode a bare hex string into bytes.
fn decode_hex(s: &str) -> Result<Vec<u8>, CoreError> {
    if s.len() % 2 != 0 {
        return Err(CoreError::MalformedHex {
            value: s.to_string(),
            reason: "odd number of hex digits".to_string(),
        });
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| CoreError::MalformedHex {
                value: s.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
