//! # Content Digests
//!
//! Defines `Digest`, the 32-byte value used for every cryptographic binding
//! in the tournament: claimed output roots, L1 head references, and the
//! per-chunk data-availability commitments a proposal is bound to.
//!
//! ## Versioned Commitment Digests
//!
//! A raw data-availability commitment is bound to a proposal through its
//! *versioned* digest: the SHA-256 of the commitment bytes with the leading
//! byte replaced by a version tag. Verification recomputes the versioned
//! digest from the caller-supplied commitment and compares it against the
//! recorded value before any opening-proof work happens.

use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};

use crate::error::CoreError;

/// Version tag prepended to commitment digests.
pub const COMMITMENT_VERSION: u8 = 0x01;

/// A 32-byte content digest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// The all-zero digest.
    pub const ZERO: Digest = Digest([0u8; 32]);

    /// Construct a digest from raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the SHA-256 digest of arbitrary bytes.
    pub fn sha256(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Parse a digest from a `0x`-prefixed or bare hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.len() != 64 {
            return Err(CoreError::WrongLength {
                expected: 32,
                actual: stripped.len() / 2,
            });
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in bytes.iter_mut().enumerate() {
            *chunk = u8::from_str_radix(&stripped[2 * i..2 * i + 2], 16).map_err(|e| {
                CoreError::MalformedHex {
                    value: s.to_string(),
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(Self(bytes))
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Compute the versioned digest binding a raw data-availability commitment.
///
/// The digest is the SHA-256 of the commitment bytes with the first byte
/// overwritten by [`COMMITMENT_VERSION`]. Chunk commitments are recorded in
/// this form at proposal initialization and compared in this form during
/// intermediate-output verification.
pub fn versioned_commitment_digest(commitment: &[u8]) -> Digest {
    let mut digest = Digest::sha256(commitment);
    digest.0[0] = COMMITMENT_VERSION;
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_deterministic() {
        assert_eq!(Digest::sha256(b"summit"), Digest::sha256(b"summit"));
        assert_ne!(Digest::sha256(b"summit"), Digest::sha256(b"base"));
    }

    #[test]
    fn test_known_sha256_vector() {
        // SHA256("") — verified against Python hashlib.sha256(b"").hexdigest()
        assert_eq!(
            Digest::sha256(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let digest = Digest::sha256(b"roundtrip");
        let parsed = Digest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn test_from_hex_with_prefix() {
        let digest = Digest::sha256(b"prefixed");
        let parsed = Digest::from_hex(&format!("{digest}")).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn test_from_hex_wrong_length() {
        assert!(Digest::from_hex("0xabcd").is_err());
    }

    #[test]
    fn test_versioned_digest_leads_with_version_byte() {
        let digest = versioned_commitment_digest(b"commitment-bytes");
        assert_eq!(digest.0[0], COMMITMENT_VERSION);
    }

    #[test]
    fn test_versioned_digest_differs_from_plain_sha256() {
        let plain = Digest::sha256(b"commitment-bytes");
        let versioned = versioned_commitment_digest(b"commitment-bytes");
        assert_ne!(plain, versioned);
        assert_eq!(plain.0[1..], versioned.0[1..]);
    }

    #[test]
    fn test_display_format() {
        let s = Digest::ZERO.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 2 + 64);
    }

    #[test]
    fn test_serde_roundtrip() {
        let digest = Digest::sha256(b"serde");
        let json = serde_json::to_string(&digest).unwrap();
        let parsed: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(digest, parsed);
    }
}
