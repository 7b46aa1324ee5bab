//! # Proposal Identity Payload
//!
//! The immutable identity of a proposal is a fixed-layout byte record fixed
//! at creation: who proposed, what root is claimed, which L1 head it was
//! derived from, and the three ancestry fields that place it in the
//! tournament tree. Two proposals with the same decoded fields but different
//! encodings would carry different identity hashes, so the layout admits
//! exactly one encoding: a fixed selector, the fields at fixed offsets, and
//! a fixed two-byte trailer. Any payload of a different length is rejected
//! outright at initialization.
//!
//! ## Layout
//!
//! ```text
//! offset  size  field
//!      0     4  selector (fixed)
//!      4    20  creator address
//!     24    32  claimed root digest
//!     56    32  L1 head digest
//!     88     8  candidate L2 block number (big-endian)
//!     96     8  parent game index (big-endian)
//!    104     8  duplication counter (big-endian)
//!    112     2  trailer (fixed: byte length of the embedded fields)
//! ```

use serde::{Deserialize, Serialize};

use summit_core::{Address, Digest, GameIndex};

use crate::error::GameError;

/// Fixed selector prefixing every identity payload.
pub const SELECTOR: [u8; 4] = [0x81, 0x29, 0xfc, 0x1c];

/// Fixed trailer: big-endian byte length of the embedded fields
/// (20 + 32 + 32 + 24 = 108).
pub const TRAILER: [u8; 2] = [0x00, 0x6c];

/// Total encoded payload length. Any other length is rejected.
pub const ENCODED_LEN: usize = 4 + 20 + 32 + 32 + 8 + 8 + 8 + 2;

const CREATOR_OFFSET: usize = 4;
const ROOT_CLAIM_OFFSET: usize = 24;
const L1_HEAD_OFFSET: usize = 56;
const BLOCK_NUMBER_OFFSET: usize = 88;
const PARENT_INDEX_OFFSET: usize = 96;
const DUPLICATION_OFFSET: usize = 104;

/// The ancestry fields placing a proposal in the tournament tree.
///
/// Two proposals occupy the same tree position when their claimed roots and
/// ancestry fields match except for the duplication counter; duplicate
/// chains are ordered by that counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AncestryFields {
    /// Candidate L2 block number.
    pub l2_block_number: u64,
    /// Factory index of the parent game.
    pub parent_index: GameIndex,
    /// Position within a duplicate chain (0 for the first proposal).
    pub duplication_counter: u64,
}

/// Decoded proposal identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalIdentity {
    /// Account that created the proposal; the bond refund target.
    pub creator: Address,
    /// Claimed output root after the proposed state advancement.
    pub root_claim: Digest,
    /// L1 head reference the proposal was derived from.
    pub l1_head: Digest,
    /// Candidate L2 block number.
    pub l2_block_number: u64,
    /// Factory index of the parent game.
    pub parent_index: GameIndex,
    /// Position within a duplicate chain.
    pub duplication_counter: u64,
}

impl ProposalIdentity {
    /// Encode the identity into its single canonical byte layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ENCODED_LEN);
        out.extend_from_slice(&SELECTOR);
        out.extend_from_slice(self.creator.as_bytes());
        out.extend_from_slice(self.root_claim.as_bytes());
        out.extend_from_slice(self.l1_head.as_bytes());
        out.extend_from_slice(&self.l2_block_number.to_be_bytes());
        out.extend_from_slice(&self.parent_index.as_u64().to_be_bytes());
        out.extend_from_slice(&self.duplication_counter.to_be_bytes());
        out.extend_from_slice(&TRAILER);
        out
    }

    /// Decode an identity payload, rejecting any byte length other than
    /// [`ENCODED_LEN`] and any framing bytes other than [`SELECTOR`] and
    /// [`TRAILER`].
    pub fn decode(bytes: &[u8]) -> Result<Self, GameError> {
        if bytes.len() != ENCODED_LEN {
            return Err(GameError::MalformedIdentity {
                expected: ENCODED_LEN,
                actual: bytes.len(),
            });
        }
        if bytes[..4] != SELECTOR || bytes[ENCODED_LEN - 2..] != TRAILER {
            return Err(GameError::MalformedFraming);
        }
        let mut creator = [0u8; 20];
        creator.copy_from_slice(&bytes[CREATOR_OFFSET..CREATOR_OFFSET + 20]);
        let mut root_claim = [0u8; 32];
        root_claim.copy_from_slice(&bytes[ROOT_CLAIM_OFFSET..ROOT_CLAIM_OFFSET + 32]);
        let mut l1_head = [0u8; 32];
        l1_head.copy_from_slice(&bytes[L1_HEAD_OFFSET..L1_HEAD_OFFSET + 32]);
        Ok(Self {
            creator: Address::new(creator),
            root_claim: Digest::new(root_claim),
            l1_head: Digest::new(l1_head),
            l2_block_number: read_u64(bytes, BLOCK_NUMBER_OFFSET),
            parent_index: GameIndex::new(read_u64(bytes, PARENT_INDEX_OFFSET)),
            duplication_counter: read_u64(bytes, DUPLICATION_OFFSET),
        })
    }

    /// The ancestry fields of this identity.
    pub fn ancestry(&self) -> AncestryFields {
        AncestryFields {
            l2_block_number: self.l2_block_number,
            parent_index: self.parent_index,
            duplication_counter: self.duplication_counter,
        }
    }

    /// The ancestry fields of the immediate duplicate-chain predecessor,
    /// or `None` when the counter is zero.
    pub fn predecessor_ancestry(&self) -> Option<AncestryFields> {
        let counter = self.duplication_counter.checked_sub(1)?;
        Some(AncestryFields {
            l2_block_number: self.l2_block_number,
            parent_index: self.parent_index,
            duplication_counter: counter,
        })
    }
}

/// Projection of the parent-index field from a raw payload.
///
/// Fixed-offset read of the immutable identity bytes — deterministic and
/// available before initialization. `None` when the payload is too short to
/// carry the field.
pub fn parent_index_of(payload: &[u8]) -> Option<GameIndex> {
    if payload.len() < PARENT_INDEX_OFFSET + 8 {
        return None;
    }
    Some(GameIndex::new(read_u64(payload, PARENT_INDEX_OFFSET)))
}

/// Projection of the duplication-counter field from a raw payload.
pub fn duplication_counter_of(payload: &[u8]) -> Option<u64> {
    if payload.len() < DUPLICATION_OFFSET + 8 {
        return None;
    }
    Some(read_u64(payload, DUPLICATION_OFFSET))
}

fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_be_bytes(buf)
}
