//! # Anchor Registry Collaborator
//!
//! The global registry that records the canonical anchor state across the
//! chain of resolved games. Resolution notifies it best-effort: a rejected
//! or failed update is logged and swallowed by the caller, never aborting an
//! otherwise-valid resolution and never re-entering the lifecycle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use summit_core::{Digest, GameIndex};

/// Errors an anchor registry may report. The lifecycle treats every variant
/// as non-fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    /// The registry rejected the update.
    #[error("anchor registry rejected the update: {0}")]
    Rejected(String),
}

/// The canonical anchor state pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorState {
    /// Root claim of the accepted game.
    pub root_claim: Digest,
    /// L2 block number of the accepted game.
    pub l2_block_number: u64,
    /// Factory index of the accepted game.
    pub game_index: GameIndex,
}

/// Best-effort recipient of acceptance notifications.
pub trait AnchorRegistry {
    /// Advance the canonical anchor state pointer to a newly accepted game.
    fn try_update_anchor_state(
        &mut self,
        root_claim: Digest,
        l2_block_number: u64,
        game_index: GameIndex,
    ) -> Result<(), AnchorError>;
}

/// In-memory anchor registry that keeps the highest accepted block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryAnchorRegistry {
    anchor: Option<AnchorState>,
}

impl InMemoryAnchorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current anchor state, if any game has been accepted.
    pub fn anchor(&self) -> Option<&AnchorState> {
        self.anchor.as_ref()
    }
}

impl AnchorRegistry for InMemoryAnchorRegistry {
    fn try_update_anchor_state(
        &mut self,
        root_claim: Digest,
        l2_block_number: u64,
        game_index: GameIndex,
    ) -> Result<(), AnchorError> {
        if let Some(current) = &self.anchor {
            if l2_block_number <= current.l2_block_number {
                return Err(AnchorError::Rejected(format!(
                    "block {l2_block_number} does not advance anchor at {}",
                    current.l2_block_number
                )));
            }
        }
        self.anchor = Some(AnchorState {
            root_claim,
            l2_block_number,
            game_index,
        });
        Ok(())
    }
}
