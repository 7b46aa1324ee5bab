//! # Deployment Configuration
//!
//! Immutable, constructor-set parameters of one tournament deployment. Every
//! timing and sizing rule of the lifecycle state machine is derived from
//! these constants; nothing about them changes after construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use summit_core::{Address, Digest, GameType, Timestamp};

/// Errors from configuration validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The data-availability chunk size must be a power of two.
    #[error("chunk size must be a power of two, got {0}")]
    ChunkSizeNotPowerOfTwo(u64),

    /// A parameter that must be non-zero was zero.
    #[error("{0} must be non-zero")]
    ZeroParameter(&'static str),
}

/// Immutable deployment parameters of a tournament node.
///
/// Fixed at construction and never mutated. The derived chunk requirement
/// ([`GameConfig::required_chunks()`]) and the scheduled submission time of
/// any candidate block follow deterministically from these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Identifier of the proving program whose proofs this tournament
    /// accepts.
    pub verifier_image_id: Digest,
    /// Hash of the rollup configuration the proving program is bound to.
    pub config_hash: Digest,
    /// Fixed number of L2 blocks covered by each proposal.
    pub block_count: u64,
    /// Tournament type tag; parents must carry the same tag.
    pub game_type: GameType,
    /// Account credited with forfeited bonds.
    pub treasury: Address,
    /// Wall-clock time of the L2 genesis block.
    pub genesis_timestamp: Timestamp,
    /// Seconds between consecutive L2 blocks.
    pub l2_block_time: u64,
    /// Extra seconds a candidate block must age before it may be proposed.
    pub proposal_time_gap: u64,
    /// Maximum challenge-clock duration in seconds.
    pub max_clock_duration: u64,
    /// Intermediate outputs per data-availability chunk (power of two).
    pub chunk_size: u64,
}

impl GameConfig {
    /// Validate the deployment parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_count == 0 {
            return Err(ConfigError::ZeroParameter("block_count"));
        }
        if self.l2_block_time == 0 {
            return Err(ConfigError::ZeroParameter("l2_block_time"));
        }
        if self.max_clock_duration == 0 {
            return Err(ConfigError::ZeroParameter("max_clock_duration"));
        }
        if self.chunk_size == 0 || !self.chunk_size.is_power_of_two() {
            return Err(ConfigError::ChunkSizeNotPowerOfTwo(self.chunk_size));
        }
        Ok(())
    }

    /// Number of data-availability chunks each proposal must commit to:
    /// `ceil(block_count / chunk_size)`.
    pub fn required_chunks(&self) -> u64 {
        self.block_count.div_ceil(self.chunk_size)
    }

    /// Earliest wall-clock instant at which a proposal claiming
    /// `l2_block_number` may be submitted: the block's scheduled production
    /// time plus the configured gap.
    pub fn scheduled_submission_time(&self, l2_block_number: u64) -> Timestamp {
        let offset = self
            .l2_block_time
            .saturating_mul(l2_block_number)
            .saturating_add(self.proposal_time_gap);
        self.genesis_timestamp.plus_secs(offset)
    }
}
