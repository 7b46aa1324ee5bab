//! # Tournament Error Taxonomy
//!
//! Every failure of a lifecycle operation aborts the triggering call with no
//! partial effect and is reported as a distinct, identifiable variant —
//! nothing is coerced to a default value and nothing is retried. The single
//! tolerated failure in the whole protocol is the anchor-registry
//! notification inside resolution, which is swallowed by the caller.

use thiserror::Error;

use summit_core::{Digest, GameIndex, GameType, Timestamp};

use crate::game::GameStatus;

/// Errors raised by tournament lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Re-initialization attempt on a game whose creation timestamp is set.
    #[error("{index} is already initialized")]
    AlreadyInitialized {
        /// The game that was targeted.
        index: GameIndex,
    },

    /// Identity payload has the wrong byte length.
    #[error("identity payload is {actual} bytes, expected exactly {expected}")]
    MalformedIdentity {
        /// Required payload length.
        expected: usize,
        /// Supplied payload length.
        actual: usize,
    },

    /// Identity payload selector or trailer bytes deviate from the single
    /// canonical framing.
    #[error("identity payload framing does not match the canonical layout")]
    MalformedFraming,

    /// A proposal with the same root claim and ancestry fields is already
    /// registered.
    #[error("{index} duplicates the identity of already-registered {existing}")]
    DuplicateIdentity {
        /// The game that was targeted.
        index: GameIndex,
        /// The earlier game carrying the same identity.
        existing: GameIndex,
    },

    /// Duplicate chain is missing its immediate predecessor.
    #[error("duplication counter {counter} has no predecessor at the same position")]
    InvalidDuplicationCounter {
        /// The counter carried by the rejected proposal.
        counter: u64,
    },

    /// Candidate L2 block number falls short of the parent's by less than
    /// the required block count.
    #[error("candidate block {candidate} does not extend parent block {parent} by {required}")]
    UnexpectedRootClaim {
        /// Candidate L2 block number.
        candidate: u64,
        /// Parent's claimed L2 block number.
        parent: u64,
        /// Required block count per proposal.
        required: u64,
    },

    /// Candidate L2 block number overshoots the parent's by more than the
    /// required block count.
    #[error("candidate block {candidate} exceeds parent block {parent} plus {required}")]
    BlockCountExceeded {
        /// Candidate L2 block number.
        candidate: u64,
        /// Parent's claimed L2 block number.
        parent: u64,
        /// Required block count per proposal.
        required: u64,
    },

    /// A required data-availability chunk commitment is absent.
    #[error("data-availability context has no commitment for chunk {chunk}")]
    MissingCommitment {
        /// Index of the absent chunk.
        chunk: u64,
    },

    /// The candidate block's scheduled submission time has not elapsed.
    #[error("block {block_number} may not be proposed before {scheduled}")]
    SubmissionTooEarly {
        /// Candidate L2 block number.
        block_number: u64,
        /// Earliest permitted submission instant.
        scheduled: Timestamp,
    },

    /// Lifecycle-ordering violation: the game is not in progress.
    #[error("{index} is not in progress (status {status})")]
    GameNotInProgress {
        /// The game that was targeted.
        index: GameIndex,
        /// Its actual status.
        status: GameStatus,
    },

    /// Attempted resolution before the parent resolved in the defender's
    /// favor.
    #[error("{index} cannot resolve before its parent {parent}")]
    OutOfOrderResolution {
        /// The game that was targeted.
        index: GameIndex,
        /// Its unresolved parent.
        parent: GameIndex,
    },

    /// Attempted resolution before the challenge window elapsed.
    #[error("challenge clock for {index} has {remaining}s remaining")]
    ClockNotExpired {
        /// The game that was targeted.
        index: GameIndex,
        /// Seconds left on the clock.
        remaining: u64,
    },

    /// A competing sibling was favored by the parent's pruning rule.
    #[error("{index} was not selected by pruning (survivor: {survivor:?})")]
    NotSelectedSurvivor {
        /// The game that was targeted.
        index: GameIndex,
        /// The sibling pruning selected instead, if any.
        survivor: Option<GameIndex>,
    },

    /// A parent reference resolved to an incompatible tournament type.
    #[error("{index} is registered under {actual}, expected {expected}")]
    AncestryTypeMismatch {
        /// The game whose registered type was checked.
        index: GameIndex,
        /// The tournament's configured type tag.
        expected: GameType,
        /// The type tag found in the registry.
        actual: GameType,
    },

    /// A supplied raw commitment does not hash to the recorded chunk digest.
    #[error("commitment for chunk {chunk} hashes to {derived}, recorded digest is {recorded}")]
    CommitmentMismatch {
        /// Chunk index the commitment was checked against.
        chunk: u64,
        /// Versioned digest derived from the supplied commitment.
        derived: Digest,
        /// Digest recorded at initialization.
        recorded: Digest,
    },

    /// No game is registered at the given factory index.
    #[error("no game registered at {index}")]
    UnknownGame {
        /// The index that missed.
        index: GameIndex,
    },

    /// The cryptographic opening-proof primitive reported a failure.
    #[error("opening proof verification failed: {0}")]
    OpeningProofFailure(String),
}
