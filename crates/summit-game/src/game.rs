//! # Game Lifecycle State Machine
//!
//! Orchestrates the life of one proposal: creation as an empty registry
//! entry, a single initialization that validates its identity and anchors it
//! to its parent, an open challenge period gated by the chess clock, and a
//! terminal one-way resolution.
//!
//! ## States
//!
//! ```text
//! Uninitialized ──initialize()──▶ InProgress ──resolve()──▶ DefenderWins
//!                                     │
//!                                     └──eliminate()──▶ ChallengerWins
//! ```
//!
//! ## Design Choice: Validated Enum over Typestate
//!
//! Game instances are stored behind a type-erased registry and serialized,
//! so their state is not known at compile time. A validated enum with
//! per-transition methods rejects invalid transitions at runtime while
//! serializing directly via serde; the terminal-state guard makes every
//! transition one-way.
//!
//! ## Atomicity
//!
//! Every operation validates completely before mutating anything. A failed
//! call leaves the tournament exactly as it found it — there is no partial
//! initialization and no partially applied resolution. The one tolerated
//! failure is the anchor-registry notification after resolution commits,
//! which is logged and swallowed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use summit_core::{Address, Digest, GameIndex, Timestamp};

use crate::anchor::AnchorRegistry;
use crate::clock::ChessClock;
use crate::commitment::{self, OpeningVerifier};
use crate::config::{ConfigError, GameConfig};
use crate::error::GameError;
use crate::payload::{self, AncestryFields, ProposalIdentity};
use crate::registry::GameRegistry;
use crate::tree;
use crate::vault::BondVault;

/// Lifecycle status of a game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created by the factory but not yet initialized.
    Uninitialized,
    /// Open challenge period.
    InProgress,
    /// Terminal: the proposal was defeated.
    ChallengerWins,
    /// Terminal: the proposal was accepted.
    DefenderWins,
}

impl GameStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::InProgress => "IN_PROGRESS",
            Self::ChallengerWins => "CHALLENGER_WINS",
            Self::DefenderWins => "DEFENDER_WINS",
        }
    }

    /// Whether this status is terminal (no further transitions allowed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ChallengerWins | Self::DefenderWins)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One proposed rollup-state advancement.
///
/// Created empty by the factory, initialized exactly once, then in progress
/// until resolution. Instances are never deleted; resolved instances remain
/// queryable indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInstance {
    /// Factory index of this instance.
    pub index: GameIndex,
    /// Raw immutable identity payload, fixed at creation.
    pub payload: Vec<u8>,
    /// Decoded identity; populated at initialization.
    pub identity: Option<ProposalIdentity>,
    /// Creation timestamp; unset until initialized.
    pub created_at: Option<Timestamp>,
    /// Resolution timestamp; unset until resolved.
    pub resolved_at: Option<Timestamp>,
    /// Current lifecycle status.
    pub status: GameStatus,
    /// Posted bond in native value.
    pub bond: u128,
    /// Ordered per-chunk commitment digests recorded at initialization.
    pub chunk_digests: Vec<Digest>,
    /// Children registered against this instance.
    pub children: BTreeSet<GameIndex>,
    /// Whether the fault flow has eliminated this instance.
    pub eliminated: bool,
}

impl GameInstance {
    /// Create an empty, uninitialized instance with its identity payload.
    pub fn new(index: GameIndex, payload: Vec<u8>) -> Self {
        Self {
            index,
            payload,
            identity: None,
            created_at: None,
            resolved_at: None,
            status: GameStatus::Uninitialized,
            bond: 0,
            chunk_digests: Vec::new(),
            children: BTreeSet::new(),
            eliminated: false,
        }
    }

    /// Create the tournament's anchor instance: its own parent, already
    /// resolved in the defender's favor.
    pub fn resolved_anchor(index: GameIndex, identity: ProposalIdentity, now: Timestamp) -> Self {
        let mut game = Self::new(index, identity.encode());
        game.identity = Some(identity);
        game.created_at = Some(now);
        game.resolved_at = Some(now);
        game.status = GameStatus::DefenderWins;
        game
    }

    /// Parent index projection from the immutable identity payload;
    /// available before initialization.
    pub fn parent_game_index(&self) -> Option<GameIndex> {
        payload::parent_index_of(&self.payload)
    }

    /// Duplication counter projection from the immutable identity payload;
    /// available before initialization.
    pub fn duplication_counter(&self) -> Option<u64> {
        payload::duplication_counter_of(&self.payload)
    }

    /// The claimed output root, once initialized.
    pub fn root_claim(&self) -> Option<Digest> {
        self.identity.map(|id| id.root_claim)
    }

    /// The claimed L2 block number, once initialized.
    pub fn l2_block_number(&self) -> Option<u64> {
        self.identity.map(|id| id.l2_block_number)
    }

    /// The account that posted the bond, once initialized.
    pub fn proposer(&self) -> Option<Address> {
        self.identity.map(|id| id.creator)
    }
}

/// The data-availability context visible while a proposal is submitted:
/// the chunk commitments published alongside it, indexed from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaContext {
    chunk_hashes: Vec<Digest>,
}

impl DaContext {
    /// Build a context from already-versioned chunk digests.
    pub fn new(chunk_hashes: Vec<Digest>) -> Self {
        Self { chunk_hashes }
    }

    /// Build a context from raw chunk commitments, recording their
    /// versioned digests.
    pub fn from_commitments(commitments: &[Vec<u8>]) -> Self {
        Self {
            chunk_hashes: commitments
                .iter()
                .map(|c| summit_core::versioned_commitment_digest(c))
                .collect(),
        }
    }

    /// The commitment digest published for `chunk`, if present.
    pub fn chunk_hash(&self, chunk: u64) -> Option<Digest> {
        self.chunk_hashes.get(chunk as usize).copied()
    }
}

/// Everything a submission carries besides the game's identity: the native
/// value posted as bond, the L1 time of the call, and the visible
/// data-availability context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionContext {
    /// Native value posted with the call; captured as the bond.
    pub value: u128,
    /// Current L1 wall-clock time.
    pub timestamp: Timestamp,
    /// Data-availability context for the proposal's chunks.
    pub da: DaContext,
}

/// Record of an accepted proposal, emitted by [`Tournament::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionEvent {
    /// The resolved game.
    pub index: GameIndex,
    /// Terminal status (always `DefenderWins` on this path).
    pub status: GameStatus,
    /// When resolution occurred.
    pub resolved_at: Timestamp,
    /// Account the bond was refunded to.
    pub proposer: Address,
    /// Refunded bond amount.
    pub bond: u128,
    /// Accepted root claim.
    pub root_claim: Digest,
    /// Accepted L2 block number.
    pub l2_block_number: u64,
}

/// One tournament node: the typed game registry, the bond vault, and the
/// anchor-registry collaborator, driven by a fixed deployment
/// configuration.
///
/// All operations take `&mut self` and run to completion — execution is
/// fully serialized and re-entry is structurally impossible.
#[derive(Debug)]
pub struct Tournament<A: AnchorRegistry> {
    config: GameConfig,
    registry: GameRegistry,
    vault: BondVault,
    anchor: A,
}

impl<A: AnchorRegistry> Tournament<A> {
    /// Construct a tournament node, seeding the anchor instance at index 0
    /// as its own parent with status `DefenderWins`.
    pub fn new(
        config: GameConfig,
        anchor: A,
        anchor_root: Digest,
        anchor_block: u64,
        now: Timestamp,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut registry = GameRegistry::new();
        let index = registry.next_index();
        let identity = ProposalIdentity {
            creator: Address::ZERO,
            root_claim: anchor_root,
            l1_head: Digest::ZERO,
            l2_block_number: anchor_block,
            parent_index: index,
            duplication_counter: 0,
        };
        registry.register(
            config.game_type,
            GameInstance::resolved_anchor(index, identity, now),
        );
        Ok(Self {
            config,
            registry,
            vault: BondVault::new(),
            anchor,
        })
    }

    /// The deployment configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The bond vault.
    pub fn vault(&self) -> &BondVault {
        &self.vault
    }

    /// The anchor-registry collaborator.
    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    /// Look up a game of this tournament's type.
    pub fn game(&self, index: GameIndex) -> Result<&GameInstance, GameError> {
        self.registry.get(self.config.game_type, index)
    }

    /// Resolve a game's parent through the typed registry.
    ///
    /// Reads the fixed-position parent index from the immutable identity
    /// payload and verifies the parent's registered type matches this
    /// tournament's exactly.
    pub fn parent_game(&self, index: GameIndex) -> Result<&GameInstance, GameError> {
        let game = self.game(index)?;
        let parent_index =
            game.parent_game_index()
                .ok_or_else(|| GameError::MalformedIdentity {
                    expected: payload::ENCODED_LEN,
                    actual: game.payload.len(),
                })?;
        self.game(parent_index)
    }

    /// Register a new, uninitialized proposal with its identity payload.
    pub fn create(&mut self, payload_bytes: Vec<u8>) -> GameIndex {
        let index = self.registry.next_index();
        let game = GameInstance::new(index, payload_bytes);
        let index = self.registry.register(self.config.game_type, game);
        debug!("created {index}");
        index
    }

    /// Initialize a proposal: `Uninitialized → InProgress`.
    ///
    /// Validates the identity payload, identity uniqueness, the duplicate
    /// chain, the parent's
    /// type and block arithmetic, the data-availability commitments, and
    /// the submission window — in that order — then atomically records the
    /// commitments, captures the bond, registers the child with its parent,
    /// and commits the creation timestamp.
    pub fn initialize(
        &mut self,
        index: GameIndex,
        ctx: SubmissionContext,
    ) -> Result<(), GameError> {
        let game = self.registry.get(self.config.game_type, index)?;
        if game.created_at.is_some() {
            return Err(GameError::AlreadyInitialized { index });
        }
        let identity = ProposalIdentity::decode(&game.payload)?;

        // One registered proposal per (root claim, position, counter). A
        // duplicate must advance the counter, never reuse it.
        if let Some(existing) =
            self.registry
                .find(self.config.game_type, &identity.root_claim, &identity.ancestry())
        {
            if existing != index {
                return Err(GameError::DuplicateIdentity { index, existing });
            }
        }

        // Duplicate chains must be strictly sequential: counter k requires
        // an existing sibling at the same position with counter k - 1.
        if let Some(predecessor) = identity.predecessor_ancestry() {
            if self
                .registry
                .find(self.config.game_type, &identity.root_claim, &predecessor)
                .is_none()
            {
                return Err(GameError::InvalidDuplicationCounter {
                    counter: identity.duplication_counter,
                });
            }
        }

        let parent = self
            .registry
            .get(self.config.game_type, identity.parent_index)?;
        let parent_block = match parent.l2_block_number() {
            Some(n) => n,
            None => {
                return Err(GameError::GameNotInProgress {
                    index: identity.parent_index,
                    status: parent.status,
                })
            }
        };
        let expected = parent_block.saturating_add(self.config.block_count);
        match identity.l2_block_number.cmp(&expected) {
            std::cmp::Ordering::Less => {
                return Err(GameError::UnexpectedRootClaim {
                    candidate: identity.l2_block_number,
                    parent: parent_block,
                    required: self.config.block_count,
                })
            }
            std::cmp::Ordering::Greater => {
                return Err(GameError::BlockCountExceeded {
                    candidate: identity.l2_block_number,
                    parent: parent_block,
                    required: self.config.block_count,
                })
            }
            std::cmp::Ordering::Equal => {}
        }

        // Consume exactly the required chunk commitments, indexed 0..N-1.
        // An absent chunk is rejected; there is no silent gap-filling.
        let required = self.config.required_chunks();
        let mut chunk_digests = Vec::with_capacity(required as usize);
        for chunk in 0..required {
            chunk_digests.push(
                ctx.da
                    .chunk_hash(chunk)
                    .ok_or(GameError::MissingCommitment { chunk })?,
            );
        }

        let scheduled = self
            .config
            .scheduled_submission_time(identity.l2_block_number);
        if ctx.timestamp < scheduled {
            return Err(GameError::SubmissionTooEarly {
                block_number: identity.l2_block_number,
                scheduled,
            });
        }

        // All checks passed; commit every mutation together.
        {
            let game = self.registry.get_mut(self.config.game_type, index)?;
            game.chunk_digests = chunk_digests;
            game.bond = ctx.value;
            game.identity = Some(identity);
            game.created_at = Some(ctx.timestamp);
            game.status = GameStatus::InProgress;
        }
        tree::append_child(&mut self.registry, identity.parent_index, index)?;
        info!(
            "{index} initialized at block {} under {} with bond {}",
            identity.l2_block_number, identity.parent_index, ctx.value
        );
        Ok(())
    }

    /// Resolve a proposal in the defender's favor: `InProgress →
    /// DefenderWins`.
    ///
    /// Requires, in order: the game is in progress; its parent already
    /// resolved `DefenderWins`; its challenge clock has fully elapsed; and
    /// it is the single surviving child selected by the parent's pruning
    /// rule. Refunds the bond to the original proposer, commits the
    /// terminal status, and notifies the anchor registry best-effort.
    pub fn resolve(
        &mut self,
        index: GameIndex,
        now: Timestamp,
    ) -> Result<ResolutionEvent, GameError> {
        let (identity, created_at) = {
            let game = self.registry.get(self.config.game_type, index)?;
            match (game.status, game.identity, game.created_at) {
                (GameStatus::InProgress, Some(identity), Some(created_at)) => {
                    (identity, created_at)
                }
                (status, _, _) => return Err(GameError::GameNotInProgress { index, status }),
            }
        };

        let parent = self
            .registry
            .get(self.config.game_type, identity.parent_index)?;
        if parent.status != GameStatus::DefenderWins {
            return Err(GameError::OutOfOrderResolution {
                index,
                parent: identity.parent_index,
            });
        }

        let clock = ChessClock::new(created_at, self.config.max_clock_duration);
        let remaining = clock.remaining(now);
        if remaining > 0 {
            return Err(GameError::ClockNotExpired { index, remaining });
        }

        let survivor = tree::prune_children(&self.registry, identity.parent_index)?;
        if survivor != Some(index) {
            return Err(GameError::NotSelectedSurvivor { index, survivor });
        }

        let bond = {
            let game = self.registry.get_mut(self.config.game_type, index)?;
            let bond = game.bond;
            game.bond = 0;
            game.status = GameStatus::DefenderWins;
            game.resolved_at = Some(now);
            bond
        };
        self.vault.credit(identity.creator, bond);
        info!(
            "{index} resolved DEFENDER_WINS at block {}; bond {} refunded to {}",
            identity.l2_block_number, bond, identity.creator
        );

        // Best-effort: a bookkeeping failure downstream must not abort an
        // otherwise-valid resolution.
        if let Err(err) = self.anchor.try_update_anchor_state(
            identity.root_claim,
            identity.l2_block_number,
            index,
        ) {
            warn!("anchor registry update failed for {index}: {err}");
        }

        Ok(ResolutionEvent {
            index,
            status: GameStatus::DefenderWins,
            resolved_at: now,
            proposer: identity.creator,
            bond,
            root_claim: identity.root_claim,
            l2_block_number: identity.l2_block_number,
        })
    }

    /// Eliminate a proposal: `InProgress → ChallengerWins`.
    ///
    /// Entry point for the tournament-tree collaborator's finalization rule
    /// once the fault flow has defeated a proposal. Forfeits the bond to
    /// the treasury. Subject to the same one-way transition rule as
    /// [`resolve`](Tournament::resolve).
    pub fn eliminate(&mut self, index: GameIndex, now: Timestamp) -> Result<(), GameError> {
        let bond = {
            let game = self.registry.get_mut(self.config.game_type, index)?;
            if game.status != GameStatus::InProgress {
                return Err(GameError::GameNotInProgress {
                    index,
                    status: game.status,
                });
            }
            let bond = game.bond;
            game.bond = 0;
            game.status = GameStatus::ChallengerWins;
            game.resolved_at = Some(now);
            game.eliminated = true;
            bond
        };
        self.vault.credit(self.config.treasury, bond);
        info!("{index} eliminated CHALLENGER_WINS; bond {bond} forfeited to treasury");
        Ok(())
    }

    /// Remaining challenge time for a game at `now`.
    ///
    /// Valid only while the game is in progress.
    pub fn challenger_duration(&self, index: GameIndex, now: Timestamp) -> Result<u64, GameError> {
        let game = self.game(index)?;
        match (game.status, game.created_at) {
            (GameStatus::InProgress, Some(created_at)) => {
                Ok(ChessClock::new(created_at, self.config.max_clock_duration).remaining(now))
            }
            (status, _) => Err(GameError::GameNotInProgress { index, status }),
        }
    }

    /// The surviving child of `parent`, per the pruning rule.
    pub fn prune_children(&self, parent: GameIndex) -> Result<Option<GameIndex>, GameError> {
        tree::prune_children(&self.registry, parent)
    }

    /// Verify that a specific intermediate output was committed to by a
    /// proposal. Pure; performs no state mutation.
    pub fn verify_intermediate_output<V: OpeningVerifier>(
        &self,
        verifier: &V,
        index: GameIndex,
        output_number: u64,
        output_hash: Digest,
        raw_commitment: &[u8],
        opening_proof: &[u8],
    ) -> Result<bool, GameError> {
        let game = self.game(index)?;
        commitment::verify_intermediate_output(
            self.config.chunk_size,
            &game.chunk_digests,
            verifier,
            output_number,
            output_hash,
            raw_commitment,
            opening_proof,
        )
    }

    /// The lowest unused duplication counter for a tree position.
    ///
    /// Proposers probe the registry with increasing counters until a free
    /// slot is found before submitting a duplicate.
    pub fn next_duplication_counter(
        &self,
        root_claim: &Digest,
        l2_block_number: u64,
        parent_index: GameIndex,
    ) -> u64 {
        let mut counter = 0u64;
        loop {
            let ancestry = AncestryFields {
                l2_block_number,
                parent_index,
                duplication_counter: counter,
            };
            if self
                .registry
                .find(self.config.game_type, root_claim, &ancestry)
                .is_none()
            {
                return counter;
            }
            counter += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut GameRegistry {
        &mut self.registry
    }
}
