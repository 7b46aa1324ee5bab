//! # Typed Game Registry
//!
//! The factory registry stores games of every tournament type side by side,
//! keyed by a sequentially assigned index. Lookups are type-erased at the
//! storage level and re-typed at the access level: every retrieval names the
//! expected type tag and fails with a precise error when the registered tag
//! differs. Without this check a proposal could be linked to an incompatible
//! game implementation and corrupt resolution semantics.

use serde::{Deserialize, Serialize};

use summit_core::{Digest, GameIndex, GameType};

use crate::error::GameError;
use crate::game::GameInstance;
use crate::payload::{AncestryFields, ProposalIdentity};

/// A registered game and the type tag it was registered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Tournament type the instance was registered as.
    pub game_type: GameType,
    /// The instance itself.
    pub game: GameInstance,
}

/// Append-only store of game records. Indices are never reused and records
/// are never deleted; resolved games remain queryable indefinitely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRegistry {
    records: Vec<GameRecord>,
}

impl GameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The index the next registered game will receive.
    pub fn next_index(&self) -> GameIndex {
        GameIndex::new(self.records.len() as u64)
    }

    /// Register a game under a type tag, returning its assigned index.
    pub fn register(&mut self, game_type: GameType, game: GameInstance) -> GameIndex {
        let index = self.next_index();
        self.records.push(GameRecord { game_type, game });
        index
    }

    /// Look up a record by index, without a type check.
    pub fn record(&self, index: GameIndex) -> Result<&GameRecord, GameError> {
        self.records
            .get(index.as_u64() as usize)
            .ok_or(GameError::UnknownGame { index })
    }

    /// Look up a record by index, mutably, without a type check.
    pub fn record_mut(&mut self, index: GameIndex) -> Result<&mut GameRecord, GameError> {
        self.records
            .get_mut(index.as_u64() as usize)
            .ok_or(GameError::UnknownGame { index })
    }

    /// Look up a game by index, verifying it was registered under
    /// `expected` exactly.
    pub fn get(&self, expected: GameType, index: GameIndex) -> Result<&GameInstance, GameError> {
        let record = self.record(index)?;
        if record.game_type != expected {
            return Err(GameError::AncestryTypeMismatch {
                index,
                expected,
                actual: record.game_type,
            });
        }
        Ok(&record.game)
    }

    /// Look up a game by index, mutably, verifying its type tag.
    pub fn get_mut(
        &mut self,
        expected: GameType,
        index: GameIndex,
    ) -> Result<&mut GameInstance, GameError> {
        let record = self.record_mut(index)?;
        if record.game_type != expected {
            return Err(GameError::AncestryTypeMismatch {
                index,
                expected,
                actual: record.game_type,
            });
        }
        Ok(&mut record.game)
    }

    /// Find the game registered under `game_type` whose identity payload
    /// carries the given root claim and ancestry fields.
    ///
    /// This is the duplicate-chain lookup: records whose payloads do not
    /// decode are skipped rather than reported, since they can never collide
    /// with a well-formed identity.
    pub fn find(
        &self,
        game_type: GameType,
        root_claim: &Digest,
        ancestry: &AncestryFields,
    ) -> Option<GameIndex> {
        self.records.iter().enumerate().find_map(|(i, record)| {
            if record.game_type != game_type {
                return None;
            }
            let identity = ProposalIdentity::decode(&record.game.payload).ok()?;
            (identity.root_claim == *root_claim && identity.ancestry() == *ancestry)
                .then(|| GameIndex::new(i as u64))
        })
    }

    /// Number of registered games.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no games.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in index order.
    pub fn iter(&self) -> impl Iterator<Item = &GameRecord> {
        self.records.iter()
    }
}
