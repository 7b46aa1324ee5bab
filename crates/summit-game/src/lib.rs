//! # Summit Game — Tournament Lifecycle and Resolution
//!
//! The dispute-tournament engine: a hierarchy of proposals over rollup state
//! advancements, each staking a bond on a claimed output root and resolving
//! through a parent-before-child tournament.
//!
//! ## Components
//!
//! - [`game`] — the lifecycle state machine ([`Tournament`]) driving each
//!   proposal from creation through initialization to terminal resolution.
//! - [`registry`] — the typed factory registry assigning indices and
//!   re-typing type-erased lookups.
//! - [`tree`] — children bookkeeping and the sibling pruning rule.
//! - [`clock`] — the stateless challenge chess clock.
//! - [`payload`] — the canonical identity byte layout and its projections.
//! - [`commitment`] — intermediate-output verification against recorded
//!   chunk commitments.
//! - [`vault`] — bond custody from capture to refund or forfeiture.
//! - [`anchor`] — the best-effort anchor-registry collaborator.
//! - [`config`] — immutable deployment parameters.
//!
//! ## Crate Policy
//!
//! No `unsafe`. No panics in library code paths — fallible operations
//! return [`GameError`] and callers propagate with `?`. All operations on a
//! [`Tournament`] are serialized through `&mut self` and run to completion.

pub mod anchor;
pub mod clock;
pub mod commitment;
pub mod config;
pub mod error;
pub mod game;
pub mod payload;
pub mod registry;
pub mod tree;
pub mod vault;

pub use anchor::{AnchorError, AnchorRegistry, AnchorState, InMemoryAnchorRegistry};
pub use clock::ChessClock;
pub use commitment::{OpeningError, OpeningVerifier, Sha256OpeningVerifier};
pub use config::{ConfigError, GameConfig};
pub use error::GameError;
pub use game::{
    DaContext, GameInstance, GameStatus, ResolutionEvent, SubmissionContext, Tournament,
};
pub use payload::{AncestryFields, ProposalIdentity};
pub use registry::{GameRecord, GameRegistry};
pub use vault::BondVault;
