//! # summit-core — Foundational Types for the Summit Tournament Stack
//!
//! This crate is the bedrock of the Summit stack. It defines the core
//! type-system primitives shared by every other crate in the workspace;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Address`, `GameIndex`,
//!    `GameType` — all newtypes with explicit constructors. No bare integers
//!    or byte slices for identifiers.
//!
//! 2. **Fixed-width digests.** All cryptographic bindings in the tournament
//!    (root claims, L1 head references, chunk commitments) are 32-byte
//!    `Digest` values computed with SHA-256.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with
//!    seconds precision and provides the saturating second arithmetic that
//!    the challenge clock is built on.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `summit-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use digest::{versioned_commitment_digest, Digest, COMMITMENT_VERSION};
pub use error::CoreError;
pub use identity::{Address, GameIndex, GameType};
pub use temporal::Timestamp;
