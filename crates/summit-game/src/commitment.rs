//! # Commitment Verification
//!
//! Binds fault claims about specific intermediate outputs to the chunk
//! commitments a proposal was initialized with. The adapter first checks
//! that the caller-supplied raw commitment hashes to the recorded chunk
//! digest — a mismatch is rejected with a precise error before any
//! opening-proof work — and only then delegates the opening-proof check to
//! the cryptographic primitive. Verification performs no state mutation.

use sha2::{Digest as Sha2Digest, Sha256};
use thiserror::Error;

use summit_core::{versioned_commitment_digest, Digest};

use crate::error::GameError;

/// Errors from the opening-proof primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpeningError {
    /// The supplied proof bytes are structurally invalid.
    #[error("malformed opening proof: {0}")]
    MalformedProof(String),
}

/// The low-level commitment-opening primitive.
///
/// Checks that `commitment` opens to `claimed_value` at `position`. The
/// commitment has already been authenticated against `commitment_digest`
/// by the caller.
pub trait OpeningVerifier {
    /// Verify an opening proof. Returns `Ok(false)` for a well-formed but
    /// unconvincing proof; errors only on structurally invalid input.
    fn verify_opening_proof(
        &self,
        commitment_digest: &Digest,
        position: u64,
        claimed_value: &Digest,
        commitment: &[u8],
        proof: &[u8],
    ) -> Result<bool, OpeningError>;
}

/// Deterministic, transparent opening verifier.
///
/// A proof is the SHA-256 binding of the commitment bytes, the position,
/// and the claimed value. This provides no hiding and exists to make the
/// primitive interchangeable with a real polynomial-commitment opening
/// check at compile time.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256OpeningVerifier;

impl Sha256OpeningVerifier {
    /// Produce the proof bytes that [`verify_opening_proof`] accepts for
    /// the given opening.
    ///
    /// [`verify_opening_proof`]: OpeningVerifier::verify_opening_proof
    pub fn prove(commitment: &[u8], position: u64, claimed_value: &Digest) -> Vec<u8> {
        Self::binding(commitment, position, claimed_value).to_vec()
    }

    fn binding(commitment: &[u8], position: u64, claimed_value: &Digest) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(commitment);
        hasher.update(position.to_be_bytes());
        hasher.update(claimed_value.as_bytes());
        hasher.finalize().into()
    }
}

impl OpeningVerifier for Sha256OpeningVerifier {
    fn verify_opening_proof(
        &self,
        _commitment_digest: &Digest,
        position: u64,
        claimed_value: &Digest,
        commitment: &[u8],
        proof: &[u8],
    ) -> Result<bool, OpeningError> {
        if proof.len() != 32 {
            return Err(OpeningError::MalformedProof(format!(
                "expected 32 proof bytes, got {}",
                proof.len()
            )));
        }
        Ok(proof == Self::binding(commitment, position, claimed_value))
    }
}

/// Verify that a specific intermediate output was committed to by a
/// proposal.
///
/// `output_number` is mapped to its chunk as `output_number / chunk_size`,
/// with within-chunk offset `(output_number - 1) % chunk_size`; output
/// numbers start at 1. The recorded chunk digest must match the versioned
/// digest of the supplied raw commitment before the opening proof is ever
/// consulted.
pub fn verify_intermediate_output<V: OpeningVerifier>(
    chunk_size: u64,
    chunk_digests: &[Digest],
    verifier: &V,
    output_number: u64,
    output_hash: Digest,
    commitment: &[u8],
    proof: &[u8],
) -> Result<bool, GameError> {
    let chunk = output_number / chunk_size;
    let recorded = chunk_digests
        .get(chunk as usize)
        .copied()
        .ok_or(GameError::MissingCommitment { chunk })?;
    let derived = versioned_commitment_digest(commitment);
    if derived != recorded {
        return Err(GameError::CommitmentMismatch {
            chunk,
            derived,
            recorded,
        });
    }
    let position = output_number.saturating_sub(1) % chunk_size;
    verifier
        .verify_opening_proof(&recorded, position, &output_hash, commitment, proof)
        .map_err(|e| GameError::OpeningProofFailure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Wrapper that counts delegations to the underlying primitive.
    struct CountingVerifier {
        inner: Sha256OpeningVerifier,
        calls: Cell<usize>,
    }

    impl CountingVerifier {
        fn new() -> Self {
            Self {
                inner: Sha256OpeningVerifier,
                calls: Cell::new(0),
            }
        }
    }

    impl OpeningVerifier for CountingVerifier {
        fn verify_opening_proof(
            &self,
            commitment_digest: &Digest,
            position: u64,
            claimed_value: &Digest,
            commitment: &[u8],
            proof: &[u8],
        ) -> Result<bool, OpeningError> {
            self.calls.set(self.calls.get() + 1);
            self.inner
                .verify_opening_proof(commitment_digest, position, claimed_value, commitment, proof)
        }
    }

    const CHUNK_SIZE: u64 = 128;

    fn setup() -> (Vec<Digest>, Vec<u8>) {
        let commitment = b"chunk-0-commitment".to_vec();
        let digests = vec![
            versioned_commitment_digest(&commitment),
            versioned_commitment_digest(b"chunk-1-commitment"),
        ];
        (digests, commitment)
    }

    #[test]
    fn test_valid_opening_accepted() {
        let (digests, commitment) = setup();
        let output_hash = Digest::sha256(b"output-17");
        let proof = Sha256OpeningVerifier::prove(&commitment, 16, &output_hash);
        let ok = verify_intermediate_output(
            CHUNK_SIZE,
            &digests,
            &Sha256OpeningVerifier,
            17,
            output_hash,
            &commitment,
            &proof,
        )
        .unwrap();
        assert!(ok);
    }

    #[test]
    fn test_wrong_position_proof_rejected() {
        let (digests, commitment) = setup();
        let output_hash = Digest::sha256(b"output-17");
        // proof minted for a different position
        let proof = Sha256OpeningVerifier::prove(&commitment, 3, &output_hash);
        let ok = verify_intermediate_output(
            CHUNK_SIZE,
            &digests,
            &Sha256OpeningVerifier,
            17,
            output_hash,
            &commitment,
            &proof,
        )
        .unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_mismatched_commitment_fails_fast() {
        let (digests, _) = setup();
        let output_hash = Digest::sha256(b"output-17");
        let wrong_commitment = b"some-other-commitment";
        let proof = Sha256OpeningVerifier::prove(wrong_commitment, 16, &output_hash);
        let verifier = CountingVerifier::new();
        let err = verify_intermediate_output(
            CHUNK_SIZE,
            &digests,
            &verifier,
            17,
            output_hash,
            wrong_commitment,
            &proof,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::CommitmentMismatch { chunk: 0, .. }));
        // the primitive must never have been consulted
        assert_eq!(verifier.calls.get(), 0);
    }

    #[test]
    fn test_output_number_maps_to_second_chunk() {
        let (digests, _) = setup();
        let commitment = b"chunk-1-commitment";
        let output_hash = Digest::sha256(b"output-130");
        // output 130 with chunk size 128 lives in chunk 1 at offset 1
        let proof = Sha256OpeningVerifier::prove(commitment, 1, &output_hash);
        let ok = verify_intermediate_output(
            CHUNK_SIZE,
            &digests,
            &Sha256OpeningVerifier,
            130,
            output_hash,
            commitment,
            &proof,
        )
        .unwrap();
        assert!(ok);
    }

    #[test]
    fn test_out_of_range_chunk_reported_missing() {
        let (digests, commitment) = setup();
        let output_hash = Digest::sha256(b"output");
        let err = verify_intermediate_output(
            CHUNK_SIZE,
            &digests,
            &Sha256OpeningVerifier,
            1000,
            output_hash,
            &commitment,
            &[],
        )
        .unwrap_err();
        assert_eq!(err, GameError::MissingCommitment { chunk: 7 });
    }

    #[test]
    fn test_malformed_proof_is_an_error_not_false() {
        let (digests, commitment) = setup();
        let output_hash = Digest::sha256(b"output-17");
        let err = verify_intermediate_output(
            CHUNK_SIZE,
            &digests,
            &Sha256OpeningVerifier,
            17,
            output_hash,
            &commitment,
            b"short",
        )
        .unwrap_err();
        assert!(matches!(err, GameError::OpeningProofFailure(_)));
    }
}
