//! Signing and digest capabilities.
//!
//! Both contracts are single-method traits so callers can plug in hardware
//! signers, alternate curves, or test doubles without any class hierarchy.
//! The protocol invokes them exactly once per endorse and once per submit.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Raised when a [`Signer`] cannot produce a signature.
#[derive(Debug, Clone, Error)]
#[error("signing failed: {0}")]
pub struct SigningError(pub String);

/// Produces a signature over a pre-computed digest.
///
/// Implementations may hold secret key material internally; they must be
/// safe for concurrent use since one gateway handle is shared across
/// submissions.
pub trait Signer: Send + Sync {
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, SigningError>;
}

/// Produces the digest that a [`Signer`] signs.
pub trait HashFunction: Send + Sync {
    fn digest(&self, message: &[u8]) -> Vec<u8>;
}

/// Default digest implementation: SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn digest(&self, message: &[u8]) -> Vec<u8> {
        Sha256::digest(message).to_vec()
    }
}

/// Placeholder signer used when a gateway is built without one.
///
/// Fails on first use rather than silently submitting unsigned requests;
/// callers that only construct proposals never hit it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedSigner;

impl Signer for UndefinedSigner {
    fn sign(&self, _digest: &[u8]) -> Result<Vec<u8>, SigningError> {
        Err(SigningError(
            "no signing implementation supplied to the gateway builder".to_string(),
        ))
    }
}
