//! Cryptographic primitives for the commit-reveal round.
//!
//! This module provides:
//! - SecretKey and SecretGenerator, drawing from a secure random source
//! - Commitment, an HMAC-SHA3-256 digest binding a move to a key

mod commitment;
mod secret;

pub use commitment::{commit, verify, verify_reveal, Commitment, COMMITMENT_LEN};
pub use secret::{generate_key, SecretGenerator, SecretKey, KEY_LEN};

#[cfg(test)]
pub(crate) use secret::tests::BrokenRng;
