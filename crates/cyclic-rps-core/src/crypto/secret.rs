//! SecretKey and the secure generator that draws keys and computer moves.

use crate::error::{GameError, Result};
use crate::games::{MoveId, MoveSet};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Length of a secret key in bytes
pub const KEY_LEN: usize = 32;

/// Commitment key, revealed only after the round
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lowercase hex encoding used for the reveal
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a revealed key
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| GameError::InvalidKey(e.to_string()))?;
        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            GameError::InvalidKey(format!("expected {} bytes, got {}", KEY_LEN, v.len()))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl FromStr for SecretKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Generate a key from the operating system's secure source
pub fn generate_key() -> Result<SecretKey> {
    SecretGenerator::new().generate_key()
}

/// Draws secret keys and computer moves from one cryptographically secure source.
///
/// Read failures surface as `EntropyUnavailable`; there is no fallback.
pub struct SecretGenerator<R = OsRng> {
    rng: R,
}

impl SecretGenerator<OsRng> {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for SecretGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> SecretGenerator<R> {
    /// Use a specific secure generator, e.g. a seeded `StdRng` in tests
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.rng
            .try_fill_bytes(dest)
            .map_err(|e| GameError::EntropyUnavailable(e.to_string()))
    }

    /// Fresh random key
    pub fn generate_key(&mut self) -> Result<SecretKey> {
        let mut bytes = [0u8; KEY_LEN];
        self.fill(&mut bytes)?;
        Ok(SecretKey(bytes))
    }

    /// Uniform index in `[0, bound)`, by rejection sampling over u64
    pub fn uniform_index(&mut self, bound: usize) -> Result<usize> {
        let bound = bound as u64;
        if bound == 0 {
            return Err(GameError::InvalidMoveCount(0));
        }
        // largest multiple of `bound` that fits, so every residue is equally likely
        let zone = u64::MAX - (u64::MAX - bound + 1) % bound;
        loop {
            let mut buf = [0u8; 8];
            self.fill(&mut buf)?;
            let value = u64::from_le_bytes(buf);
            if value <= zone {
                return Ok((value % bound) as usize);
            }
        }
    }

    /// Computer's move, uniform over the set
    pub fn pick_move(&mut self, moves: &MoveSet) -> Result<MoveId> {
        let index = self.uniform_index(moves.len())?;
        moves
            .get(index)
            .ok_or(GameError::InvalidMoveCount(moves.len()))
    }
}
