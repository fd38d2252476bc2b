//! Commitment = HMAC-SHA3-256(key, move name).

use super::secret::SecretKey;
use crate::error::{GameError, Result};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

type HmacSha3_256 = Hmac<Sha3_256>;

/// Digest length in bytes
pub const COMMITMENT_LEN: usize = 32;

/// Keyed digest of the computer's move, published before the user chooses
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; COMMITMENT_LEN]);

fn keyed_mac(key: &SecretKey, move_name: &str) -> Result<HmacSha3_256> {
    if move_name.is_empty() {
        return Err(GameError::InvalidMove);
    }
    let mut mac = HmacSha3_256::new_from_slice(key.as_bytes())
        .map_err(|e| GameError::InvalidKey(e.to_string()))?;
    mac.update(move_name.as_bytes());
    Ok(mac)
}

impl Commitment {
    /// Commit to `move_name` under `key`
    pub fn new(key: &SecretKey, move_name: &str) -> Result<Self> {
        let mac = keyed_mac(key, move_name)?;
        Ok(Self(mac.finalize().into_bytes().into()))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; COMMITMENT_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_LEN] {
        &self.0
    }

    /// Parse a published commitment
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s.trim()).map_err(|e| GameError::InvalidCommitment(e.to_string()))?;
        let bytes: [u8; COMMITMENT_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            GameError::InvalidCommitment(format!(
                "expected {} bytes, got {}",
                COMMITMENT_LEN,
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Verify that the given key and move produce this commitment.
    ///
    /// Comparison is constant-time. An empty move never verifies.
    pub fn verify(&self, key: &SecretKey, move_name: &str) -> bool {
        keyed_mac(key, move_name)
            .map(|mac| mac.verify_slice(&self.0).is_ok())
            .unwrap_or(false)
    }

    /// Like `verify`, but reports a mismatch as `CommitmentMismatch`
    pub fn check(&self, key: &SecretKey, move_name: &str) -> Result<()> {
        keyed_mac(key, move_name)?
            .verify_slice(&self.0)
            .map_err(|_| {
                warn!(commitment = %self, move_name, "commitment does not match reveal");
                GameError::CommitmentMismatch
            })
    }
}

/// Commit to `move_name` under `key`
pub fn commit(key: &SecretKey, move_name: &str) -> Result<Commitment> {
    Commitment::new(key, move_name)
}

/// Recompute and compare
pub fn verify(key: &SecretKey, move_name: &str, commitment: &Commitment) -> bool {
    commitment.verify(key, move_name)
}

/// Check a reveal given in its published hex form
pub fn verify_reveal(key_hex: &str, move_name: &str, commitment_hex: &str) -> Result<()> {
    let key = SecretKey::from_hex(key_hex)?;
    let commitment = Commitment::from_hex(commitment_hex)?;
    commitment.check(&key, move_name)
}

impl FromStr for Commitment {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        hex::encode(self.0).serialize(s)
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generate_key;
    use proptest::prelude::*;

    #[test]
    fn test_commitment_verification() {
        let key = generate_key().unwrap();
        let commitment = commit(&key, "rock").unwrap();

        assert!(commitment.verify(&key, "rock"));
        assert!(verify(&key, "rock", &commitment));
        assert!(commitment.check(&key, "rock").is_ok());
    }

    #[test]
    fn test_commitment_is_deterministic() {
        let key = generate_key().unwrap();
        assert_eq!(commit(&key, "paper").unwrap(), commit(&key, "paper").unwrap());
    }

    #[test]
    fn test_wrong_move_fails_verification() {
        let key = generate_key().unwrap();
        let commitment = commit(&key, "rock").unwrap();

        assert!(!commitment.verify(&key, "paper"));
        assert_eq!(
            commitment.check(&key, "paper"),
            Err(GameError::CommitmentMismatch)
        );
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let key1 = generate_key().unwrap();
        let key2 = generate_key().unwrap();
        let commitment = commit(&key1, "rock").unwrap();

        assert!(!commitment.verify(&key2, "rock"));
    }

    #[test]
    fn test_empty_move_rejected() {
        let key = generate_key().unwrap();
        assert_eq!(commit(&key, ""), Err(GameError::InvalidMove));
        let commitment = commit(&key, "rock").unwrap();
        assert!(!commitment.verify(&key, ""));
        assert_eq!(commitment.check(&key, ""), Err(GameError::InvalidMove));
    }

    #[test]
    fn test_known_hmac_sha3_vector() {
        // HMAC-SHA3-256 test case 1: key = 0x00..0x1f, message = "Sample message for keylen<blocklen"
        let key = SecretKey::from_bytes(std::array::from_fn(|i| i as u8));
        let commitment = commit(&key, "Sample message for keylen<blocklen").unwrap();
        assert_eq!(
            commitment.to_string(),
            "4fe8e202c4f058e8dddc23d8c34e467343e23555e24fc2f025d598f558f67205"
        );
    }

    #[test]
    fn test_hex_and_serde() {
        let key = generate_key().unwrap();
        let commitment = commit(&key, "scissors").unwrap();
        let hex = commitment.to_string();
        assert_eq!(hex.len(), COMMITMENT_LEN * 2);
        assert_eq!(hex.parse::<Commitment>().unwrap(), commitment);

        let json = serde_json::to_string(&commitment).unwrap();
        assert_eq!(json, format!("\"{}\"", hex));
        let back: Commitment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, commitment);

        assert!(matches!(
            Commitment::from_hex("00"),
            Err(GameError::InvalidCommitment(_))
        ));
    }

    #[test]
    fn test_verify_reveal_from_hex() {
        let key = generate_key().unwrap();
        let commitment = commit(&key, "paper").unwrap();
        assert!(verify_reveal(&key.to_hex(), "paper", &commitment.to_string()).is_ok());
        assert_eq!(
            verify_reveal(&key.to_hex(), "rock", &commitment.to_string()),
            Err(GameError::CommitmentMismatch)
        );
        assert!(matches!(
            verify_reveal("nothex", "rock", &commitment.to_string()),
            Err(GameError::InvalidKey(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_independent_keys_bind_differently(
            k1 in any::<[u8; 32]>(),
            k2 in any::<[u8; 32]>(),
            name in "[a-z]{1,12}",
        ) {
            prop_assume!(k1 != k2);
            let c1 = commit(&SecretKey::from_bytes(k1), &name).unwrap();
            let c2 = commit(&SecretKey::from_bytes(k2), &name).unwrap();
            prop_assert_ne!(c1, c2);
        }

        #[test]
        fn prop_other_moves_never_verify(
            key in any::<[u8; 32]>(),
            m1 in "[a-z]{1,12}",
            m2 in "[a-z]{1,12}",
        ) {
            prop_assume!(m1 != m2);
            let key = SecretKey::from_bytes(key);
            let commitment = commit(&key, &m1).unwrap();
            prop_assert!(commitment.verify(&key, &m1));
            prop_assert!(!commitment.verify(&key, &m2));
        }
    }
}
