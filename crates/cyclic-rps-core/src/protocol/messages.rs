//! Messages published to the user: the commitment before the round, the reveal after it.

use crate::crypto::{verify_reveal, Commitment};
use crate::error::Result;
use crate::games::RoundOutcome;
use crate::protocol::SessionId;
use serde::{Deserialize, Serialize};

/// Phase 1: published before the user picks a move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub session_id: SessionId,
    pub moves: Vec<String>,
    pub commitment: Commitment,
}

/// Phase 2: everything needed to recompute the commitment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealMessage {
    pub session_id: SessionId,
    pub user_move: String,
    pub computer_move: String,
    pub outcome: RoundOutcome,
    /// Hex-encoded secret key
    pub key: String,
    pub commitment: Commitment,
}

impl RevealMessage {
    /// Recompute the commitment from the revealed key and computer move
    pub fn verify(&self) -> Result<()> {
        verify_reveal(&self.key, &self.computer_move, &self.commitment.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{commit, generate_key};
    use crate::error::GameError;

    fn reveal(computer_move: &str, committed_move: &str) -> RevealMessage {
        let key = generate_key().unwrap();
        RevealMessage {
            session_id: SessionId::new(),
            user_move: "rock".into(),
            computer_move: computer_move.into(),
            outcome: RoundOutcome::Draw,
            key: key.to_hex(),
            commitment: commit(&key, committed_move).unwrap(),
        }
    }

    #[test]
    fn test_reveal_verifies() {
        assert!(reveal("paper", "paper").verify().is_ok());
    }

    #[test]
    fn test_tampered_reveal_rejected() {
        assert_eq!(
            reveal("paper", "scissors").verify(),
            Err(GameError::CommitmentMismatch)
        );
    }

    #[test]
    fn test_reveal_json_shape() {
        let message = reveal("paper", "paper");
        let json: serde_json::Value = serde_json::to_value(&message).unwrap();
        assert_eq!(json["computer_move"], "paper");
        assert_eq!(json["outcome"], "Draw");
        assert_eq!(json["key"].as_str().unwrap().len(), 64);
        assert_eq!(json["commitment"].as_str().unwrap().len(), 64);

        let back: RevealMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, message);
    }
}
