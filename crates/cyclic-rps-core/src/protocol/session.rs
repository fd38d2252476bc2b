//! One commit-reveal round between the computer and the user.

use super::messages::{CommitMessage, RevealMessage};
use super::types::SessionId;
use crate::crypto::{Commitment, SecretGenerator, SecretKey};
use crate::error::Result;
use crate::games::{HelpTable, MoveId, MoveSet, OutcomeRule, RoundOutcome};
use rand::{CryptoRng, RngCore};
use std::fmt;
use tracing::debug;

/// A game session that has committed to the computer's move.
///
/// `play` consumes the session, so the key is revealed at most once.
/// Dropping a session before `play` discards the key.
pub struct Session {
    id: SessionId,
    rules: OutcomeRule,
    key: SecretKey,
    computer_move: MoveId,
    commitment: Commitment,
}

impl Session {
    /// Start a session over the standard move set of `move_count` moves
    pub fn new(move_count: usize) -> Result<Self> {
        Self::start(MoveSet::standard(move_count)?)
    }

    /// Start a session using the operating system's secure source
    pub fn start(moves: MoveSet) -> Result<Self> {
        Self::start_with(moves, &mut SecretGenerator::new())
    }

    /// Start a session drawing key and computer move from `generator`
    pub fn start_with<R: RngCore + CryptoRng>(
        moves: MoveSet,
        generator: &mut SecretGenerator<R>,
    ) -> Result<Self> {
        let key = generator.generate_key()?;
        let computer_move = generator.pick_move(&moves)?;
        let commitment = Commitment::new(&key, moves.name(computer_move)?)?;
        let id = SessionId::new();

        debug!(session = %id, moves = moves.len(), %commitment, "session committed");

        Ok(Self {
            id,
            rules: OutcomeRule::new(moves),
            key,
            computer_move,
            commitment,
        })
    }

    /// Identifier used in logs and published messages
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Moves on offer this session
    pub fn moves(&self) -> &MoveSet {
        self.rules.moves()
    }

    /// Rule that will decide the round
    pub fn rules(&self) -> &OutcomeRule {
        &self.rules
    }

    /// Published commitment to the computer's move
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Message published before the user chooses
    pub fn commit_message(&self) -> CommitMessage {
        CommitMessage {
            session_id: self.id,
            moves: self.moves().names().to_vec(),
            commitment: self.commitment,
        }
    }

    /// Outcome table for this session's moves
    pub fn help_table(&self) -> HelpTable {
        self.rules.pairwise_table()
    }

    /// Resolve a 1-based menu choice into a move of this session
    pub fn resolve_choice(&self, choice: usize) -> Result<MoveId> {
        self.moves().resolve_choice(choice)
    }

    /// Resolve a move name into a move of this session
    pub fn resolve_move(&self, name: &str) -> Result<MoveId> {
        self.moves().index_of(name)
    }

    /// Decide the round and reveal the key and computer move.
    ///
    /// A `user_move` outside this session's set fails with `InvalidChoice`
    /// and consumes the session without revealing anything.
    pub fn play(self, user_move: MoveId) -> Result<RoundReport> {
        let outcome = self.rules.decide_ids(user_move, self.computer_move)?;
        let moves = self.rules.moves();
        let user_move = moves.name(user_move)?.to_string();
        let computer_move = moves.name(self.computer_move)?.to_string();

        debug!(session = %self.id, ?outcome, "session revealed");

        Ok(RoundReport {
            session_id: self.id,
            user_move,
            computer_move,
            outcome,
            key: self.key,
            commitment: self.commitment,
        })
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("moves", &self.moves().len())
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}

/// Outcome of a finished round together with its fairness proof
#[derive(Clone, Debug)]
pub struct RoundReport {
    pub session_id: SessionId,
    pub user_move: String,
    pub computer_move: String,
    pub outcome: RoundOutcome,
    pub key: SecretKey,
    pub commitment: Commitment,
}

impl RoundReport {
    /// Recompute the commitment from the revealed key and computer move
    pub fn verify(&self) -> Result<()> {
        self.commitment.check(&self.key, &self.computer_move)
    }

    /// Message letting anyone recompute the published commitment
    pub fn reveal_message(&self) -> RevealMessage {
        RevealMessage {
            session_id: self.session_id,
            user_move: self.user_move.clone(),
            computer_move: self.computer_move.clone(),
            outcome: self.outcome,
            key: self.key.to_hex(),
            commitment: self.commitment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::BrokenRng;
    use crate::error::GameError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_session_rejects_even_counts() {
        assert_eq!(Session::new(4).unwrap_err(), GameError::InvalidMoveCount(4));
        assert_eq!(Session::new(2).unwrap_err(), GameError::InvalidMoveCount(2));
    }

    #[test]
    fn test_reveal_matches_commitment() {
        let session = Session::new(5).unwrap();
        let published = *session.commitment();
        let user = session.resolve_choice(1).unwrap();
        let report = session.play(user).unwrap();

        assert_eq!(report.commitment, published);
        assert!(report.verify().is_ok());
        assert!(report.reveal_message().verify().is_ok());
        assert_eq!(report.user_move, "rock");
    }

    #[test]
    fn test_outcome_follows_rules() {
        let mut generator = SecretGenerator::with_rng(StdRng::seed_from_u64(3));
        let session = Session::start_with(MoveSet::standard(7).unwrap(), &mut generator).unwrap();
        let rules = session.rules().clone();
        let user = session.resolve_move("paper").unwrap();
        let report = session.play(user).unwrap();

        assert_eq!(
            rules.decide(&report.user_move, &report.computer_move).unwrap(),
            report.outcome
        );
    }

    #[test]
    fn test_invalid_user_input() {
        let session = Session::new(3).unwrap();
        assert_eq!(
            session.resolve_choice(4),
            Err(GameError::InvalidChoice { choice: 4, max: 3 })
        );
        assert_eq!(
            session.resolve_move("lizard"),
            Err(GameError::UnknownMove("lizard".into()))
        );
    }

    #[test]
    fn test_move_from_other_set_rejected() {
        let session = Session::new(3).unwrap();
        let foreign = MoveSet::standard(7).unwrap().resolve_choice(7).unwrap();
        assert_eq!(
            session.play(foreign).unwrap_err(),
            GameError::InvalidChoice { choice: 7, max: 3 }
        );
    }

    #[test]
    fn test_entropy_failure_aborts_session() {
        let mut generator = SecretGenerator::with_rng(BrokenRng);
        let err = Session::start_with(MoveSet::standard(3).unwrap(), &mut generator).unwrap_err();
        assert!(matches!(err, GameError::EntropyUnavailable(_)));
    }

    #[test]
    fn test_debug_hides_secret_move() {
        let session = Session::new(3).unwrap();
        let debug = format!("{:?}", session);
        assert!(debug.contains("commitment"));
        assert!(!debug.contains("computer_move"));
        assert!(!debug.contains(&session.key.to_hex()));
    }

    #[test]
    fn test_commit_message_lists_moves() {
        let session = Session::new(3).unwrap();
        let message = session.commit_message();
        assert_eq!(message.session_id, session.id());
        assert_eq!(message.moves, vec!["rock", "paper", "scissors"]);
        assert_eq!(message.commitment, *session.commitment());
    }
}
