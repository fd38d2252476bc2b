//! Session lifecycle and published messages.

mod messages;
mod session;
mod types;

pub use messages::{CommitMessage, RevealMessage};
pub use session::{RoundReport, Session};
pub use types::SessionId;
