//! Error taxonomy of the crate.
//!
//! Every failure here is a deterministic validation failure detected before
//! any computation proceeds: the engine performs no I/O, so there are no
//! retryable or transient modes. A rejected call produces no partial output
//! and mutates nothing.

use thiserror::Error;

use crate::matches::MatchStatus;

/// Errors returned by the balancer and the competition engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Pool or bracket generation needs at least two teams.
    #[error("at least 2 teams are required, got {0}")]
    NotEnoughTeams(usize),

    /// A round needs more present players than were supplied.
    #[error("at least {required} players are required, got {actual}")]
    NotEnoughPlayers {
        /// Minimum roster size for the requested operation.
        required: usize,
        /// Number of players actually supplied.
        actual: usize,
    },

    /// Court-based generation needs at least one court.
    #[error("at least 1 court is required")]
    NoCourts,

    /// A match cannot finish on a tie.
    #[error("scores are tied at {0}, a finished match needs a winner")]
    TiedScore(u32),

    /// The requested lifecycle transition is not allowed from this status.
    #[error("match is {from}, cannot {action} it")]
    InvalidTransition {
        /// Status the match was in when the transition was attempted.
        from: MatchStatus,
        /// The attempted operation, for the message.
        action: &'static str,
    },
}
