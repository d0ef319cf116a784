//! Matches, round labels, and the match lifecycle.
//!
//! A match moves through a small state machine:
//!
//! ```text
//! SCHEDULED --(start)--> IN_PROGRESS --(finish, scores distinct)--> FINISHED
//! IN_PROGRESS --(save score)--> IN_PROGRESS
//! ```
//!
//! `FINISHED` is terminal. All transitions validate before mutating, so a
//! rejected call leaves the match exactly as it was.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::team::TeamId;

/// Lifecycle status of a match.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Created by the engine, not yet started.
    Scheduled,
    /// Being played; scores may be updated freely.
    InProgress,
    /// Final score recorded. Terminal.
    Finished,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::InProgress => "IN_PROGRESS",
            MatchStatus::Finished => "FINISHED",
        };
        write!(f, "{label}")
    }
}

/// Elimination round label, conventionally derived from the match count.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketRound {
    /// The final.
    Final,
    /// Semi-finals.
    SemiFinal,
    /// Quarter-finals.
    QuarterFinal,
    /// Round of 16.
    RoundOf16,
    /// Any other bracket size, labeled by its match count.
    RoundOf(usize),
}

impl BracketRound {
    /// Label for a bracket of `num_matches` parallel matches.
    ///
    /// 2 → final, 4 → semi-final, 8 → quarter-final, 16 → round of 16,
    /// anything else → round of N.
    pub fn from_match_count(num_matches: usize) -> Self {
        match num_matches {
            2 => BracketRound::Final,
            4 => BracketRound::SemiFinal,
            8 => BracketRound::QuarterFinal,
            16 => BracketRound::RoundOf16,
            n => BracketRound::RoundOf(n),
        }
    }
}

impl fmt::Display for BracketRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketRound::Final => write!(f, "FINAL"),
            BracketRound::SemiFinal => write!(f, "SEMI_FINAL"),
            BracketRound::QuarterFinal => write!(f, "QUARTER_FINAL"),
            BracketRound::RoundOf16 => write!(f, "ROUND_16"),
            BracketRound::RoundOf(n) => write!(f, "ROUND_{n}"),
        }
    }
}

/// Round label carried by every match.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    /// Round-robin pool play; pool 0 displays as `POOL_A`.
    Pool(usize),
    /// Elimination play.
    Bracket(BracketRound),
    /// Numbered KOTH round, starting at 1.
    Koth(u32),
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::Pool(idx) => {
                let letter = char::from_u32('A' as u32 + *idx as u32).unwrap_or('?');
                write!(f, "POOL_{letter}")
            }
            Round::Bracket(round) => write!(f, "{round}"),
            Round::Koth(n) => write!(f, "ROUND_{n}"),
        }
    }
}

/// A single confrontation between two team slots.
///
/// Slots may be unset ("to be determined") while a bracket is still filling
/// in. Scores stay unset until play begins.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Slot A.
    pub team_a: Option<TeamId>,
    /// Slot B.
    pub team_b: Option<TeamId>,
    /// Slot A's score.
    pub score_a: Option<u32>,
    /// Slot B's score.
    pub score_b: Option<u32>,
    /// The winning slot's team, set when the match finishes.
    pub winner: Option<TeamId>,
    /// Round label.
    pub round: Round,
    /// 1-based court the match is played on.
    pub court_number: u32,
    /// Display ordering index within the contest.
    pub match_order: usize,
    /// Lifecycle status.
    pub status: MatchStatus,
}

impl Match {
    /// A freshly scheduled match with no scores.
    pub fn scheduled(
        team_a: Option<TeamId>,
        team_b: Option<TeamId>,
        round: Round,
        court_number: u32,
        match_order: usize,
    ) -> Self {
        Match {
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            winner: None,
            round,
            court_number,
            match_order,
            status: MatchStatus::Scheduled,
        }
    }

    /// Move a scheduled match in progress.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.status {
            MatchStatus::Scheduled => {
                self.status = MatchStatus::InProgress;
                Ok(())
            }
            from => Err(EngineError::InvalidTransition { from, action: "start" }),
        }
    }

    /// Record the live score without finishing.
    ///
    /// May be called any number of times; also moves a scheduled match in
    /// progress.
    pub fn save_score(&mut self, score_a: u32, score_b: u32) -> Result<(), EngineError> {
        if self.status == MatchStatus::Finished {
            return Err(EngineError::InvalidTransition {
                from: MatchStatus::Finished,
                action: "score",
            });
        }
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self.status = MatchStatus::InProgress;
        Ok(())
    }

    /// Record the final score and the winner.
    ///
    /// A tie is rejected as invalid input and the match is left unchanged.
    /// The winner is whichever slot holds the higher score.
    pub fn finish(&mut self, score_a: u32, score_b: u32) -> Result<(), EngineError> {
        if self.status == MatchStatus::Finished {
            return Err(EngineError::InvalidTransition {
                from: MatchStatus::Finished,
                action: "finish",
            });
        }
        if score_a == score_b {
            return Err(EngineError::TiedScore(score_a));
        }
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self.winner = if score_a > score_b { self.team_a } else { self.team_b };
        self.status = MatchStatus::Finished;
        Ok(())
    }

    /// True once the final score is recorded.
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }
}
