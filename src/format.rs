//! Tournament format configuration.
//!
//! The format is a tagged choice stored alongside the contest by the caller;
//! its tag decides which engine code paths run. The serialized shape keeps
//! the `mode` tag and snake_case field names the surrounding application
//! persists.

use serde::{Deserialize, Serialize};

/// Length configuration of a single match.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Sets to play.
    pub sets: u32,
    /// Target points per set.
    pub points: u32,
    /// Whether a set must be won by two points or more.
    pub win_by_two: bool,
}

/// Length configuration of playoff matches, with a shortened tie-break set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoffConfig {
    /// Sets to play.
    pub sets: u32,
    /// Target points per set.
    pub points: u32,
    /// Whether a set must be won by two points or more.
    pub win_by_two: bool,
    /// Target points of the deciding tie-break set.
    pub tie_break_points: u32,
}

/// The tagged mode choice driving the engine's code paths.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "mode")]
pub enum TournamentFormat {
    /// Pool play followed by an elimination bracket between qualified teams.
    #[serde(rename = "CLASSIC")]
    Classic {
        /// Number of round-robin pools.
        num_pools: usize,
        /// Teams advancing from each pool into the bracket.
        qualifiers_per_pool: u32,
        /// Match length during pool play.
        pool_config: MatchConfig,
        /// Match length during elimination play.
        playoff_config: PlayoffConfig,
    },
    /// Individual scoring across successively reshuffled rounds.
    #[serde(rename = "KOTH")]
    Koth {
        /// Match length of every round.
        match_config: MatchConfig,
    },
}

impl TournamentFormat {
    /// True for the pool-and-bracket mode.
    pub fn is_classic(&self) -> bool {
        matches!(self, TournamentFormat::Classic { .. })
    }

    /// True for the king-of-the-hill mode.
    pub fn is_koth(&self) -> bool {
        matches!(self, TournamentFormat::Koth { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_format_keeps_the_persisted_wire_shape() {
        let format = TournamentFormat::Classic {
            num_pools: 2,
            qualifiers_per_pool: 2,
            pool_config: MatchConfig { sets: 1, points: 25, win_by_two: true },
            playoff_config: PlayoffConfig {
                sets: 3,
                points: 25,
                win_by_two: true,
                tie_break_points: 15,
            },
        };

        let json = serde_json::to_value(&format).unwrap();
        assert_eq!(json["mode"], "CLASSIC");
        assert_eq!(json["num_pools"], 2);
        assert_eq!(json["qualifiers_per_pool"], 2);
        assert_eq!(json["pool_config"]["win_by_two"], true);
        assert_eq!(json["playoff_config"]["tie_break_points"], 15);
    }

    #[test]
    fn koth_format_parses_from_the_persisted_wire_shape() {
        let json = r#"{
            "mode": "KOTH",
            "match_config": { "sets": 1, "points": 21, "win_by_two": false }
        }"#;

        let format: TournamentFormat = serde_json::from_str(json).unwrap();
        assert!(format.is_koth());
        assert!(!format.is_classic());
        match format {
            TournamentFormat::Koth { match_config } => {
                assert_eq!(match_config.points, 21);
                assert!(!match_config.win_by_two);
            }
            TournamentFormat::Classic { .. } => unreachable!(),
        }
    }
}
