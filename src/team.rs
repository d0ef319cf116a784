//! The balanced-team output type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::player::{Player, SkillDim};

/// Identifier of a team, assigned by the caller's store (or minted by the
/// engine for KOTH round teams).
pub type TeamId = Uuid;

/// Per-dimension and overall skill averages of a team, rounded to one
/// decimal and computed from raw (non-gender-adjusted) ratings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SkillAverages {
    /// Average serving rating.
    pub service: f32,
    /// Average passing rating.
    pub pass: f32,
    /// Average attacking rating.
    pub attack: f32,
    /// Average defensive rating.
    pub defense: f32,
    /// Mean of the four dimension averages.
    pub overall: f32,
}

impl SkillAverages {
    /// Averages of a member list; an empty list yields all zeros.
    pub fn of(players: &[Player]) -> Self {
        if players.is_empty() {
            return SkillAverages {
                service: 0.0,
                pass: 0.0,
                attack: 0.0,
                defense: 0.0,
                overall: 0.0,
            };
        }

        let mut avgs = [0.0f64; 4];
        for (slot, dim) in avgs.iter_mut().zip(SkillDim::ALL) {
            let sum: u32 = players.iter().map(|p| u32::from(p.skills.get(dim))).sum();
            *slot = f64::from(sum) / players.len() as f64;
        }
        let overall = avgs.iter().sum::<f64>() / avgs.len() as f64;

        SkillAverages {
            service: round1(avgs[0]),
            pass: round1(avgs[1]),
            attack: round1(avgs[2]),
            defense: round1(avgs[3]),
            overall: round1(overall),
        }
    }
}

fn round1(value: f64) -> f32 {
    ((value * 10.0).round() / 10.0) as f32
}

/// One generated team.
///
/// Teams are produced fresh on every balancing run and are meant to replace
/// the previous assignment wholesale; they are never mutated in place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    /// 1-based court assignment; two consecutive teams share a court.
    pub court_number: u32,
    /// "Team A" or "Team B", alternating per court.
    pub label: String,
    /// Owned copies of the assigned players.
    pub players: Vec<Player>,
    /// Derived averages for display.
    pub averages: SkillAverages,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Skills;
    use uuid::Uuid;

    fn player(skills: Skills) -> Player {
        Player {
            id: Uuid::new_v4(),
            name: "p".to_owned(),
            gender: None,
            skills,
            active: true,
            guest: false,
        }
    }

    #[test]
    fn averages_are_rounded_to_one_decimal() {
        let members = vec![
            player(Skills { service: 5, pass: 4, attack: 3, defense: 2 }),
            player(Skills { service: 6, pass: 4, attack: 4, defense: 3 }),
            player(Skills { service: 6, pass: 5, attack: 4, defense: 3 }),
        ];

        let avgs = SkillAverages::of(&members);
        // 17/3 = 5.666..., 13/3 = 4.333..., 11/3 = 3.666..., 8/3 = 2.666...
        assert_eq!(avgs.service, 5.7);
        assert_eq!(avgs.pass, 4.3);
        assert_eq!(avgs.attack, 3.7);
        assert_eq!(avgs.defense, 2.7);
        // overall is the mean of the unrounded dimension averages
        assert_eq!(avgs.overall, 4.1);
    }

    #[test]
    fn empty_team_averages_are_zero() {
        let avgs = SkillAverages::of(&[]);
        assert_eq!(avgs.overall, 0.0);
        assert_eq!(avgs.service, 0.0);
    }
}
