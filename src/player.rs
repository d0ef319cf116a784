//! The participant data model.
//!
//! Players are supplied by the caller for each invocation; the crate holds
//! no roster state between calls. Identity comes from the caller's store as
//! UUIDs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a participant, assigned by the caller's store.
pub type PlayerId = Uuid;

/// Optional binary gender attribute.
///
/// Used only to balance teams (seeding quotas and the skill multiplier),
/// never to exclude anyone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Counted toward the per-team quota and the adjusted composite.
    Female,
    /// Balanced with the unspecified group.
    Male,
}

/// One of the four rated skill dimensions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillDim {
    /// Serving.
    Service,
    /// Reception and passing.
    Pass,
    /// Attacking at the net.
    Attack,
    /// Defense and digging.
    Defense,
}

impl SkillDim {
    /// All four dimensions, in rating order.
    pub const ALL: [SkillDim; 4] = [
        SkillDim::Service,
        SkillDim::Pass,
        SkillDim::Attack,
        SkillDim::Defense,
    ];
}

/// Integer skill ratings, one per dimension.
///
/// The expected range is 1..=10; values come range-checked from the caller's
/// store and are not re-validated here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skills {
    /// Serving rating.
    pub service: u8,
    /// Passing rating.
    pub pass: u8,
    /// Attacking rating.
    pub attack: u8,
    /// Defensive rating.
    pub defense: u8,
}

impl Skills {
    /// The same rating on all four dimensions.
    pub fn uniform(rating: u8) -> Self {
        Skills {
            service: rating,
            pass: rating,
            attack: rating,
            defense: rating,
        }
    }

    /// Rating of a single dimension.
    pub fn get(&self, dim: SkillDim) -> u8 {
        match dim {
            SkillDim::Service => self.service,
            SkillDim::Pass => self.pass,
            SkillDim::Attack => self.attack,
            SkillDim::Defense => self.defense,
        }
    }

    /// Sum of the four ratings.
    pub fn total(&self) -> u32 {
        u32::from(self.service) + u32::from(self.pass) + u32::from(self.attack) + u32::from(self.defense)
    }
}

/// A participant as supplied by the caller for one invocation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Player {
    /// Identity in the caller's store.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Balancing attribute; `None` balances with the male group.
    pub gender: Option<Gender>,
    /// The four skill ratings.
    pub skills: Skills,
    /// Inactive players are normally filtered out by the caller.
    pub active: bool,
    /// Guests carry provisional ratings but are balanced like anyone else.
    pub guest: bool,
}
