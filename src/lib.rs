//! # Courtside
//!
//! Balanced team generation and tournament scheduling for court sports,
//! built as a pure in-process library: callers feed in plain roster and
//! match data and persist whatever comes back.
//!
//! It provides:
//! - A team balancer ([`balancer::balance_teams`]) that partitions present
//!   players into an even number of 3–6 member teams, balancing gender,
//!   per-dimension skill strength, and recent-pairing familiarity
//! - Schedule generation for round-robin pools, cross-pool elimination
//!   brackets, and randomized "king of the hill" rounds (the [`schedule`]
//!   module)
//! - Standings recomputation for both scoring topologies, team-scoped
//!   Classic and participant-scoped KOTH (the [`standings`] module)
//! - A small match lifecycle (scheduled → in progress → finished) with
//!   validated transitions ([`matches::Match`])
//!
//! The crate performs no I/O and holds no state between calls: concurrent
//! invocations for different contests are inherently safe, while calls for
//! the same contest are the caller's to serialize, since every output is
//! meant to replace prior state wholesale rather than merge with it.
//!
//! Randomized tie-breaking (the seeding shuffle and KOTH team draws) is
//! injected as a [`rand::Rng`] parameter: pass a seeded generator for
//! reproducible results, or [`rand::thread_rng()`] in production.
//!
//! # Usage Example
//!
//! Balance a roster, schedule pool play, record a result, and read the
//! standings:
//!
//! ```
//! use courtside::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//! use uuid::Uuid;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let roster: Vec<Player> = (0..12)
//!     .map(|n| Player {
//!         id: Uuid::from_u128(n),
//!         name: format!("Player {n}"),
//!         gender: if n < 4 { Some(Gender::Female) } else { Some(Gender::Male) },
//!         skills: Skills::uniform(5),
//!         active: true,
//!         guest: false,
//!     })
//!     .collect();
//!
//! let teams = balance_teams(&roster, 2, 4, None, &BalancerConfig::new(), &mut rng);
//! assert_eq!(teams.len(), 4);
//!
//! // Persist the teams, then feed their stored ids into the engine.
//! let team_ids: Vec<TeamId> = (0..teams.len() as u128).map(Uuid::from_u128).collect();
//! let pools = distribute_into_pools(&team_ids, 2);
//! let mut matches = generate_pool_matches(&pools, 1)?;
//!
//! matches[0].start()?;
//! matches[0].finish(25, 21)?;
//!
//! let standings = classic_standings(&matches, &team_ids);
//! assert_eq!(standings[0].points, 3);
//! # Ok::<(), courtside::EngineError>(())
//! ```
#![warn(missing_docs)]

pub mod balancer;
pub mod configuration;
mod error;
pub mod format;
pub mod history;
pub mod logger;
pub mod matches;
pub mod player;
pub mod schedule;
pub mod standings;
pub mod team;

pub use error::EngineError;

/// Commonly used types and functions for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use courtside::prelude::*;
/// ```
pub mod prelude {
    pub use crate::balancer::balance_teams;
    pub use crate::configuration::BalancerConfig;
    pub use crate::error::EngineError;
    pub use crate::format::{MatchConfig, PlayoffConfig, TournamentFormat};
    pub use crate::history::PairingHistory;
    pub use crate::matches::{BracketRound, Match, MatchStatus, Round};
    pub use crate::player::{Gender, Player, PlayerId, SkillDim, Skills};
    pub use crate::schedule::{
        bracket_matches, cross_pool_pairings, distribute_into_pools, generate_koth_round,
        generate_pool_matches, next_koth_round_number, KothRound, Pairing, PoolRanking, RoundTeam,
    };
    pub use crate::standings::{classic_standings, koth_standings, pool_rankings, Standing};
    pub use crate::team::{SkillAverages, Team, TeamId};
}
