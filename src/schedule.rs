//! Match schedule generation: round-robin pools, elimination brackets, and
//! KOTH rounds.
//!
//! All generators return fresh [`Match`] lists meant to be persisted by the
//! caller, wholesale-replacing (or appending to) the contest's previous
//! schedule. Nothing here reads or writes storage.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::EngineError;
use crate::matches::{BracketRound, Match, Round};
use crate::player::PlayerId;
use crate::team::TeamId;

/// A KOTH round needs at least two pairs on court.
const MIN_KOTH_PLAYERS: usize = 4;

/// A qualified team's position in its pool's final ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRanking {
    /// 0-based pool index (pool 0 is `POOL_A`).
    pub pool_index: usize,
    /// The ranked team.
    pub team: TeamId,
    /// 1-based rank within the pool.
    pub rank: u32,
}

/// An elimination pairing produced by [`cross_pool_pairings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    /// Slot A of the future match.
    pub team_a: TeamId,
    /// Slot B of the future match.
    pub team_b: TeamId,
}

/// A team slot created for one KOTH round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoundTeam {
    /// Fresh identity, minted from the injected RNG.
    pub id: TeamId,
    /// 1-based court; two consecutive slots share a court.
    pub court_number: u32,
    /// "R{round} Team A" / "R{round} Team B", alternating per court.
    pub label: String,
    /// Members drawn from the shuffled roster.
    pub players: Vec<PlayerId>,
}

/// Teams and matches of one freshly generated KOTH round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KothRound {
    /// One team per slot, `2 × num_courts` in total.
    pub teams: Vec<RoundTeam>,
    /// One match per court.
    pub matches: Vec<Match>,
}

/// Distribute teams into pools round-robin by list index.
///
/// Pool sizes end up as equal as possible: 8 teams in 2 pools give 4 and 4,
/// 7 teams give 4 and 3.
pub fn distribute_into_pools(team_ids: &[TeamId], num_pools: usize) -> Vec<Vec<TeamId>> {
    let mut pools: Vec<Vec<TeamId>> = vec![Vec::new(); num_pools.max(1)];
    let n = pools.len();
    for (i, id) in team_ids.iter().enumerate() {
        pools[i % n].push(*id);
    }
    pools
}

/// Generate the full pool-play schedule.
///
/// Within each pool every unordered pair of teams plays exactly once, so a
/// pool of n teams yields n(n−1)/2 matches. Each pool gets its own court
/// (`starting_court + pool index`) and match orders run sequentially across
/// pools. A pool with fewer than 2 teams contributes no matches; fewer than
/// 2 teams overall is an error.
pub fn generate_pool_matches(
    team_ids_by_pool: &[Vec<TeamId>],
    starting_court: u32,
) -> Result<Vec<Match>, EngineError> {
    let total: usize = team_ids_by_pool.iter().map(Vec::len).sum();
    if total < 2 {
        return Err(EngineError::NotEnoughTeams(total));
    }

    let mut matches = Vec::new();
    let mut order = 0;
    for (pool_idx, pool) in team_ids_by_pool.iter().enumerate() {
        let court = starting_court + pool_idx as u32;
        for i in 0..pool.len() {
            for j in i + 1..pool.len() {
                matches.push(Match::scheduled(
                    Some(pool[i]),
                    Some(pool[j]),
                    Round::Pool(pool_idx),
                    court,
                    order,
                ));
                order += 1;
            }
        }
    }

    debug!(
        pools = team_ids_by_pool.len(),
        matches = matches.len(),
        "generated pool schedule"
    );
    Ok(matches)
}

/// Produce elimination pairings from final pool rankings.
///
/// With exactly two pools, rank r in pool A meets rank
/// `qualifiers_per_pool − r + 1` in pool B. With three or more pools, all
/// qualified teams are sorted by rank then pool index and paired first
/// against last, working inward; an odd leftover qualifier is dropped.
pub fn cross_pool_pairings(
    pool_rankings: &[PoolRanking],
    num_pools: usize,
    qualifiers_per_pool: u32,
) -> Vec<Pairing> {
    if num_pools == 2 {
        let find = |pool: usize, rank: u32| {
            pool_rankings
                .iter()
                .find(|entry| entry.pool_index == pool && entry.rank == rank)
                .map(|entry| entry.team)
        };

        let mut pairings = Vec::new();
        for rank in 1..=qualifiers_per_pool {
            if let (Some(team_a), Some(team_b)) =
                (find(0, rank), find(1, qualifiers_per_pool - rank + 1))
            {
                pairings.push(Pairing { team_a, team_b });
            }
        }
        pairings
    } else {
        let mut qualified: Vec<&PoolRanking> = pool_rankings
            .iter()
            .filter(|entry| entry.rank <= qualifiers_per_pool)
            .collect();
        qualified.sort_by_key(|entry| (entry.rank, entry.pool_index));

        (0..qualified.len() / 2)
            .map(|i| Pairing {
                team_a: qualified[i].team,
                team_b: qualified[qualified.len() - 1 - i].team,
            })
            .collect()
    }
}

/// Materialize bracket pairings into scheduled matches.
///
/// Matches rotate over four courts starting at `starting_court` and take
/// sequential orders from `starting_order`. Derive the label with
/// [`BracketRound::from_match_count`] when following the usual convention.
pub fn bracket_matches(
    pairings: &[Pairing],
    round: BracketRound,
    starting_court: u32,
    starting_order: usize,
) -> Vec<Match> {
    pairings
        .iter()
        .enumerate()
        .map(|(i, pairing)| {
            Match::scheduled(
                Some(pairing.team_a),
                Some(pairing.team_b),
                Round::Bracket(round),
                starting_court + (i % 4) as u32,
                starting_order + i,
            )
        })
        .collect()
}

/// Generate one KOTH round: shuffled teams and one match per court.
///
/// The roster is shuffled and dealt round-robin into `2 × num_courts` team
/// slots — intentionally simpler than the balancer, no skill or gender
/// weighting. Team identities are minted from the RNG so a seeded generator
/// reproduces the round exactly. Fewer than 4 present players is an
/// insufficient-data error.
pub fn generate_koth_round<R: Rng>(
    player_ids: &[PlayerId],
    num_courts: u32,
    round_number: u32,
    starting_order: usize,
    rng: &mut R,
) -> Result<KothRound, EngineError> {
    if num_courts == 0 {
        return Err(EngineError::NoCourts);
    }
    if player_ids.len() < MIN_KOTH_PLAYERS {
        return Err(EngineError::NotEnoughPlayers {
            required: MIN_KOTH_PLAYERS,
            actual: player_ids.len(),
        });
    }

    let mut shuffled = player_ids.to_vec();
    shuffled.shuffle(rng);

    let num_teams = num_courts as usize * 2;
    let mut slots: Vec<Vec<PlayerId>> = vec![Vec::new(); num_teams];
    for (i, id) in shuffled.iter().enumerate() {
        slots[i % num_teams].push(*id);
    }

    let teams: Vec<RoundTeam> = slots
        .into_iter()
        .enumerate()
        .map(|(slot, players)| RoundTeam {
            id: Uuid::from_u128(rng.gen()),
            court_number: (slot / 2) as u32 + 1,
            label: format!(
                "R{round_number} Team {}",
                if slot % 2 == 0 { 'A' } else { 'B' }
            ),
            players,
        })
        .collect();

    let matches: Vec<Match> = (0..num_courts as usize)
        .map(|court| {
            Match::scheduled(
                Some(teams[court * 2].id),
                Some(teams[court * 2 + 1].id),
                Round::Koth(round_number),
                court as u32 + 1,
                starting_order + court,
            )
        })
        .collect();

    info!(
        round = round_number,
        teams = teams.len(),
        matches = matches.len(),
        "generated KOTH round"
    );
    Ok(KothRound { teams, matches })
}

/// One greater than the highest existing KOTH round number, starting at 1.
pub fn next_koth_round_number(matches: &[Match]) -> u32 {
    matches
        .iter()
        .filter_map(|m| match m.round {
            Round::Koth(n) => Some(n),
            _ => None,
        })
        .max()
        .map_or(1, |n| n + 1)
}
