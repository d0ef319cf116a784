//! The team balancer: gendered round-robin seeding followed by
//! best-improvement swap refinement.
//!
//! Balancing happens in four steps:
//!
//! 1. Settle the team count: an even number of teams whose average size is
//!    as close as possible to the preferred size, within the hard 3–6 size
//!    bounds.
//! 2. Seed: split the roster into a female group and the rest, shuffle each
//!    (so equally rated players are not always dealt the same way), sort
//!    each by gender-adjusted composite descending, and deal both groups
//!    round-robin. The second pass visits teams short on members first,
//!    keeping total sizes within ±1.
//! 3. Refine: repeatedly apply the single same-gender swap that most
//!    reduces a cost combining per-dimension skill spread and recent-pairing
//!    familiarity, until no swap improves enough.
//! 4. Pair the teams onto courts and attach display averages.
//!
//! The swap scan is restricted to same-gender pairs so the gender balance
//! established by seeding is never disturbed.
//!
//! Randomness is injected: pass a seeded [`rand::rngs::StdRng`] for
//! reproducible assignments, or [`rand::thread_rng()`] in production.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::configuration::BalancerConfig;
use crate::history::PairingHistory;
use crate::player::{Gender, Player, SkillDim};
use crate::team::{SkillAverages, Team};

/// A contest team fields at least this many players.
const MIN_TEAM_SIZE: usize = 3;
/// A contest team fields at most this many players.
const MAX_TEAM_SIZE: usize = 6;

/// Partition `players` into an even number of balanced teams.
///
/// Every input player appears in exactly one output team; an empty roster
/// yields an empty list. Inputs are never mutated. `num_courts` is the
/// planned court count and does not influence the team count; teams are
/// paired onto courts two at a time regardless.
///
/// Deterministic for a given RNG state: the only randomness is the seeding
/// shuffle that breaks ties between equally rated players.
pub fn balance_teams<R: Rng>(
    players: &[Player],
    num_courts: u32,
    preferred_team_size: usize,
    history: Option<&PairingHistory>,
    config: &BalancerConfig,
    rng: &mut R,
) -> Vec<Team> {
    if players.is_empty() {
        return Vec::new();
    }

    let num_teams = team_count(players.len(), preferred_team_size);
    debug!(num_teams, roster = players.len(), "team count settled");

    let mut buckets = seed(players, num_teams, config, rng);
    refine(&mut buckets, history, config);

    let teams: Vec<Team> = buckets
        .into_iter()
        .filter(|bucket| !bucket.is_empty())
        .enumerate()
        .map(|(idx, members)| {
            let players: Vec<Player> = members.into_iter().cloned().collect();
            let averages = SkillAverages::of(&players);
            Team {
                court_number: (idx / 2) as u32 + 1,
                label: if idx % 2 == 0 { "Team A" } else { "Team B" }.to_owned(),
                players,
                averages,
            }
        })
        .collect();

    if teams.len() as u32 > num_courts * 2 {
        debug!(
            teams = teams.len(),
            num_courts, "more team pairs than planned courts"
        );
    }
    teams
}

/// Even team count whose average size sits closest to the preferred size,
/// clamped so sizes stay within the hard 3–6 bounds.
fn team_count(roster: usize, preferred_size: usize) -> usize {
    let preferred_size = preferred_size.max(1);
    let mut num = (roster as f64 / preferred_size as f64).round() as usize;

    if num % 2 != 0 {
        let lower = num.saturating_sub(1).max(2);
        let upper = num + 1;
        let lower_size = roster as f64 / lower as f64;
        let upper_size = roster as f64 / upper as f64;
        let preferred = preferred_size as f64;
        num = if (lower_size - preferred).abs() <= (upper_size - preferred).abs() {
            lower
        } else {
            upper
        };
    }
    if num < 2 {
        num = 2;
    }

    // Hard guardrails: average size >= 3, ceiling size <= 6.
    while num > 2 && (roster as f64 / num as f64) < MIN_TEAM_SIZE as f64 {
        num -= 2;
    }
    while roster.div_ceil(num) > MAX_TEAM_SIZE && num < roster {
        num += 2;
    }
    num.max(2)
}

/// Deal the roster into `num_teams` buckets, women first.
fn seed<'a, R: Rng>(
    players: &'a [Player],
    num_teams: usize,
    config: &BalancerConfig,
    rng: &mut R,
) -> Vec<Vec<&'a Player>> {
    let mut women: Vec<&Player> = players
        .iter()
        .filter(|p| p.gender == Some(Gender::Female))
        .collect();
    let mut rest: Vec<&Player> = players
        .iter()
        .filter(|p| p.gender != Some(Gender::Female))
        .collect();

    // Shuffle before sorting so equally rated players rotate between runs.
    women.shuffle(rng);
    rest.shuffle(rng);
    women.sort_by(|a, b| {
        effective_composite(b, config).total_cmp(&effective_composite(a, config))
    });
    rest.sort_by(|a, b| {
        effective_composite(b, config).total_cmp(&effective_composite(a, config))
    });

    let mut buckets: Vec<Vec<&Player>> = vec![Vec::new(); num_teams];
    for (i, &player) in women.iter().enumerate() {
        buckets[i % num_teams].push(player);
    }

    // Visit teams short on members first so teams that received fewer women
    // receive more of the remaining roster, keeping sizes within ±1.
    let mut order: Vec<usize> = (0..num_teams).collect();
    order.sort_by_key(|&t| buckets[t].len());
    for (i, &player) in rest.iter().enumerate() {
        buckets[order[i % num_teams]].push(player);
    }

    buckets
}

/// Best-improvement local search over same-gender swaps.
fn refine(buckets: &mut [Vec<&Player>], history: Option<&PairingHistory>, config: &BalancerConfig) {
    let weight = if history.is_some() {
        config.familiarity_weight
    } else {
        0.0
    };

    for iteration in 0..config.max_iterations {
        let current = cost(buckets, history, weight, config);
        let mut best_gain = 0.0;
        let mut best_swap: Option<(usize, usize, usize, usize)> = None;

        for team_a in 0..buckets.len().saturating_sub(1) {
            for team_b in team_a + 1..buckets.len() {
                for i in 0..buckets[team_a].len() {
                    for j in 0..buckets[team_b].len() {
                        if buckets[team_a][i].gender != buckets[team_b][j].gender {
                            continue;
                        }

                        let (pa, pb) = (buckets[team_a][i], buckets[team_b][j]);
                        buckets[team_a][i] = pb;
                        buckets[team_b][j] = pa;
                        let gain = current - cost(buckets, history, weight, config);
                        buckets[team_a][i] = pa;
                        buckets[team_b][j] = pb;

                        if gain > best_gain {
                            best_gain = gain;
                            best_swap = Some((team_a, i, team_b, j));
                        }
                    }
                }
            }
        }

        match best_swap {
            Some((team_a, i, team_b, j)) if best_gain > config.convergence_threshold => {
                trace!(iteration, gain = best_gain, "applying swap");
                let (pa, pb) = (buckets[team_a][i], buckets[team_b][j]);
                buckets[team_a][i] = pb;
                buckets[team_b][j] = pa;
            }
            _ => {
                debug!(iterations = iteration, "refinement converged");
                return;
            }
        }
    }
    debug!("refinement stopped at the iteration cap");
}

fn cost(
    buckets: &[Vec<&Player>],
    history: Option<&PairingHistory>,
    weight: f64,
    config: &BalancerConfig,
) -> f64 {
    imbalance(buckets, config) + weight * familiarity(buckets, history)
}

/// Worst per-dimension spread of normalized team scores across all
/// non-empty teams.
fn imbalance(buckets: &[Vec<&Player>], config: &BalancerConfig) -> f64 {
    let scores: Vec<[f64; 4]> = buckets
        .iter()
        .filter(|bucket| !bucket.is_empty())
        .map(|bucket| normalized_scores(bucket, config))
        .collect();
    if scores.len() < 2 {
        return 0.0;
    }

    let mut max_spread = 0.0f64;
    for dim in 0..4 {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for score in &scores {
            lo = lo.min(score[dim]);
            hi = hi.max(score[dim]);
        }
        max_spread = max_spread.max(hi - lo);
    }
    max_spread
}

/// Gender-adjusted per-dimension sums divided by the member count.
///
/// A team of exactly 3 divides by 4 instead: it plays one short of a
/// standard four and needs stronger members to match.
fn normalized_scores(team: &[&Player], config: &BalancerConfig) -> [f64; 4] {
    let mut sums = [0.0f64; 4];
    for player in team {
        let mult = multiplier(player, config);
        for (slot, dim) in sums.iter_mut().zip(SkillDim::ALL) {
            *slot += f64::from(player.skills.get(dim)) * mult;
        }
    }
    let divisor = if team.len() == 3 { 4.0 } else { team.len() as f64 };
    sums.map(|sum| sum / divisor)
}

/// Sum of recorded co-occurrence counts over every intra-team pair.
fn familiarity(buckets: &[Vec<&Player>], history: Option<&PairingHistory>) -> f64 {
    let Some(history) = history else {
        return 0.0;
    };
    let mut total = 0u64;
    for team in buckets {
        for i in 0..team.len() {
            for j in i + 1..team.len() {
                total += u64::from(history.count(team[i].id, team[j].id));
            }
        }
    }
    total as f64
}

fn multiplier(player: &Player, config: &BalancerConfig) -> f64 {
    match player.gender {
        Some(Gender::Female) => config.female_multiplier,
        _ => 1.0,
    }
}

fn effective_composite(player: &Player, config: &BalancerConfig) -> f64 {
    f64::from(player.skills.total()) * multiplier(player, config)
}
