//! Standings recomputation.
//!
//! Standings are a pure function of the finished matches recorded so far for
//! a contest: each call derives a complete fresh set, meant to replace the
//! previous one wholesale. Nothing is incrementally mutated.
//!
//! Classic scoring is team-scoped (a win is worth 3 points); KOTH scoring is
//! participant-scoped (every member of the winning slot earns
//! `3 + |scoreA − scoreB|`). Both sort by points, then point differential,
//! then wins, all descending; ties keep their arrival order.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matches::{Match, MatchStatus, Round};
use crate::player::PlayerId;
use crate::schedule::PoolRanking;
use crate::team::TeamId;

/// One standings row; `Id` is a team for Classic scoring and a player for
/// KOTH.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing<Id> {
    /// The ranked entrant.
    pub id: Id,
    /// Accumulated points.
    pub points: u32,
    /// Finished matches the entrant took part in.
    pub matches_played: u32,
    /// Matches won.
    pub wins: u32,
    /// Matches lost.
    pub losses: u32,
    /// Signed accumulated score differential.
    pub points_diff: i32,
    /// 1-based rank after sorting.
    pub rank: u32,
}

impl<Id> Standing<Id> {
    fn zero(id: Id) -> Self {
        Standing {
            id,
            points: 0,
            matches_played: 0,
            wins: 0,
            losses: 0,
            points_diff: 0,
            rank: 0,
        }
    }
}

/// Team-scoped standings over the given matches.
///
/// Every id in `team_ids` gets a row, played or not. Only FINISHED matches
/// whose both slots are known teams count: the winner earns 3 points and a
/// win, the loser a loss, and both accumulate their signed score
/// differential.
pub fn classic_standings(matches: &[Match], team_ids: &[TeamId]) -> Vec<Standing<TeamId>> {
    let mut index: HashMap<TeamId, usize> = HashMap::new();
    let mut rows: Vec<Standing<TeamId>> = Vec::with_capacity(team_ids.len());
    for &id in team_ids {
        if !index.contains_key(&id) {
            index.insert(id, rows.len());
            rows.push(Standing::zero(id));
        }
    }

    for m in matches {
        if m.status != MatchStatus::Finished {
            continue;
        }
        let (Some(a), Some(b)) = (m.team_a, m.team_b) else {
            continue;
        };
        let (Some(&ia), Some(&ib)) = (index.get(&a), index.get(&b)) else {
            continue;
        };

        let score_a = m.score_a.unwrap_or(0) as i32;
        let score_b = m.score_b.unwrap_or(0) as i32;

        rows[ia].matches_played += 1;
        rows[ib].matches_played += 1;
        rows[ia].points_diff += score_a - score_b;
        rows[ib].points_diff += score_b - score_a;

        if m.winner == Some(a) {
            rows[ia].wins += 1;
            rows[ia].points += 3;
            rows[ib].losses += 1;
        } else if m.winner == Some(b) {
            rows[ib].wins += 1;
            rows[ib].points += 3;
            rows[ia].losses += 1;
        }
    }

    rank(&mut rows);
    debug!(teams = rows.len(), "recomputed classic standings");
    rows
}

/// Participant-scoped KOTH standings over the given matches.
///
/// Every player belonging to any team referenced by any match gets a row.
/// For each FINISHED match, members of the winning slot earn
/// `3 + |scoreA − scoreB|` points and a win, members of the losing slot a
/// loss; both sides accumulate their slot's signed differential.
pub fn koth_standings(
    matches: &[Match],
    membership: &HashMap<TeamId, Vec<PlayerId>>,
) -> Vec<Standing<PlayerId>> {
    let mut index: HashMap<PlayerId, usize> = HashMap::new();
    let mut rows: Vec<Standing<PlayerId>> = Vec::new();

    for m in matches {
        for team in [m.team_a, m.team_b].into_iter().flatten() {
            for &player in members_of(membership, team) {
                if !index.contains_key(&player) {
                    index.insert(player, rows.len());
                    rows.push(Standing::zero(player));
                }
            }
        }
    }

    for m in matches {
        if m.status != MatchStatus::Finished {
            continue;
        }
        let (Some(a), Some(b)) = (m.team_a, m.team_b) else {
            continue;
        };

        let score_a = m.score_a.unwrap_or(0) as i32;
        let score_b = m.score_b.unwrap_or(0) as i32;
        let win_points = 3 + score_a.abs_diff(score_b);

        for (team, own, other) in [(a, score_a, score_b), (b, score_b, score_a)] {
            for &player in members_of(membership, team) {
                let Some(&row) = index.get(&player) else {
                    continue;
                };
                let entry = &mut rows[row];
                entry.matches_played += 1;
                entry.points_diff += own - other;
                if m.winner == Some(team) {
                    entry.wins += 1;
                    entry.points += win_points;
                } else {
                    entry.losses += 1;
                }
            }
        }
    }

    rank(&mut rows);
    debug!(players = rows.len(), "recomputed KOTH standings");
    rows
}

/// Rank each pool independently and emit the rows
/// [`cross_pool_pairings`](crate::schedule::cross_pool_pairings) consumes.
///
/// Pool membership is derived from the match slots; each pool's teams are
/// ranked over that pool's matches only.
pub fn pool_rankings(matches: &[Match]) -> Vec<PoolRanking> {
    let mut pools: BTreeMap<usize, Vec<Match>> = BTreeMap::new();
    for m in matches {
        if let Round::Pool(idx) = m.round {
            pools.entry(idx).or_default().push(m.clone());
        }
    }

    let mut rankings = Vec::new();
    for (pool_index, pool_matches) in pools {
        let mut team_ids: Vec<TeamId> = Vec::new();
        for m in &pool_matches {
            for team in [m.team_a, m.team_b].into_iter().flatten() {
                if !team_ids.contains(&team) {
                    team_ids.push(team);
                }
            }
        }

        for standing in classic_standings(&pool_matches, &team_ids) {
            rankings.push(PoolRanking {
                pool_index,
                team: standing.id,
                rank: standing.rank,
            });
        }
    }
    rankings
}

fn members_of(membership: &HashMap<TeamId, Vec<PlayerId>>, team: TeamId) -> &[PlayerId] {
    membership.get(&team).map(Vec::as_slice).unwrap_or(&[])
}

/// Sort by (points, differential, wins) descending and assign ranks 1..N.
/// The sort is stable: ties keep the order they arrived in.
fn rank<Id>(rows: &mut [Standing<Id>]) {
    rows.sort_by(|x, y| {
        (y.points, y.points_diff, y.wins).cmp(&(x.points, x.points_diff, x.wins))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{distribute_into_pools, generate_pool_matches};
    use uuid::Uuid;

    fn tid(n: u128) -> TeamId {
        Uuid::from_u128(n)
    }

    fn finished(a: TeamId, b: TeamId, score_a: u32, score_b: u32) -> Match {
        let mut m = Match::scheduled(Some(a), Some(b), Round::Pool(0), 1, 0);
        m.finish(score_a, score_b).unwrap();
        m
    }

    #[test]
    fn a_single_finished_match_credits_both_sides() {
        let (x, y) = (tid(1), tid(2));
        let matches = vec![finished(x, y, 25, 20)];

        let standings = classic_standings(&matches, &[x, y]);

        assert_eq!(standings[0].id, x);
        assert_eq!(standings[0].points, 3);
        assert_eq!(standings[0].wins, 1);
        assert_eq!(standings[0].losses, 0);
        assert_eq!(standings[0].matches_played, 1);
        assert_eq!(standings[0].points_diff, 5);
        assert_eq!(standings[0].rank, 1);

        assert_eq!(standings[1].id, y);
        assert_eq!(standings[1].points, 0);
        assert_eq!(standings[1].losses, 1);
        assert_eq!(standings[1].points_diff, -5);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn unfinished_matches_do_not_count() {
        let (x, y) = (tid(1), tid(2));
        let mut live = Match::scheduled(Some(x), Some(y), Round::Pool(0), 1, 0);
        live.save_score(10, 8).unwrap();

        let standings = classic_standings(&[live], &[x, y]);
        assert!(standings.iter().all(|s| s.matches_played == 0));
        assert!(standings.iter().all(|s| s.points == 0));
    }

    #[test]
    fn order_is_lexicographic_on_points_diff_wins() {
        let standings = classic_standings(
            &[
                finished(tid(1), tid(2), 25, 20), // 1 beats 2 by 5
                finished(tid(3), tid(4), 25, 15), // 3 beats 4 by 10
                finished(tid(2), tid(4), 25, 23), // 2 beats 4 by 2
            ],
            &[tid(1), tid(2), tid(3), tid(4)],
        );

        // 1 and 3 both have 3 points; 3 wins on differential.
        // 2 has 3 points, diff -3. 4 lost twice.
        let order: Vec<TeamId> = standings.iter().map(|s| s.id).collect();
        assert_eq!(order, vec![tid(3), tid(1), tid(2), tid(4)]);
        assert_eq!(
            standings.iter().map(|s| s.rank).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );

        for pair in standings.windows(2) {
            let (hi, lo) = (&pair[0], &pair[1]);
            assert!(
                (hi.points, hi.points_diff, hi.wins) >= (lo.points, lo.points_diff, lo.wins)
            );
        }
    }

    #[test]
    fn every_known_team_gets_a_row() {
        let standings = classic_standings(&[], &[tid(1), tid(2), tid(3)]);
        assert_eq!(standings.len(), 3);
        assert!(standings.iter().all(|s| s.matches_played == 0));
        assert_eq!(
            standings.iter().map(|s| s.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn koth_rewards_every_member_of_the_winning_slot() {
        let (ta, tb) = (tid(10), tid(11));
        let membership: HashMap<TeamId, Vec<PlayerId>> = HashMap::from([
            (ta, vec![Uuid::from_u128(1), Uuid::from_u128(2)]),
            (tb, vec![Uuid::from_u128(3), Uuid::from_u128(4)]),
        ]);

        let mut m = Match::scheduled(Some(ta), Some(tb), Round::Koth(1), 1, 0);
        m.finish(21, 17).unwrap();

        let standings = koth_standings(&[m], &membership);
        assert_eq!(standings.len(), 4);

        // Winners earn 3 + |21 - 17| = 7 points each.
        for winner in [Uuid::from_u128(1), Uuid::from_u128(2)] {
            let row = standings.iter().find(|s| s.id == winner).unwrap();
            assert_eq!(row.points, 7);
            assert_eq!(row.wins, 1);
            assert_eq!(row.losses, 0);
            assert_eq!(row.points_diff, 4);
        }
        for loser in [Uuid::from_u128(3), Uuid::from_u128(4)] {
            let row = standings.iter().find(|s| s.id == loser).unwrap();
            assert_eq!(row.points, 0);
            assert_eq!(row.losses, 1);
            assert_eq!(row.points_diff, -4);
        }
    }

    #[test]
    fn koth_accumulates_across_rounds() {
        let player = Uuid::from_u128(1);
        let rival = Uuid::from_u128(2);
        let (r1a, r1b) = (tid(10), tid(11));
        let (r2a, r2b) = (tid(20), tid(21));
        let membership: HashMap<TeamId, Vec<PlayerId>> = HashMap::from([
            (r1a, vec![player]),
            (r1b, vec![rival]),
            (r2a, vec![rival]),
            (r2b, vec![player]),
        ]);

        let mut first = Match::scheduled(Some(r1a), Some(r1b), Round::Koth(1), 1, 0);
        first.finish(21, 19).unwrap();
        let mut second = Match::scheduled(Some(r2a), Some(r2b), Round::Koth(2), 1, 1);
        second.finish(15, 21).unwrap();

        let standings = koth_standings(&[first, second], &membership);

        let row = standings.iter().find(|s| s.id == player).unwrap();
        // Won both rounds: (3 + 2) + (3 + 6) points.
        assert_eq!(row.points, 14);
        assert_eq!(row.wins, 2);
        assert_eq!(row.matches_played, 2);
        assert_eq!(row.points_diff, 2 + 6);
        assert_eq!(row.rank, 1);

        let rival_row = standings.iter().find(|s| s.id == rival).unwrap();
        assert_eq!(rival_row.losses, 2);
        assert_eq!(rival_row.points_diff, -8);
    }

    #[test]
    fn pool_rankings_rank_each_pool_independently() {
        let teams: Vec<TeamId> = (0..6).map(tid).collect();
        let pools = distribute_into_pools(&teams, 2);
        let mut matches = generate_pool_matches(&pools, 1).unwrap();

        // Pool A holds teams 0, 2, 4; pool B holds 1, 3, 5. Let the higher
        // id win every match.
        for m in &mut matches {
            if m.team_a.unwrap() > m.team_b.unwrap() {
                m.finish(25, 20).unwrap();
            } else {
                m.finish(20, 25).unwrap();
            }
        }

        let rankings = pool_rankings(&matches);
        assert_eq!(rankings.len(), 6);

        let rank_of = |team: TeamId| rankings.iter().find(|r| r.team == team).unwrap();
        // Within each pool the highest id won both its matches.
        assert_eq!(rank_of(tid(4)).rank, 1);
        assert_eq!(rank_of(tid(4)).pool_index, 0);
        assert_eq!(rank_of(tid(0)).rank, 3);
        assert_eq!(rank_of(tid(5)).rank, 1);
        assert_eq!(rank_of(tid(5)).pool_index, 1);
        assert_eq!(rank_of(tid(1)).rank, 3);
    }
}
