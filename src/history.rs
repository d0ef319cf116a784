//! Recent-pairing familiarity counts.

use std::collections::HashMap;

use crate::player::PlayerId;

/// How many times each unordered pair of participants recently shared a team.
///
/// Supplied by the caller, typically counted over a bounded window of recent
/// contests (the window itself is the caller's policy). When no history is
/// passed to the balancer the familiarity term is disabled entirely.
#[derive(Debug, Default, Clone)]
pub struct PairingHistory {
    counts: HashMap<(PlayerId, PlayerId), u32>,
}

impl PairingHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count co-occurrences over historical team rosters.
    ///
    /// Each roster is the member list of one past team; every unordered pair
    /// within a roster counts once per roster it appears in.
    pub fn from_rosters<I, R>(rosters: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[PlayerId]>,
    {
        let mut history = Self::new();
        for roster in rosters {
            let members = roster.as_ref();
            for i in 0..members.len() {
                for j in i + 1..members.len() {
                    history.record(members[i], members[j]);
                }
            }
        }
        history
    }

    /// Record one more shared-team occurrence for the pair.
    ///
    /// Self-pairs are ignored.
    pub fn record(&mut self, a: PlayerId, b: PlayerId) {
        if a == b {
            return;
        }
        *self.counts.entry(Self::key(a, b)).or_insert(0) += 1;
    }

    /// Number of recorded co-occurrences for the pair, in either order.
    pub fn count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.counts.get(&Self::key(a, b)).copied().unwrap_or(0)
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn pid(n: u128) -> PlayerId {
        Uuid::from_u128(n)
    }

    #[test]
    fn count_is_symmetric() {
        let mut history = PairingHistory::new();
        history.record(pid(1), pid(2));
        history.record(pid(2), pid(1));

        assert_eq!(history.count(pid(1), pid(2)), 2);
        assert_eq!(history.count(pid(2), pid(1)), 2);
    }

    #[test]
    fn self_pairs_are_ignored() {
        let mut history = PairingHistory::new();
        history.record(pid(1), pid(1));

        assert!(history.is_empty());
        assert_eq!(history.count(pid(1), pid(1)), 0);
    }

    #[test]
    fn from_rosters_counts_every_pair_once_per_roster() {
        let history = PairingHistory::from_rosters([
            vec![pid(1), pid(2), pid(3)],
            vec![pid(1), pid(2)],
        ]);

        assert_eq!(history.count(pid(1), pid(2)), 2);
        assert_eq!(history.count(pid(1), pid(3)), 1);
        assert_eq!(history.count(pid(2), pid(3)), 1);
        assert_eq!(history.count(pid(1), pid(4)), 0);
    }
}
