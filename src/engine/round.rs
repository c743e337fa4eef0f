use crate::types::{PlayerId, UNRESOLVED};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A single pairing of two player slots. Either slot can hold the sentinel,
/// in which case the match is still waiting for an earlier result (or is a bye).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub home: PlayerId,
    pub away: PlayerId,
}

impl Match {
    pub fn new(home: PlayerId, away: PlayerId) -> Self {
        Self { home, away }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        player != UNRESOLVED && (self.home == player || self.away == player)
    }

    /// The occupant of the opposite slot, if `player` is in this match.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        if !self.contains(player) {
            return None;
        }
        if self.home == player {
            Some(self.away)
        } else {
            Some(self.home)
        }
    }
}

/// One elimination stage: the ordered matches played simultaneously at that
/// depth. Ordering is significant, match `k` feeds slot `k` of the next round
/// and matches `2k`/`2k+1` are the children of match `k` one round later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    matches: Vec<Match>,
}

impl Round {
    /// Pairs consecutive players in the given order: `(p[0],p[1]), (p[2],p[3]), ...`
    /// The caller supplies the seeding order; no reordering happens here.
    pub fn pairing(players: &[PlayerId]) -> Self {
        let matches = players
            .iter()
            .copied()
            .tuples()
            .map(|(home, away)| Match::new(home, away))
            .collect();
        Self { matches }
    }

    /// An all-sentinel round of the given size, for stages not yet reached.
    pub fn placeholder(size: usize) -> Self {
        Self {
            matches: vec![Match::default(); size],
        }
    }

    /// Index of the match containing `player`. The sentinel is never found.
    pub fn position_of(&self, player: PlayerId) -> Option<usize> {
        self.matches.iter().position(|m| m.contains(player))
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, index: usize) -> Option<&Match> {
        self.matches.get(index)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_preserves_order() {
        let round = Round::pairing(&[5, 2, 9, 4]);
        assert_eq!(round.len(), 2);
        assert_eq!(round.matches()[0], Match::new(5, 2));
        assert_eq!(round.matches()[1], Match::new(9, 4));
    }

    #[test]
    fn test_position_of_ignores_sentinel() {
        let round = Round::placeholder(4);
        assert_eq!(round.position_of(UNRESOLVED), None);

        let round = Round::pairing(&[1, 2, 3, 4]);
        assert_eq!(round.position_of(3), Some(1));
        assert_eq!(round.position_of(99), None);
    }

    #[test]
    fn test_opponent_of() {
        let pair = Match::new(7, 8);
        assert_eq!(pair.opponent_of(7), Some(8));
        assert_eq!(pair.opponent_of(8), Some(7));
        assert_eq!(pair.opponent_of(9), None);

        let bye = Match::new(7, UNRESOLVED);
        assert_eq!(bye.opponent_of(7), Some(UNRESOLVED));
        assert_eq!(bye.opponent_of(UNRESOLVED), None);
    }
}
