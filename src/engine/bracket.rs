use crate::engine::error::BracketError;
use crate::engine::round::Round;
use crate::types::{NameMap, PlayerId, UNRESOLVED};
use serde::{Deserialize, Serialize};

/// Either the live round still being played, or the decided champion.
/// The engine moves from `Playing` to `Champion` exactly once and never back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketStage {
    Playing(Round),
    Champion(PlayerId),
}

/// A consistent, read-only copy of the engine state, taken in one call so the
/// layout never observes a round mid-advancement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSnapshot {
    pub round_count: usize,
    pub history: Vec<Round>,
    pub stage: BracketStage,
    pub names: NameMap,
}

impl BracketSnapshot {
    pub fn name_of(&self, player: PlayerId) -> &str {
        self.names.get(&player).map(String::as_str).unwrap_or_default()
    }
}

/// The single-elimination state machine.
///
/// Built once from the full seeding order, then mutated in place through
/// [`declare_winner`](Self::declare_winner)/[`declare_loser`](Self::declare_loser)
/// until a single champion remains. One advancer slot is kept per match of the
/// live round; the round advances only once every slot is filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketEngine {
    round_count: usize,
    names: NameMap,
    history: Vec<Round>,
    stage: BracketStage,
    pending: Vec<PlayerId>,
}

impl BracketEngine {
    /// Builds round 0 by pairing consecutive players in the given order.
    ///
    /// Fails with [`BracketError::InvalidBracketSize`] unless the player count
    /// is a power of two, at least 2. Missing name entries resolve to the
    /// empty string.
    pub fn new(players: Vec<PlayerId>, names: Vec<String>) -> Result<Self, BracketError> {
        let n = players.len();
        if n < 2 || !n.is_power_of_two() {
            return Err(BracketError::InvalidBracketSize(n));
        }

        if names.len() != n {
            log::warn!(
                "Got {} names for {} players, missing entries display as empty",
                names.len(),
                n
            );
        }

        let mut name_map = NameMap::from([(UNRESOLVED, String::new())]);
        name_map.extend(players.iter().copied().zip(names));

        let first_round = Round::pairing(&players);
        let pending = vec![UNRESOLVED; first_round.len()];

        Ok(Self {
            round_count: n.ilog2() as usize,
            names: name_map,
            history: vec![],
            stage: BracketStage::Playing(first_round),
            pending,
        })
    }

    /// Records `player` as the advancer of the live-round match containing it.
    ///
    /// Declaring the same winner twice is a no-op; declaring a winner for a
    /// match whose slot already holds a different player fails with
    /// [`BracketError::ConflictingResult`].
    pub fn declare_winner(&mut self, player: PlayerId) -> Result<(), BracketError> {
        let round = self.live_round()?;
        let index = round
            .position_of(player)
            .ok_or(BracketError::PlayerNotFound(player))?;

        self.record_advancer(index, player)
    }

    /// Records the *other* occupant of `player`'s match as the advancer.
    ///
    /// Fails with [`BracketError::InvalidAdvancement`] when the opposite slot
    /// holds the sentinel: advancing it would inject a bye into a later round.
    pub fn declare_loser(&mut self, player: PlayerId) -> Result<(), BracketError> {
        let round = self.live_round()?;
        let index = round
            .position_of(player)
            .ok_or(BracketError::PlayerNotFound(player))?;

        let advancer = round
            .get(index)
            .and_then(|pair| pair.opponent_of(player))
            .ok_or(BracketError::PlayerNotFound(player))?;

        if advancer == UNRESOLVED {
            return Err(BracketError::InvalidAdvancement);
        }

        self.record_advancer(index, advancer)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, BracketStage::Champion(_))
    }

    pub fn champion(&self) -> Option<PlayerId> {
        match self.stage {
            BracketStage::Champion(player) => Some(player),
            BracketStage::Playing(_) => None,
        }
    }

    /// Zero-based index of the round being played, i.e. how many rounds have
    /// fully resolved so far.
    pub fn round_number(&self) -> usize {
        self.history.len()
    }

    /// Total number of rounds the bracket will play, `log2` of the player count.
    pub fn round_count(&self) -> usize {
        self.round_count
    }

    pub fn current_round(&self) -> Option<&Round> {
        match &self.stage {
            BracketStage::Playing(round) => Some(round),
            BracketStage::Champion(_) => None,
        }
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    pub fn pending(&self) -> &[PlayerId] {
        &self.pending
    }

    pub fn name_of(&self, player: PlayerId) -> &str {
        self.names.get(&player).map(String::as_str).unwrap_or_default()
    }

    pub fn snapshot(&self) -> BracketSnapshot {
        BracketSnapshot {
            round_count: self.round_count,
            history: self.history.clone(),
            stage: self.stage.clone(),
            names: self.names.clone(),
        }
    }

    fn live_round(&self) -> Result<&Round, BracketError> {
        match &self.stage {
            BracketStage::Playing(round) => Ok(round),
            BracketStage::Champion(_) => Err(BracketError::TournamentComplete),
        }
    }

    fn record_advancer(&mut self, index: usize, advancer: PlayerId) -> Result<(), BracketError> {
        let slot = self.pending[index];
        if slot != UNRESOLVED {
            if slot == advancer {
                return Ok(());
            }
            return Err(BracketError::ConflictingResult {
                previous: slot,
                attempted: advancer,
            });
        }

        self.pending[index] = advancer;
        self.advance_if_complete();

        Ok(())
    }

    fn advance_if_complete(&mut self) {
        let round_len = match &self.stage {
            BracketStage::Playing(round) => round.len(),
            BracketStage::Champion(_) => return,
        };

        let completed = self.pending.iter().filter(|&&p| p != UNRESOLVED).count();
        if completed < round_len {
            return;
        }

        if round_len == 1 {
            let champion = self.pending[0];
            if let BracketStage::Playing(finished) =
                std::mem::replace(&mut self.stage, BracketStage::Champion(champion))
            {
                self.history.push(finished);
            }
            log::info!("Bracket complete, champion is {}", self.name_of(champion));
            return;
        }

        let next_round = Round::pairing(&self.pending);
        self.pending = vec![UNRESOLVED; next_round.len()];
        if let BracketStage::Playing(finished) =
            std::mem::replace(&mut self.stage, BracketStage::Playing(next_round))
        {
            self.history.push(finished);
        }
        log::debug!(
            "Round {} complete, {} matches in the next round",
            self.history.len() - 1,
            self.pending.len()
        );
    }
}
