use crate::types::PlayerId;
use thiserror::Error;

/// Errors surfaced by the bracket state machine and the layout.
///
/// Every error is fatal to the single operation that raised it; the engine
/// state is left untouched so the caller can retry with corrected input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("player count {0} is not a power of two")]
    InvalidBracketSize(usize),
    #[error("player {0} is not in the current round")]
    PlayerNotFound(PlayerId),
    #[error("match has no opponent to advance")]
    InvalidAdvancement,
    #[error("match already resolved to player {previous}, cannot record {attempted}")]
    ConflictingResult {
        previous: PlayerId,
        attempted: PlayerId,
    },
    #[error("the champion has already been decided")]
    TournamentComplete,
    #[error("bracket snapshot rounds do not form a halving sequence")]
    IncompleteBracketState,
}
