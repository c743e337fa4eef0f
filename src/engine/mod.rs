mod bracket;
mod error;
mod round;

pub use crate::engine::bracket::{BracketEngine, BracketSnapshot, BracketStage};
pub use crate::engine::error::BracketError;
pub use crate::engine::round::{Match, Round};
