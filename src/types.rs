use std::collections::HashMap;

// A PlayerId identifies one participant in a bracket.
// The reserved value 0 marks a slot that holds no player yet (an unresolved
// match outcome, or a bye) and always resolves to the empty display name.
pub type PlayerId = u32;

pub const UNRESOLVED: PlayerId = 0;

pub type AppResult<T> = Result<T, anyhow::Error>;

pub type NameMap = HashMap<PlayerId, String>;
